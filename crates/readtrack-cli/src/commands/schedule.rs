use clap::Subcommand;
use readtrack_core::ScheduleFile;

use crate::session::Session;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the reading units in order
    Show {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the schedule as TOML, usable as a starting point for `schedule.path`
    Dump,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let schedule = &session.schedule;

    match action {
        ScheduleAction::Show { json: true } => {
            println!("{}", serde_json::to_string_pretty(schedule.units())?);
        }
        ScheduleAction::Show { json: false } => {
            for group in schedule.categories() {
                let chapters: u64 = group.units.iter().map(|u| u64::from(u.unit_count)).sum();
                println!("{} ({} units, {} ch.)", group.category, group.units.len(), chapters);
                for unit in group.units {
                    println!("  {:<4} {}", unit.id, unit.label);
                }
            }
            println!();
            println!("{} units, {} chapters", schedule.len(), schedule.total_unit_count());
        }
        ScheduleAction::Dump => {
            print!("{}", ScheduleFile::render(schedule)?);
        }
    }
    Ok(())
}
