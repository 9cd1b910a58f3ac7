use clap::Args;
use serde::Serialize;

use crate::render;
use crate::session::Session;

#[derive(Args)]
pub struct ListArgs {
    /// Output JSON instead of a checklist
    #[arg(long)]
    json: bool,
    /// Only show units in this category
    #[arg(long)]
    category: Option<String>,
}

/// One row of `list --json`.
#[derive(Serialize)]
struct ListedUnit<'a> {
    id: &'a str,
    category: &'a str,
    label: &'a str,
    unit_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    completed: bool,
}

pub fn run(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let state = session.store.state();

    if args.json {
        let rows: Vec<ListedUnit> = session
            .schedule
            .units()
            .iter()
            .filter(|u| {
                args.category
                    .as_deref()
                    .map_or(true, |c| c.eq_ignore_ascii_case(&u.category))
            })
            .map(|u| ListedUnit {
                id: &u.id,
                category: &u.category,
                label: &u.label,
                unit_count: u.unit_count,
                note: u.note.as_deref(),
                completed: state.is_completed(&u.id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", render::summary_line(&session.store.stats(&session.schedule)));
    println!();
    print!(
        "{}",
        render::checklist(
            &session.schedule,
            state,
            &session.config.display,
            args.category.as_deref(),
        )
    );
    Ok(())
}
