use clap::Args;
use serde::Serialize;

use readtrack_core::progress::CategoryStats;
use readtrack_core::DerivedStats;

use crate::render;
use crate::session::Session;

#[derive(Args)]
pub struct StatsArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
    /// Include a breakdown per category
    #[arg(long)]
    by_category: bool,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    overall: DerivedStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<CategoryStats>>,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let overall = session.store.stats(&session.schedule);
    let categories = args
        .by_category
        .then(|| session.store.category_stats(&session.schedule));

    if args.json {
        let report = StatsReport {
            overall,
            categories,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render::summary_line(&overall));
    if let Some(rows) = categories {
        println!();
        print!("{}", render::category_table(&rows));
    }
    Ok(())
}
