use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use readtrack_core::ProgressState;

use crate::render;
use crate::session::{warn_progress, Session};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Clear all progress
    Reset,
    /// Remove entries for ids that are not in the current schedule
    Prune,
    /// Print the persisted JSON record
    Export,
    /// Replace progress with a JSON record (e.g. a browser localStorage export)
    Import {
        /// File to read, or "-" for stdin
        file: PathBuf,
    },
}

fn read_input(file: &Path) -> std::io::Result<String> {
    if file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(file)
    }
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        ProgressAction::Reset => {
            let cleared = session.store.state().len();
            if let Err(err) = session.store.reset() {
                warn_progress(&err);
            }
            println!("progress reset ({cleared} entries cleared)");
        }
        ProgressAction::Prune => {
            let (removed, saved) = session.store.prune(&session.schedule);
            if let Err(err) = saved {
                warn_progress(&err);
            }
            if removed.is_empty() {
                println!("nothing to prune");
            } else {
                println!("pruned {} entries: {}", removed.len(), removed.join(", "));
            }
        }
        ProgressAction::Export => {
            println!("{}", session.store.export()?);
        }
        ProgressAction::Import { file } => {
            let content = read_input(&file)?;
            let state = ProgressState::from_json(content.trim())
                .map_err(|e| format!("invalid progress record: {e}"))?;

            let unknown = state.unknown_ids(&session.schedule).len();
            if unknown > 0 {
                eprintln!("warning: {unknown} imported ids are not in the current schedule");
            }

            if let Err(err) = session.store.import(state) {
                warn_progress(&err);
            }
            println!("{}", render::summary_line(&session.store.stats(&session.schedule)));
        }
    }
    Ok(())
}
