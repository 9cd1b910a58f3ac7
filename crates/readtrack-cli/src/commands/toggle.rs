use crate::render;
use crate::session::{warn_progress, Session};

pub fn run(ids: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    for id in ids {
        let unit = session.schedule.get(id);
        if unit.is_none() {
            tracing::warn!(id = %id, "toggling id outside the current schedule");
            match session.schedule.find_ignore_case(id) {
                Some(near) => eprintln!(
                    "warning: '{id}' is not in the current schedule; stored anyway (did you mean {}?)",
                    near.id
                ),
                None => eprintln!("warning: '{id}' is not in the current schedule; stored anyway"),
            }
        }

        let toggled = session.store.toggle(id);
        if let Err(err) = &toggled.saved {
            warn_progress(err);
        }

        match unit {
            Some(unit) => println!(
                "{}",
                render::unit_line(unit, toggled.completed, &session.config.display)
            ),
            None => println!("[{}] {id}", if toggled.completed { "x" } else { " " }),
        }
    }

    println!("{}", render::summary_line(&session.store.stats(&session.schedule)));
    Ok(())
}
