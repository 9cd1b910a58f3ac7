//! Progress model: completion state, derived statistics and the store that
//! persists them.

mod state;
mod stats;
pub mod store;

pub use state::ProgressState;
pub use stats::{derive_category_stats, derive_stats, percentage, CategoryStats, DerivedStats};
pub use store::{LoadOutcome, ProgressStore, Toggled};
