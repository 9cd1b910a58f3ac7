pub mod config;
pub mod list;
pub mod progress;
pub mod schedule;
pub mod stats;
pub mod toggle;
