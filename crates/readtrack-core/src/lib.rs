//! # readtrack Core Library
//!
//! Core logic for readtrack, a personal reading-progress tracker. The CLI is
//! a thin renderer over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: the ordered, read-only list of reading units, supplied by
//!   a [`ScheduleProvider`] (built-in plan or a TOML file)
//! - **Progress**: the id -> completed mapping, pure toggling, and derived
//!   total/completed/percentage statistics
//! - **Storage**: a key-value capability ([`KvStorage`]) backed by SQLite or
//!   memory, plus TOML configuration
//!
//! ## Key Components
//!
//! - [`ProgressStore`]: owns the progress state, persists every change
//! - [`ProgressState`]: completion flags, serialized as a JSON object
//! - [`Schedule`]: validated reading plan
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod progress;
pub mod schedule;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, ProgressError, ScheduleError, ValidationError};
pub use events::Event;
pub use progress::{derive_stats, DerivedStats, LoadOutcome, ProgressState, ProgressStore, Toggled};
pub use schedule::{BuiltinSchedule, ReadingUnit, Schedule, ScheduleFile, ScheduleProvider};
pub use storage::{Config, Database, KvStorage, MemoryStorage};
