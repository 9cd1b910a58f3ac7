//! One CLI invocation's view of the world: config, schedule and progress.

use readtrack_core::{
    Config, Database, DatabaseError, KvStorage, MemoryStorage, ProgressError, ProgressStore,
    Schedule,
};

/// Storage actually used for this run.
///
/// Falls back to session-only memory when the database cannot be opened, so
/// the checklist keeps working without persistence.
pub enum Backend {
    Sqlite(Database),
    SessionOnly(MemoryStorage),
}

impl Backend {
    pub fn open(config: &Config) -> Self {
        let opened = config
            .database_path()
            .map_err(|e| e.to_string())
            .and_then(|path| Database::open(path).map_err(|e| e.to_string()));
        match opened {
            Ok(db) => Backend::Sqlite(db),
            Err(reason) => {
                tracing::warn!(%reason, "database unavailable; progress will not be saved");
                eprintln!("warning: progress storage unavailable ({reason}); changes last for this run only");
                Backend::SessionOnly(MemoryStorage::new())
            }
        }
    }
}

impl KvStorage for Backend {
    type Error = DatabaseError;

    fn read(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        match self {
            Backend::Sqlite(db) => db.read(key),
            Backend::SessionOnly(mem) => Ok(mem.get(key)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        match self {
            Backend::Sqlite(db) => db.write(key, value),
            Backend::SessionOnly(mem) => {
                mem.write(key, value).unwrap_or_else(|never| match never {});
                Ok(())
            }
        }
    }
}

pub struct Session {
    pub config: Config,
    pub schedule: Schedule,
    pub store: ProgressStore<Backend>,
}

impl Session {
    /// Load config and schedule, then open progress storage.
    ///
    /// An unreadable config file and corrupt or unreadable progress are
    /// reported as warnings and replaced with defaults.
    pub fn open() -> readtrack_core::error::Result<Self> {
        let config = load_config();
        let schedule = config.schedule_provider()?.load_schedule()?;
        let backend = Backend::open(&config);

        let (mut store, recovered) =
            ProgressStore::open(backend, config.storage.progress_key.clone());
        if let Some(err) = recovered {
            warn_progress(&err);
        }
        store.subscribe(|event| tracing::debug!(?event, "progress event"));

        Ok(Self {
            config,
            schedule,
            store,
        })
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "using default configuration");
            eprintln!("warning: {e}; using default configuration");
            Config::default()
        }
    }
}

/// Report a recoverable progress condition to the user.
pub fn warn_progress(err: &ProgressError) {
    eprintln!("warning: {err}");
}
