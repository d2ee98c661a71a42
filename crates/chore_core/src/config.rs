//! Runtime configuration resolved from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `CHORE_TRACKER_DB_PATH` | `<temp dir>/chore_tracker.sqlite3` |
//! | `CHORE_TRACKER_LOG_LEVEL` | [`default_log_level`] |
//! | `CHORE_TRACKER_LOG_DIR` | unset (file logging disabled) |
//!
//! The log settings also fill blank arguments of host-driven logging init.

use crate::logging::{default_log_level, init_logging, normalize_level};
use log::warn;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CHORE_TRACKER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CHORE_TRACKER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CHORE_TRACKER_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "chore_tracker.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// SQLite file holding the setup record.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Absolute directory for rolling logs; `None` keeps logging off.
    pub log_dir: Option<PathBuf>,
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`. Blank values count as unset;
    /// an unknown log level or a relative log directory falls back to the
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).unwrap_or_else(|err| {
                warn!("event=config_resolve module=config status=error key={LOG_LEVEL_ENV} error={err}");
                default_log_level()
            }),
            None => default_log_level(),
        };

        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from).filter(|dir| {
            let absolute = dir.is_absolute();
            if !absolute {
                warn!("event=config_resolve module=config status=error key={LOG_DIR_ENV} reason=relative_path");
            }
            absolute
        });

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }

    /// Starts file logging from `log_level`/`log_dir`.
    ///
    /// Returns `Ok(false)` without touching the logger when no directory is
    /// configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(self.log_level, log_dir)?;
        Ok(true)
    }

    /// Fills blank host-supplied logging arguments from this configuration.
    pub fn logging_args(&self, level: &str, log_dir: &str) -> (String, String) {
        let level = match level.trim() {
            "" => self.log_level.to_string(),
            explicit => explicit.to_string(),
        };
        let log_dir = match log_dir.trim() {
            "" => self
                .log_dir
                .as_deref()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
            explicit => explicit.to_string(),
        };
        (level, log_dir)
    }
}
