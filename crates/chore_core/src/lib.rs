//! Core domain logic for the kid chore tracker.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod screen;
pub mod store;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::setup::{
    Assignment, Chore, ChoreId, Completion, Kid, KidId, SetupRecord, DEFAULT_REWARD_GOAL,
};
pub use screen::checklist::{ChecklistScreen, ChoreProgress, IncrementOutcome, COMPLETION_PULSE};
pub use screen::landing::{landing_page, LandingPage, NavLink, Screen};
pub use screen::setup::{AssignedChore, SetupScreen};
pub use store::gateway::{SetupGateway, SETUP_STORAGE_KEY};
pub use store::memory::MemoryStorage;
pub use store::sqlite::SqliteStorage;
pub use store::{StorageBackend, StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
