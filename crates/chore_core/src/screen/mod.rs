//! Screen state machines.
//!
//! # Responsibility
//! - Hold per-screen in-memory state and transient UI state.
//! - Apply user operations and persist through `SetupGateway`.
//!
//! # Invariants
//! - Screens never access storage except through the gateway.
//! - Each screen owns the fields it mutates and re-reads the rest before saving.

pub mod checklist;
pub mod landing;
pub mod setup;
