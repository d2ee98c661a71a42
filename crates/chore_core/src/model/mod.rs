//! Family chore domain model.
//!
//! # Responsibility
//! - Define the persisted aggregate and its entity records.
//! - Keep the JSON wire shape of the stored record in one place.
//!
//! # Invariants
//! - Every kid and chore is identified by an opaque id generated once.
//! - The aggregate (`SetupRecord`) is the only unit of persistence.

pub mod setup;
