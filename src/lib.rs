//! AutoCRM: a dealership CRM over a slot-based local store.
//!
//! Each entity collection (inventory, customers, leads, deals, sales, tasks,
//! reports) is persisted as one JSON array under a named slot, with settings
//! and the signed-in session stored as single-object slots. The crate is split
//! into pure domain logic, use-case stores and services, and infrastructure
//! adapters for SQLite-backed or in-memory slot storage.

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod usecase;

pub use error::{CrmError, Result};

#[cfg(test)]
mod tests;
