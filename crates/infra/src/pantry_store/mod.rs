//! Durable keyed storage for pantry entries.
//!
//! The trait is a capability contract: any implementer exposing `find_all`,
//! `find_by_names`, and `save_all` with the stated semantics is
//! substitutable. Two implementations live here — Postgres for production and
//! an in-memory map for tests/dev.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryPantryStore;
pub use postgres::PostgresPantryStore;

use async_trait::async_trait;
use thiserror::Error;

use larder_pantry::PantryEntry;

/// Store operation error.
///
/// These are **infrastructure** errors (connectivity, constraints,
/// deadlines), as opposed to domain errors (unit mismatch, insufficient
/// stock). The store performs no retries; retry policy belongs to callers.
#[derive(Debug, Error)]
pub enum PantryStoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("store operation timed out")]
    Timeout,
}

impl PantryStoreError {
    pub fn database(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Database {
            operation,
            message: message.into(),
        }
    }
}

/// Durable pantry storage.
///
/// ## Contract
///
/// - `find_all` returns the full snapshot, no ordering guarantee.
/// - `find_by_names` returns the subset of entries whose name is in the
///   input; an empty input yields an empty result without touching storage.
/// - `save_all` upserts every entry by `id` (existing id: name/amount/unit
///   overwritten; fresh id: inserted) as a **single atomic batch** — either
///   all entries are durably applied or none are. It returns the post-commit
///   state of exactly the entries passed in.
///
/// The read-then-write sequence around a batch is *not* synchronized by the
/// store; [`crate::pantry_service::PantryService`] serializes writers.
#[async_trait]
pub trait PantryStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PantryEntry>, PantryStoreError>;

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<PantryEntry>, PantryStoreError>;

    async fn save_all(&self, entries: Vec<PantryEntry>)
    -> Result<Vec<PantryEntry>, PantryStoreError>;
}
