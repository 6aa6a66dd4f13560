//! Pluggable persistence for pet records.
//!
//! Three interchangeable stores implement [`PetStore`]: in-memory
//! ([`MemoryStore`]), embedded SQLite ([`SqliteStore`]) and PostgreSQL
//! ([`PostgresStore`]). One store is active per process, and all calls go
//! through its single live connection, so persistence is serialized.
//!
//! # Failure policy
//!
//! The game loop must never crash because a disk or database went away.
//! Every medium-level error is caught at this boundary, logged via
//! `tracing::warn!`, and surfaced as `false` / `None` / an empty list.
//! Callers check return values; nothing here panics or propagates errors.

mod memory;
mod postgres;
mod sqlite;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::pet::PetRecord;
use crate::types::PetId;

/// Capability set shared by every storage backend.
///
/// Methods take `&mut self` because each backend drives a single live
/// connection (or mutates its in-memory list).
pub trait PetStore {
    /// Persist `record`, stamping `last_updated`.
    ///
    /// A record without an id is inserted and gets one assigned; a record
    /// with an id has all fields updated (a missing row is a no-op, not a
    /// failure). Returns `false` only when the medium itself fails.
    fn save(&mut self, record: &mut PetRecord) -> bool;

    /// Fetch the record with `id`, or `None` when absent or on a medium
    /// failure.
    fn load(&mut self, id: PetId) -> Option<PetRecord>;

    /// Every stored record, newest-created-first. Empty on an empty store
    /// or a medium failure.
    fn list_all(&mut self) -> Vec<PetRecord>;

    /// Remove the record with `id`. Returns `false` only on a medium
    /// failure.
    fn delete(&mut self, id: PetId) -> bool;
}

/// Open the store selected by `config`.
///
/// A backend that cannot be opened (file not writable, server down,
/// unknown backend name) degrades to [`MemoryStore`] with a warning, so
/// gameplay proceeds without persistence rather than crashing at startup.
#[must_use]
pub fn open_store(config: &StorageConfig) -> Box<dyn PetStore> {
    match config.backend.as_str() {
        "memory" => {
            info!("using in-memory store (no persistence)");
            Box::new(MemoryStore::new())
        }
        "sqlite" => match SqliteStore::open(&config.sqlite_path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(
                    path = %config.sqlite_path,
                    error = %e,
                    "SQLite unavailable, falling back to in-memory store"
                );
                Box::new(MemoryStore::new())
            }
        },
        "postgres" => match PostgresStore::connect(&config.postgres_url) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!(error = %e, "Postgres unavailable, falling back to in-memory store");
                Box::new(MemoryStore::new())
            }
        },
        other => {
            warn!(backend = other, "unknown storage backend, using in-memory store");
            Box::new(MemoryStore::new())
        }
    }
}
