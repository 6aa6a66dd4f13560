//! Embedded SQLite store.
//!
//! One table, one live connection per process:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pets (
//!     id              INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name            TEXT NOT NULL,
//!     hunger          INTEGER DEFAULT 50,
//!     happiness       INTEGER DEFAULT 50,
//!     health          INTEGER DEFAULT 100,
//!     cleanliness     INTEGER DEFAULT 50,
//!     energy          INTEGER DEFAULT 100,
//!     age             INTEGER DEFAULT 0,
//!     coins           INTEGER DEFAULT 100,
//!     evolution_stage INTEGER DEFAULT 1,
//!     created_at      TEXT NOT NULL,
//!     last_updated    TEXT NOT NULL
//! );
//! ```
//!
//! Field semantics are identical to the Postgres store, so a pet saved by
//! one and loaded by the other behaves the same (only id generation
//! differs). Timestamps are stored as RFC 3339 text.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::{debug, info, warn};

use super::PetStore;
use crate::error::Result;
use crate::pet::PetRecord;
use crate::types::PetId;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS pets (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    hunger          INTEGER DEFAULT 50,
    happiness       INTEGER DEFAULT 50,
    health          INTEGER DEFAULT 100,
    cleanliness     INTEGER DEFAULT 50,
    energy          INTEGER DEFAULT 100,
    age             INTEGER DEFAULT 0,
    coins           INTEGER DEFAULT 100,
    evolution_stage INTEGER DEFAULT 1,
    created_at      TEXT NOT NULL,
    last_updated    TEXT NOT NULL
);";

/// Handle to an open SQLite database holding the `pets` table.
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PouError::Database`] when the file cannot be
    /// opened or the schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), "SQLite pet store opened");
        Ok(Self { conn, db_path })
    }

    /// Open a throwaway in-memory database (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`crate::PouError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn try_save(&mut self, record: &mut PetRecord) -> Result<()> {
        record.last_updated = Utc::now();
        match record.id {
            None => {
                self.conn.execute(
                    "INSERT INTO pets
                     (name, hunger, happiness, health, cleanliness, energy,
                      age, coins, evolution_stage, created_at, last_updated)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        record.name,
                        record.hunger,
                        record.happiness,
                        record.health,
                        record.cleanliness,
                        record.energy,
                        record.age,
                        record.coins,
                        record.evolution_stage,
                        record.created_at.to_rfc3339(),
                        record.last_updated.to_rfc3339(),
                    ],
                )?;
                let id = PetId(self.conn.last_insert_rowid());
                record.id = Some(id);
                debug!(%id, name = %record.name, "pet created");
            }
            Some(id) => {
                // 0 rows affected (row deleted meanwhile) is a no-op.
                self.conn.execute(
                    "UPDATE pets
                     SET name = ?1, hunger = ?2, happiness = ?3, health = ?4,
                         cleanliness = ?5, energy = ?6, age = ?7, coins = ?8,
                         evolution_stage = ?9, last_updated = ?10
                     WHERE id = ?11",
                    params![
                        record.name,
                        record.hunger,
                        record.happiness,
                        record.health,
                        record.cleanliness,
                        record.energy,
                        record.age,
                        record.coins,
                        record.evolution_stage,
                        record.last_updated.to_rfc3339(),
                        id.0,
                    ],
                )?;
            }
        }
        Ok(())
    }

    fn try_load(&mut self, id: PetId) -> Result<Option<PetRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, hunger, happiness, health, cleanliness, energy,
                    age, coins, evolution_stage, created_at, last_updated
             FROM pets WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id.0])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_record(row)?)),
            None => Ok(None),
        }
    }

    fn try_list_all(&mut self) -> Result<Vec<PetRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, hunger, happiness, health, cleanliness, energy,
                    age, coins, evolution_stage, created_at, last_updated
             FROM pets ORDER BY created_at DESC, id DESC",
        )?;
        let pets = stmt
            .query_map([], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    fn try_delete(&mut self, id: PetId) -> Result<()> {
        self.conn
            .execute("DELETE FROM pets WHERE id = ?1", params![id.0])?;
        Ok(())
    }
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PetRecord> {
    Ok(PetRecord {
        id: Some(PetId(row.get(0)?)),
        name: row.get(1)?,
        hunger: row.get(2)?,
        happiness: row.get(3)?,
        health: row.get(4)?,
        cleanliness: row.get(5)?,
        energy: row.get(6)?,
        age: row.get(7)?,
        coins: row.get(8)?,
        evolution_stage: row.get(9)?,
        created_at: parse_timestamp(row, 10)?,
        last_updated: parse_timestamp(row, 11)?,
    })
}

impl PetStore for SqliteStore {
    fn save(&mut self, record: &mut PetRecord) -> bool {
        match self.try_save(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save pet");
                false
            }
        }
    }

    fn load(&mut self, id: PetId) -> Option<PetRecord> {
        match self.try_load(id) {
            Ok(found) => found,
            Err(e) => {
                warn!(%id, error = %e, "failed to load pet");
                None
            }
        }
    }

    fn list_all(&mut self) -> Vec<PetRecord> {
        match self.try_list_all() {
            Ok(pets) => pets,
            Err(e) => {
                warn!(error = %e, "failed to list pets");
                Vec::new()
            }
        }
    }

    fn delete(&mut self, id: PetId) -> bool {
        match self.try_delete(id) {
            Ok(()) => true,
            Err(e) => {
                warn!(%id, error = %e, "failed to delete pet");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_id_and_round_trips() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut pet = PetRecord::new("Pou");
        pet.hunger = 33;
        pet.coins = 12;

        assert!(store.save(&mut pet));
        let id = pet.id.expect("id assigned");
        assert!(id.0 > 0);

        let loaded = store.load(id).expect("found");
        assert_eq!(loaded.name, "Pou");
        assert_eq!(loaded.hunger, 33);
        assert_eq!(loaded.coins, 12);
        assert_eq!(loaded.evolution_stage, 1);
    }

    #[test]
    fn update_existing_row() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut pet = PetRecord::new("Pou");
        store.save(&mut pet);
        let id = pet.id.expect("id");

        pet.hunger = 90;
        pet.evolution_stage = 2;
        assert!(store.save(&mut pet));

        let loaded = store.load(id).expect("found");
        assert_eq!(loaded.hunger, 90);
        assert_eq!(loaded.evolution_stage, 2);
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn update_missing_row_is_noop_success() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut pet = PetRecord::new("Ghost");
        pet.id = Some(PetId(123));
        assert!(store.save(&mut pet));
        assert!(store.load(PetId(123)).is_none());
    }

    #[test]
    fn load_missing_returns_none() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        assert!(store.load(PetId(7)).is_none());
    }

    #[test]
    fn delete_then_load_is_none() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut pet = PetRecord::new("Pou");
        store.save(&mut pet);
        let id = pet.id.expect("id");

        assert!(store.delete(id));
        assert!(store.load(id).is_none());
    }

    #[test]
    fn list_all_newest_first() {
        let mut store = SqliteStore::open_in_memory().expect("open");

        let mut older = PetRecord::new("Older");
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        let mut newer = PetRecord::new("Newer");

        store.save(&mut older);
        store.save(&mut newer);

        let all = store.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Newer");
        assert_eq!(all[1].name, "Older");
    }

    #[test]
    fn empty_store_lists_nothing() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pou.db");

        let mut pet = PetRecord::new("Durable");
        {
            let mut store = SqliteStore::open(&path).expect("open");
            assert!(store.save(&mut pet));
        }
        let id = pet.id.expect("id");

        let mut reopened = SqliteStore::open(&path).expect("reopen");
        let loaded = reopened.load(id).expect("found after reopen");
        assert_eq!(loaded.name, "Durable");
    }

    #[test]
    fn timestamps_round_trip() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut pet = PetRecord::new("Pou");
        store.save(&mut pet);
        let loaded = store.load(pet.id.expect("id")).expect("found");
        assert_eq!(loaded.created_at, pet.created_at);
        assert_eq!(loaded.last_updated, pet.last_updated);
    }
}
