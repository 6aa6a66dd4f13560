//! In-memory fallback store.
//!
//! Used when no database is configured or reachable. Records live in a
//! plain `Vec` with a monotonic id counter and vanish at process exit.

use chrono::Utc;
use tracing::debug;

use super::PetStore;
use crate::pet::PetRecord;
use crate::types::PetId;

/// Volatile store backed by a `Vec`. Never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pets: Vec<PetRecord>,
    next_id: i64,
}

impl MemoryStore {
    /// Empty store; ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pets: Vec::new(),
            next_id: 1,
        }
    }
}

impl PetStore for MemoryStore {
    fn save(&mut self, record: &mut PetRecord) -> bool {
        record.last_updated = Utc::now();
        match record.id {
            None => {
                let id = PetId(self.next_id);
                self.next_id += 1;
                record.id = Some(id);
                self.pets.push(record.clone());
                debug!(%id, name = %record.name, "pet created in memory");
            }
            Some(id) => {
                // Missing row is a no-op, matching the database stores.
                if let Some(slot) = self.pets.iter_mut().find(|p| p.id == Some(id)) {
                    *slot = record.clone();
                }
            }
        }
        true
    }

    fn load(&mut self, id: PetId) -> Option<PetRecord> {
        self.pets.iter().find(|p| p.id == Some(id)).cloned()
    }

    fn list_all(&mut self) -> Vec<PetRecord> {
        let mut pets = self.pets.clone();
        pets.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        pets
    }

    fn delete(&mut self, id: PetId) -> bool {
        self.pets.retain(|p| p.id != Some(id));
        true
    }
}
