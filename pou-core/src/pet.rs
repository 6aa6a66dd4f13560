//! The persisted pet record and its mapping contract.
//!
//! [`PetRecord`] is a plain stat container. All mutation goes through
//! [`crate::controller::PetController`]; stores own the durable copy and
//! are the only authority for id assignment.
//!
//! Serialization is a key→value mapping (`serde_json::Map`). Missing keys
//! fall back to field defaults and unknown keys are ignored, so a record
//! written by an older build always loads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::PetId;

/// Clamp a bounded stat into [0, 100].
pub(crate) fn clamp_stat(value: i64) -> i64 {
    value.clamp(0, 100)
}

fn default_name() -> String {
    "Pou".to_string()
}

fn default_50() -> i64 {
    50
}

fn default_100() -> i64 {
    100
}

fn default_stage() -> i64 {
    1
}

fn default_now() -> DateTime<Utc> {
    Utc::now()
}

/// One pet's persisted state.
///
/// Bounded stats (`hunger`, `happiness`, `health`, `cleanliness`,
/// `energy`) stay within [0, 100] at every observation point; `age` and
/// `coins` never go negative; `evolution_stage` only moves forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    /// Store-assigned identifier; `None` until the first successful save.
    #[serde(default)]
    pub id: Option<PetId>,
    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Satiety level, 0 (starving) to 100 (full).
    #[serde(default = "default_50")]
    pub hunger: i64,
    /// Mood level, 0–100.
    #[serde(default = "default_50")]
    pub happiness: i64,
    /// Health level, 0–100. Eroded by sustained low stats.
    #[serde(default = "default_100")]
    pub health: i64,
    /// Cleanliness level, 0–100.
    #[serde(default = "default_50")]
    pub cleanliness: i64,
    /// Energy level, 0–100. Spent by play, restored by sleep.
    #[serde(default = "default_100")]
    pub energy: i64,
    /// Age in game-days.
    #[serde(default)]
    pub age: i64,
    /// Wallet balance. Purchases fail closed, so this never goes negative.
    #[serde(default = "default_100")]
    pub coins: i64,
    /// Maturity stage, 1–3. Monotonically non-decreasing.
    #[serde(default = "default_stage")]
    pub evolution_stage: i64,
    /// When the record was first created.
    #[serde(default = "default_now")]
    pub created_at: DateTime<Utc>,
    /// Stamped by the store on every save.
    #[serde(default = "default_now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for PetRecord {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: default_name(),
            hunger: 50,
            happiness: 50,
            health: 100,
            cleanliness: 50,
            energy: 100,
            age: 0,
            coins: 100,
            evolution_stage: 1,
            created_at: now,
            last_updated: now,
        }
    }
}

impl PetRecord {
    /// Create a fresh pet with default stats and the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether this record has never been persisted.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Serialize every attribute into a key→value mapping suitable for
    /// storage. No side effects.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct always serializes to an object; anything else
            // would be a programming error, so degrade to empty.
            _ => Map::new(),
        }
    }

    /// Construct a record from a possibly-partial mapping.
    ///
    /// Missing keys fall back to the field defaults and unknown keys are
    /// ignored. Never fails: a mapping that cannot be decoded at all
    /// yields a default record (and a warning).
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(map)).unwrap_or_else(|e| {
            warn!(error = %e, "malformed pet mapping, using defaults");
            Self::default()
        })
    }
}
