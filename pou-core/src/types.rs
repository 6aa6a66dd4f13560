//! Core type definitions for the pou state engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a persisted pet.
///
/// Assigned exactly once, by the store, at first successful save
/// (monotonic counter for the in-memory and SQLite stores, database
/// sequence for PostgreSQL). Stable for the lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub i64);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete maturity level of a pet, gated by cumulative in-game age.
///
/// Stages are 1 (child), 2 (teen), 3 (adult). Stored as a plain integer
/// in [`crate::pet::PetRecord`]; this enum exists for drivers that want
/// to match on the stage without magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvolutionStage {
    /// Stage 1: ages 0–6.
    Child,
    /// Stage 2: ages 7–13.
    Teen,
    /// Stage 3: age 14 and up. Terminal.
    Adult,
}

impl EvolutionStage {
    /// Map a stored stage number to the enum. Out-of-range values
    /// saturate (0 → Child, 4+ → Adult).
    #[must_use]
    pub fn from_number(stage: i64) -> Self {
        match stage {
            i64::MIN..=1 => Self::Child,
            2 => Self::Teen,
            _ => Self::Adult,
        }
    }

    /// The stage number stored in the record (1, 2 or 3).
    #[must_use]
    pub fn number(self) -> i64 {
        match self {
            Self::Child => 1,
            Self::Teen => 2,
            Self::Adult => 3,
        }
    }

    /// Minimum age (in game-days) required to *leave* this stage, or
    /// `None` for the terminal stage.
    #[must_use]
    pub fn next_threshold(self) -> Option<i64> {
        match self {
            Self::Child => Some(7),
            Self::Teen => Some(14),
            Self::Adult => None,
        }
    }
}

impl fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Child => "child",
            Self::Teen => "teen",
            Self::Adult => "adult",
        };
        write!(f, "{name}")
    }
}
