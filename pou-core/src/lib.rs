//! # pou-core
//!
//! State engine for a virtual-pet desktop game: one creature with numeric
//! stats that decay over time and recover through player care.
//!
//! - [`pet::PetRecord`] — the persisted stat container and its key→value
//!   mapping contract.
//! - [`controller::PetController`] — decay, interactions (feed / play /
//!   clean / sleep / heal / eat), evolution, all as atomic in-memory
//!   mutations with `bool` applicability results.
//! - [`store`] — interchangeable persistence backends (in-memory, SQLite,
//!   PostgreSQL) behind [`store::PetStore`], with every medium error
//!   swallowed at the boundary so the game loop never crashes.
//! - [`catalog`] — static food/shop item tables and the inventory.
//! - [`session::GameSession`] — the context object a rendering loop
//!   drives: per-frame ticks, interaction dispatch, autosave.
//!
//! Rendering, input, audio and mini-games are external collaborators;
//! this crate is the contract they consume.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod pet;
pub mod session;
pub mod store;
pub mod types;

pub use catalog::{FoodItem, Inventory, CATALOG};
pub use config::GameConfig;
pub use controller::{Interaction, InteractionOutcome, PetController};
pub use error::{PouError, Result};
pub use pet::PetRecord;
pub use session::GameSession;
pub use store::{open_store, MemoryStore, PetStore, PostgresStore, SqliteStore};
pub use types::{EvolutionStage, PetId};
