//! Error types for the pou core library.
//!
//! Domain-expected conditions (stat at cap, not enough energy, not enough
//! coins) are *not* errors — controller operations report those as plain
//! `bool` returns. `PouError` covers the infrastructure: storage media,
//! serialization, configuration. Store implementations catch these at
//! their public boundary and convert them to `false` / `None` so a broken
//! database can never crash the game loop.

use thiserror::Error;

/// Top-level error type for all pou operations.
#[derive(Error, Debug)]
pub enum PouError {
    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// PostgreSQL persistence error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] postgres::Error),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, PouError>;
