//! Error type shared across the indexer binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("rpc transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad configuration: {0}")]
    Config(String),

    #[error("event decode: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
