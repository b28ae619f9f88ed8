//! Runtime configuration, read once from the environment at startup.
//!
//! Only `CONTRACT_ID` is mandatory; everything else has a testnet-friendly
//! default so `CONTRACT_ID=C... cargo run` is a complete invocation.

use std::str::FromStr;

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint.
    pub rpc_url: String,
    /// Strkey address of the deployed charity ledger contract.
    pub contract_id: String,
    /// SQLite database URL (a bare path is accepted too).
    pub database_url: String,
    /// Listen port for the REST API.
    pub api_port: u16,
    /// Seconds between `getEvents` polls.
    pub poll_interval_secs: u64,
    /// Page size for each `getEvents` request.
    pub events_per_page: u32,
    /// First ledger to scan when no cursor has been persisted yet.
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let contract_id = std::env::var("CONTRACT_ID")
            .map_err(|_| IndexerError::Config("CONTRACT_ID must be set".into()))?;

        Ok(Config {
            rpc_url: string_or("RPC_URL", "https://soroban-testnet.stellar.org"),
            contract_id,
            database_url: string_or("DATABASE_URL", "sqlite:./ledger_events.db"),
            api_port: parsed_or("API_PORT", 3001)?,
            poll_interval_secs: parsed_or("POLL_INTERVAL_SECS", 5)?,
            events_per_page: parsed_or("EVENTS_PER_PAGE", 100)?,
            start_ledger: parsed_or("START_LEDGER", 0)?,
        })
    }
}

fn string_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an env var into `T`, falling back to `default` when unset.
/// A present-but-unparsable value is a hard error, not a silent default.
fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| IndexerError::Config(format!("{key}={raw} is not a valid value"))),
    }
}
