//! Background task that tails the contract's event stream.
//!
//! One [`Poller`] runs for the lifetime of the process: fetch a page of
//! events from the RPC, decode and store them, advance the persisted cursor,
//! sleep, repeat. Errors are logged and retried on the next tick rather than
//! tearing the task down.

use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc;

pub struct Poller {
    pool: SqlitePool,
    config: Config,
    client: Client,
    cursor: Cursor,
}

impl Poller {
    /// Resume from the persisted cursor, or from `START_LEDGER` on a fresh
    /// database.
    pub async fn resume(pool: SqlitePool, config: Config, client: Client) -> Self {
        let mut cursor = db::load_cursor(&pool).await.unwrap_or(Cursor {
            last_ledger: 0,
            last_cursor: None,
        });
        if cursor.last_ledger == 0 {
            cursor.last_ledger = i64::from(config.start_ledger);
        }
        info!(
            contract = %config.contract_id,
            ledger = cursor.last_ledger,
            "indexer resuming"
        );
        Poller {
            pool,
            config,
            client,
            cursor,
        }
    }

    pub async fn run(mut self) {
        loop {
            if let Err(e) = self.tick().await {
                error!("poll failed: {e}");
            }
            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    /// One fetch-decode-store-advance cycle.
    async fn tick(&mut self) -> Result<()> {
        let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
            &self.client,
            &self.config.rpc_url,
            &self.config.contract_id,
            self.cursor.last_ledger as u32,
            self.cursor.last_cursor.as_deref(),
            self.config.events_per_page,
        )
        .await?;

        if !raw_events.is_empty() {
            let decoded = rpc::decode_events(&raw_events, &self.config.contract_id);
            let inserted = db::insert_events(&self.pool, &decoded).await?;
            info!(
                fetched = raw_events.len(),
                stored = inserted,
                "indexed events"
            );
        }

        // With a pagination cursor we stay on the same ledger range; without
        // one we jump to the newest ledger the RPC has seen.
        if let Some(latest) = latest_ledger {
            self.cursor.last_ledger = self.cursor.last_ledger.max(latest as i64);
        }
        self.cursor.last_cursor = next_cursor;

        db::store_cursor(&self.pool, &self.cursor).await
    }
}
