//! SQLite persistence: migrations, the event table, and the poll cursor.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::Result;
use crate::events::{EventRecord, LedgerEvent};

/// Open (creating if necessary) the SQLite database and apply migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("database ready at {url}");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Poll cursor
// ─────────────────────────────────────────────────────────

/// The single-row resume point: the last ledger we have fully processed and
/// the opaque pagination cursor inside it, if any.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Cursor {
    pub last_ledger: i64,
    pub last_cursor: Option<String>,
}

/// Load the persisted cursor. The migration seeds row 1, so a missing row
/// only happens on a corrupted database; treat it as a fresh start.
pub async fn load_cursor(pool: &SqlitePool) -> Result<Cursor> {
    let row = sqlx::query_as::<_, Cursor>(
        "SELECT last_ledger, last_cursor FROM indexer_cursor WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row.unwrap_or(Cursor {
        last_ledger: 0,
        last_cursor: None,
    }))
}

/// Persist the cursor so a restart resumes exactly where we stopped.
pub async fn store_cursor(pool: &SqlitePool, cursor: &Cursor) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(cursor.last_ledger)
        .bind(&cursor.last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events, returning how many were actually new.
///
/// The `(ledger, tx_hash, event_type, campaign_id, asset_id)` unique index
/// plus `INSERT OR IGNORE` makes re-polling an already-seen ledger range a
/// no-op, so the indexer is idempotent across restarts and RPC replays.
pub async fn insert_events(pool: &SqlitePool, events: &[LedgerEvent]) -> Result<usize> {
    let mut inserted = 0usize;
    for ev in events {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_type, campaign_id, asset_id, actor, amount, ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&ev.event_type)
        .bind(&ev.campaign_id)
        .bind(&ev.asset_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(pool)
        .await?;

        inserted += result.rows_affected() as usize;
    }
    Ok(inserted)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

const SELECT_EVENTS: &str = "SELECT id, event_type, campaign_id, asset_id, actor, amount, \
     ledger, timestamp, contract_id, tx_hash, created_at FROM events";

/// Every indexed event touching the given campaign, in ledger order.
pub async fn get_events_for_campaign(
    pool: &SqlitePool,
    campaign_id: &str,
) -> Result<Vec<EventRecord>> {
    let query = format!("{SELECT_EVENTS} WHERE campaign_id = ?1 ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&query)
        .bind(campaign_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// The provenance trail of a single asset, in ledger order.
pub async fn get_events_for_asset(pool: &SqlitePool, asset_id: &str) -> Result<Vec<EventRecord>> {
    let query = format!("{SELECT_EVENTS} WHERE asset_id = ?1 ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&query)
        .bind(asset_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Every indexed event, in ledger order.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let query = format!("{SELECT_EVENTS} ORDER BY ledger ASC, id ASC");
    let rows = sqlx::query_as::<_, EventRecord>(&query)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
