//! Soroban RPC client: polls `getEvents` and decodes charity ledger events.
//!
//! Transient failures (network errors, rate limits, soft RPC errors) are
//! retried inside [`fetch_events`] with exponential back-off; only malformed
//! requests surface to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, LedgerEvent};

/// Exponential retry delay, doubling from 2s up to 60s.
struct Backoff(u64);

impl Backoff {
    fn new() -> Self {
        Backoff(2)
    }

    async fn wait(&mut self, why: impl std::fmt::Display) {
        warn!("{why}; retrying in {}s", self.0);
        tokio::time::sleep(Duration::from_secs(self.0)).await;
        self.0 = (self.0 * 2).min(60);
    }
}

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

/// One event as returned by `getEvents`, with the XDR already rendered to
/// JSON by the RPC.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct RawEvent {
    pub topic: Vec<String>,
    pub value: Value,
    pub contract_id: Option<String>,
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    pub ledger_closed_at: Option<String>,
    pub in_successful_contract_call: Option<bool>,
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let params = build_params(contract_id, start_ledger, cursor, limit);
    let mut backoff = Backoff::new();

    loop {
        match try_fetch(client, rpc_url, &params).await {
            Ok(result) => {
                debug!(
                    "fetched {} events (latest ledger {:?})",
                    result.events.len(),
                    result.latest_ledger
                );
                return Ok((result.events, result.cursor, result.latest_ledger));
            }
            Err(Fetch::Hard(e)) => return Err(e),
            Err(Fetch::Soft(why)) => backoff.wait(why).await,
        }
    }
}

/// Failure modes of a single `getEvents` attempt.
enum Fetch {
    /// Not worth retrying (malformed request, invalid method).
    Hard(IndexerError),
    /// Transient; retry after back-off.
    Soft(String),
}

async fn try_fetch(
    client: &Client,
    rpc_url: &str,
    params: &Value,
) -> std::result::Result<EventsResult, Fetch> {
    let resp = client
        .post(rpc_url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEvents",
            "params": params,
        }))
        .send()
        .await
        .map_err(|e| Fetch::Soft(format!("rpc request failed: {e}")))?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(Fetch::Soft("rate-limited by rpc".to_string()));
    }

    let body: RpcResponse = resp
        .json()
        .await
        .map_err(|e| Fetch::Soft(format!("bad rpc response body: {e}")))?;

    if let Some(err) = body.error {
        // -32600 (invalid request) and -32601 (unknown method) will never
        // succeed on retry.
        if err.code == -32600 || err.code == -32601 {
            return Err(Fetch::Hard(IndexerError::Decode(format!(
                "rpc rejected request ({}): {}",
                err.code, err.message
            ))));
        }
        return Err(Fetch::Soft(format!("rpc error {}: {}", err.code, err.message)));
    }

    body.result
        .ok_or_else(|| Fetch::Hard(IndexerError::Decode("empty getEvents result".to_string())))
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [{ "type": "contract", "contractIds": [contract_id] }],
        "pagination": { "limit": limit }
    });
    // A pagination cursor and startLedger are mutually exclusive in the API.
    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }
    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`LedgerEvent`] structs.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<LedgerEvent> {
    raw.iter()
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<LedgerEvent> {
    // Extract leading topic symbol to determine event type.
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    // The second topic element is the id the event is scoped to: asset id
    // for registry events, campaign id for campaign/milestone events.
    let subject_id = raw.topic.get(1).map(|t| extract_u64_or_raw(t));
    let (mut campaign_id, mut asset_id) = if kind.is_asset_scoped() {
        (None, subject_id)
    } else {
        (subject_id, None)
    };

    let (actor, amount, data_asset_id) = decode_data(&raw.value, &kind);
    // Campaign-scoped events that reference an asset (donation of an NFT,
    // reward mint on claim) carry the asset id in the payload.
    if asset_id.is_none() {
        asset_id = data_asset_id;
    }
    if matches!(
        kind,
        EventKind::CharitySet | EventKind::PercentageSet | EventKind::PauseToggled
    ) {
        campaign_id = None;
    }

    Some(LedgerEvent {
        event_type: kind.as_str().to_string(),
        campaign_id,
        asset_id,
        actor,
        amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
/// The XDR is decoded by the RPC into a `{"type":…, …}` JSON object.
///
/// Returns `(actor, amount, asset_id)`.
fn decode_data(
    value: &Value,
    kind: &EventKind,
) -> (Option<String>, Option<String>, Option<String>) {
    match kind {
        EventKind::AssetMinted => {
            let actor = extract_field(value, &["owner", "address"]);
            (actor, None, None)
        }
        EventKind::AssetTransferred => {
            let actor = extract_field(value, &["to", "address"]);
            (actor, None, None)
        }
        EventKind::AssetListed => {
            let actor = extract_field(value, &["owner", "address"]);
            let amount = extract_field(value, &["price"]);
            (actor, amount, None)
        }
        EventKind::AssetSold => {
            let actor = extract_field(value, &["buyer", "address"]);
            let amount = extract_field(value, &["price"]);
            (actor, amount, None)
        }
        EventKind::CampaignCreated => {
            let amount = extract_field(value, &["goal"]);
            (None, amount, None)
        }
        EventKind::DonationReceived => {
            let actor = extract_field(value, &["donor", "address"]);
            let amount = extract_field(value, &["amount"]);
            (actor, amount, None)
        }
        EventKind::AssetDonated => {
            let actor = extract_field(value, &["donor", "address"]);
            let amount = extract_field(value, &["value"]);
            let asset_id = extract_field(value, &["asset_id"]);
            (actor, amount, asset_id)
        }
        EventKind::CampaignEnded => {
            let amount = extract_field(value, &["raised"]);
            (None, amount, None)
        }
        EventKind::MilestoneAdded => {
            let amount = extract_field(value, &["target"]);
            (None, amount, None)
        }
        EventKind::MilestoneClaimed => {
            let actor = extract_field(value, &["claimer", "address"]);
            let asset_id = extract_field(value, &["reward_asset_id"]);
            (actor, None, asset_id)
        }
        EventKind::CharitySet => {
            let actor = extract_field(value, &["charity", "address"]);
            (actor, None, None)
        }
        EventKind::PercentageSet => {
            let amount = extract_field(value, &["pct"]);
            (None, amount, None)
        }
        EventKind::PauseToggled => {
            let amount = extract_field(value, &["paused"]);
            (None, amount, None)
        }
        EventKind::Unknown => (None, None, None),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(key) {
            let s = match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => v.as_str().map(String::from),
            };
            if s.is_some() {
                return s;
            }
        }
    }
    None
}

/// Extract a Soroban Symbol from the XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"minted"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    // Fallback: treat the raw string as the symbol
    raw.to_string()
}

/// Extract a subject id from a topic entry that might be a JSON object or raw number/string.
fn extract_u64_or_raw(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
