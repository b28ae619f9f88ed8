//! Read-only REST surface over the indexed event store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::errors::Result;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

/// Assemble the full API router with CORS and request tracing attached.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/campaigns/:id/events", get(get_campaign_events))
        .route("/assets/:id/events", get(get_asset_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CampaignEventsResponse {
    pub campaign_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AssetEventsResponse {
    pub asset_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /campaigns/:id/events`
///
/// Returns all indexed events for the given campaign, donation and milestone
/// activity included.
pub async fn get_campaign_events(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<String>,
) -> impl IntoResponse {
    respond(
        db::get_events_for_campaign(&state.pool, &campaign_id)
            .await
            .map(|events| {
                let count = events.len();
                serde_json::json!(CampaignEventsResponse {
                    campaign_id,
                    count,
                    events,
                })
            }),
    )
}

/// `GET /assets/:id/events`
///
/// Returns the full provenance trail of an asset: mint, listings, sales,
/// transfers, and donation into a campaign.
pub async fn get_asset_events(
    State(state): State<Arc<ApiState>>,
    Path(asset_id): Path<String>,
) -> impl IntoResponse {
    respond(
        db::get_events_for_asset(&state.pool, &asset_id)
            .await
            .map(|events| {
                let count = events.len();
                serde_json::json!(AssetEventsResponse {
                    asset_id,
                    count,
                    events,
                })
            }),
    )
}

/// `GET /events`
///
/// Returns all indexed events across the whole ledger.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    respond(db::get_all_events(&state.pool).await.map(|events| {
        let count = events.len();
        serde_json::json!(AllEventsResponse { count, events })
    }))
}

fn respond(result: Result<serde_json::Value>) -> axum::response::Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!(ErrorResponse {
                error: e.to_string()
            })),
        )
            .into_response(),
    }
}
