//! # routes::connectivity
//!
//! Browser `online` / `offline` signals, plus a liveness probe.

use std::sync::atomic::Ordering;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{commands, state::SharedState};

#[derive(Debug, Deserialize)]
pub struct ConnectivityBody {
    pub online: bool,
}

/// POST /api/connectivity
pub async fn set_connectivity(
    State(state): State<SharedState>,
    Json(body): Json<ConnectivityBody>,
) -> impl IntoResponse {
    commands::set_connectivity(&state, body.online).await;

    Json(json!({ "ok": true, "online": body.online }))
}

/// GET /health
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let has_snapshot = state.last_snapshot.read().await.is_some();

    Json(json!({
        "ok":              true,
        "load_count":      state.load_count.load(Ordering::Relaxed),
        "subscribe_count": state.subscribe_count.load(Ordering::Relaxed),
        "has_snapshot":    has_snapshot,
        "backend":         state.config.api_base_url,
    }))
}
