//! # engine::loader
//!
//! **Snapshot Loader** — one `GET <base>/snapshot[?user_id=…]` per call.
//!
//! Returns the decoded JSON body untouched; shape checks belong to the
//! renderer.  No retry and no explicit timeout: a failed load is terminal
//! and the user re-triggers it from the page.

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppError;

/// Snapshot URL, with `user_id` only when the trimmed id is non-empty.
pub fn snapshot_url(config: &Config, user_id: &str) -> Result<reqwest::Url, AppError> {
    let mut url = reqwest::Url::parse(&config.snapshot_endpoint())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("bad snapshot URL: {e}")))?;

    let user_id = user_id.trim();
    if !user_id.is_empty() {
        url.query_pairs_mut().append_pair("user_id", user_id);
    }

    Ok(url)
}

/// Fetch and JSON-decode one snapshot.
pub async fn fetch_snapshot(
    client: &reqwest::Client,
    config: &Config,
    user_id: &str,
) -> Result<Value, AppError> {
    let url = snapshot_url(config, user_id)?;

    debug!(url = %url, "Requesting snapshot...");

    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, "Snapshot endpoint unreachable");
            AppError::Transport(e.to_string())
        })?;

    let status = resp.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        warn!(status = status.as_u16(), reason = %reason, "Snapshot request rejected");
        return Err(AppError::Status { status: status.as_u16(), reason });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, "Snapshot body is not JSON");
        AppError::Decode(e.to_string())
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
