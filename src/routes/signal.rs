//! # routes::signal
//!
//! | Method | Path               | Description                          |
//! |--------|--------------------|--------------------------------------|
//! | GET    | `/api/view`        | Current view model                   |
//! | POST   | `/api/signal/load` | Load button / Enter in the id field  |

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{commands, error::AppError, state::SharedState};

#[derive(Debug, Default, Deserialize)]
pub struct LoadBody {
    #[serde(default)]
    pub user_id: Option<String>,
}

// ─── GET /api/view ────────────────────────────────────────────────────────────

pub async fn get_view(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "ok": true, "view": state.current_view().await }))
}

// ─── POST /api/signal/load ────────────────────────────────────────────────────

/// Body is optional: no body (or no `user_id`) loads the default signal.
pub async fn load_signal(
    State(state): State<SharedState>,
    body: Option<Json<LoadBody>>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = body
        .and_then(|Json(b)| b.user_id)
        .unwrap_or_default();

    let signal = commands::load_signal(&state, &user_id).await?;

    Ok(Json(json!({ "ok": true, "signal": signal })))
}
