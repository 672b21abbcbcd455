//! # routes::subscribe
//!
//! | Method | Path                   | Description                         |
//! |--------|------------------------|-------------------------------------|
//! | POST   | `/api/subscribe`       | Subscribe button / Enter in email   |
//! | POST   | `/api/strategy/select` | Strategy selector changed           |

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{commands, error::AppError, models::SubscribeForm, state::SharedState};

#[derive(Debug, Deserialize)]
pub struct SelectBody {
    pub strategy: String,
}

/// POST /api/subscribe
///
/// A body that does not decode still lands in the inline status area.
pub async fn subscribe(
    State(state): State<SharedState>,
    form: Result<Json<SubscribeForm>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = match form {
        Ok(Json(form)) => form,
        Err(rejection) => return Err(commands::reject_form(&state, &rejection.body_text()).await),
    };

    let user_id = commands::subscribe(&state, form).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":      true,
            "user_id": user_id,
            "message": format!("Subscribed! Your user ID is {user_id}"),
        })),
    ))
}

/// POST /api/strategy/select
pub async fn select_strategy(
    State(state): State<SharedState>,
    Json(body): Json<SelectBody>,
) -> impl IntoResponse {
    let prefilled = commands::select_strategy(&state, &body.strategy).await;

    Json(json!({
        "ok":        true,
        "strategy":  body.strategy.trim(),
        "prefilled": prefilled,
    }))
}
