//! # engine::composer
//!
//! **Subscription Composer** — validate the subscribe form, build the
//! `/subscribe` body and POST it.
//!
//! ## Flow
//! ```text
//! email ──▶ trim ──▶ non-empty? ──▶ local@domain.tld? ──▶ build body ──▶ POST
//!                      │                 │                    │
//!                      ▼                 ▼                    ▼
//!                 EmptyEmail        InvalidEmail      InvalidCustomParams
//! ```
//! Validation failures never reach the network.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, ValidationError};
use crate::models::{CustomFields, CustomStrategyParams, SubscribeForm, SubscriptionRequest};

// ─── Validation ───────────────────────────────────────────────────────────────

/// Same acceptance as `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn is_valid_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // a dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trimmed email, or the first validation failure.
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();

    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !is_valid_email_shape(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(email.to_string())
}

fn validate_custom(fields: &CustomFields) -> Result<(), ValidationError> {
    if fields.ma_period < 1 {
        return Err(ValidationError::InvalidCustomParams("MA period must be at least 1".into()));
    }
    if !fields.sell_percent.is_finite() || !(0.0..100.0).contains(&fields.sell_percent) {
        return Err(ValidationError::InvalidCustomParams(
            "sell percent must be between 0 and 100".into(),
        ));
    }
    if !fields.buy_percent.is_finite() || fields.buy_percent < 0.0 {
        return Err(ValidationError::InvalidCustomParams(
            "buy percent must be zero or positive".into(),
        ));
    }
    Ok(())
}

// ─── Request Body ─────────────────────────────────────────────────────────────

/// Percent fields → threshold fractions: `sell = 1 - s/100`, `buy = 1 + b/100`.
pub fn custom_strategy_params(fields: &CustomFields, data_field: &str) -> CustomStrategyParams {
    CustomStrategyParams {
        ma_period:      Some(fields.ma_period),
        sell_threshold: Some(1.0 - fields.sell_percent / 100.0),
        buy_threshold:  Some(1.0 + fields.buy_percent / 100.0),
        data_field:     Some(data_field.to_string()),
    }
}

/// Validate `form` and turn it into the body for `POST /subscribe`.
pub fn build_request(form: &SubscribeForm, data_field: &str) -> Result<SubscriptionRequest, ValidationError> {
    let email = validate_email(&form.email)?;

    let strategy_params = if form.is_custom() {
        let fields = form.custom.as_ref().ok_or_else(|| {
            ValidationError::InvalidCustomParams("custom strategy needs MA period and thresholds".into())
        })?;
        validate_custom(fields)?;
        custom_strategy_params(fields, data_field)
    } else {
        CustomStrategyParams::default()
    };

    Ok(SubscriptionRequest {
        email,
        strategy: form.strategy.trim().to_string(),
        strategy_params,
    })
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// POST the subscription.  Every failure collapses into [`AppError::Submission`];
/// the detail only goes to the log.
pub async fn submit(
    client: &reqwest::Client,
    config: &Config,
    request: &SubscriptionRequest,
) -> Result<(), AppError> {
    let url = config.subscribe_endpoint();

    info!(strategy = %request.strategy, url = %url, "Submitting subscription...");

    let resp = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, "Subscribe endpoint unreachable");
            AppError::Submission
        })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, body = %body, "Subscription rejected");
        return Err(AppError::Submission);
    }

    // Acknowledgement body is opaque; only logged.
    let ack: serde_json::Value = resp.json().await.unwrap_or_default();
    info!(response = %ack, "Subscription accepted ✅");

    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
