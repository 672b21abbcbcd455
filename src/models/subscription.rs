//! # models::subscription
//!
//! Form input coming from the dashboard and the request body we POST to
//! `<base>/subscribe`.

use serde::{Deserialize, Serialize};

/// Strategy selector value that unlocks the custom-parameter fields.
pub const CUSTOM_STRATEGY: &str = "custom";

/// Preset used when the form does not name one.
pub const DEFAULT_STRATEGY: &str = "default";

// ─── Form Input ───────────────────────────────────────────────────────────────

/// The custom-strategy fields, expressed the way the user types them (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    /// Signed so a negative period typed into the page reaches validation.
    pub ma_period:    i64,
    /// `5.0` = sell when price is 5% under the MA
    pub sell_percent: f64,
    /// `5.0` = buy when price is 5% over the MA
    pub buy_percent:  f64,
}

impl Default for CustomFields {
    fn default() -> Self {
        Self { ma_period: 200, sell_percent: 5.0, buy_percent: 5.0 }
    }
}

/// Everything the subscribe form submits.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email:    String,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub custom:   Option<CustomFields>,
}

fn default_strategy() -> String {
    DEFAULT_STRATEGY.to_string()
}

impl SubscribeForm {
    pub fn is_custom(&self) -> bool {
        self.strategy.trim() == CUSTOM_STRATEGY
    }
}

// ─── Request Body ─────────────────────────────────────────────────────────────

/// `strategy_params` of the request.  Serializes to `{}` for preset strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomStrategyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_period:      Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_threshold:  Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_field:     Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionRequest {
    pub email:           String,
    pub strategy:        String,
    pub strategy_params: CustomStrategyParams,
}
