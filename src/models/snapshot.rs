//! # models::snapshot
//!
//! Defines [`Snapshot`], the signal payload served by `GET <base>/snapshot`.
//!
//! The backend owns this schema and we only consume it by field name, so the
//! structs are lenient: optional text fields default to empty and the
//! moving-average map keeps raw JSON values until the renderer looks at them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Signal ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// `buy` | `sell` | `hold` in any casing; unknown values are displayed as-is.
    pub action: String,

    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub reason: String,

    /// Distance of price from the primary MA, already in percent.
    pub distance_from_ma: f64,
}

// ─── StrategyParams ───────────────────────────────────────────────────────────

/// Strategy the snapshot was computed with.  Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    #[serde(default)]
    pub strategy_name:  Option<String>,
    #[serde(default)]
    pub ma_period:      Option<u32>,
    /// Fraction below 1, e.g. `0.95` = sell 5% under the MA
    #[serde(default)]
    pub sell_threshold: Option<f64>,
    /// Fraction above 1, e.g. `1.05` = buy 5% over the MA
    #[serde(default)]
    pub buy_threshold:  Option<f64>,
}

// ─── Snapshot ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Kept as text: a malformed timestamp must still be displayable.
    #[serde(default)]
    pub timestamp: Option<String>,

    pub price: f64,

    pub signal: Signal,

    /// `ma<N>` → number, numeric string or `null`.
    #[serde(default)]
    pub moving_averages: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub strategy_params: Option<StrategyParams>,
}
