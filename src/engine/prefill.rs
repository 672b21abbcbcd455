//! # engine::prefill
//!
//! Seeds the custom-strategy form from the last rendered snapshot's
//! `strategy_params`, converting threshold fractions back into percent.

use crate::models::{CustomFields, StrategyParams};

/// Period used when the snapshot does not carry one.
pub const DEFAULT_MA_PERIOD: u32 = 200;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `sell% = (1 - sell_threshold) * 100`, `buy% = (buy_threshold - 1) * 100`,
/// both rounded to one decimal.  Missing values fall back to the form defaults.
pub fn prefill_custom_fields(params: &StrategyParams) -> CustomFields {
    let defaults = CustomFields::default();

    CustomFields {
        ma_period:    i64::from(params.ma_period.filter(|p| *p != 0).unwrap_or(DEFAULT_MA_PERIOD)),
        sell_percent: params
            .sell_threshold
            .map_or(defaults.sell_percent, |t| round1((1.0 - t) * 100.0)),
        buy_percent:  params
            .buy_threshold
            .map_or(defaults.buy_percent, |t| round1((t - 1.0) * 100.0)),
    }
}
