//! # engine::renderer
//!
//! **Snapshot Renderer** — raw `/snapshot` payload → [`SignalView`].
//!
//! Pure: no I/O, no shared state.  The controller decides what to do with the
//! result (cache the snapshot, flip the panel to content or error).
//!
//! ## Moving-average order
//! ```text
//! MA5 · MA10 · MA25 · MA50 · MA100 · <extras by ascending period>
//! ```
//! `null` values are skipped, never shown as placeholders.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::models::{Badge, MaEntry, SignalView, Snapshot, StrategyParams, StrategyPanel};

/// Short-period keys, always rendered first and in this order.
pub const CANONICAL_MA_KEYS: [&str; 5] = ["ma5", "ma10", "ma25", "ma50", "ma100"];

const PLACEHOLDER: &str = "--";

/// Decoded snapshot plus its formatted view.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub snapshot: Snapshot,
    pub view:     SignalView,
}

// ─── Entry Points ─────────────────────────────────────────────────────────────

/// Decode and format a raw payload.  Any failure becomes
/// [`AppError::Presentation`].
pub fn render(payload: Value) -> Result<Rendered, AppError> {
    let snapshot: Snapshot = serde_json::from_value(payload)
        .map_err(|e| AppError::Presentation(e.to_string()))?;

    let view = render_snapshot(&snapshot)?;

    Ok(Rendered { snapshot, view })
}

pub fn render_snapshot(snapshot: &Snapshot) -> Result<SignalView, AppError> {
    let signal = &snapshot.signal;

    Ok(SignalView {
        timestamp:       format_timestamp(snapshot.timestamp.as_deref()),
        price:           format!("{:.2}", snapshot.price),
        action:          signal.action.clone(),
        badge:           Badge::classify(&signal.action),
        position:        signal.position.clone(),
        reason:          signal.reason.clone(),
        distance:        format!("{}%", signal.distance_from_ma),
        moving_averages: moving_average_entries(snapshot)?,
        strategy:        snapshot.strategy_params.as_ref().map(strategy_panel),
    })
}

// ─── Timestamp ────────────────────────────────────────────────────────────────

/// `"Jan 5, 2024, 02:30:45 PM UTC"`, the raw text when unparsable, or
/// `"Unknown"` when absent.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "Unknown".to_string();
    };

    match parse_timestamp(raw) {
        Some(at) => at.format("%b %-d, %Y, %I:%M:%S %p UTC").to_string(),
        None => {
            debug!(raw, "Unparsable snapshot timestamp, showing raw text");
            raw.to_string()
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    // No offset → read as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ─── Moving Averages ──────────────────────────────────────────────────────────

/// Period of a `ma<digits>` key.  Signs and leading zeros are rejected so the
/// label always reads `MA<N>`.
fn ma_period(key: &str) -> Option<u32> {
    let digits = key.strip_prefix("ma")?;
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !(digits.len() > 1 && digits.starts_with('0'));
    if !canonical {
        return None;
    }
    digits.parse().ok()
}

/// Canonical five first, then every other `ma<N>` key by ascending period.
pub fn ordered_ma_keys(snapshot: &Snapshot) -> Vec<String> {
    let mut extras: Vec<(u32, &String)> = snapshot
        .moving_averages
        .keys()
        .filter(|key| !CANONICAL_MA_KEYS.contains(&key.as_str()))
        .filter_map(|key| match ma_period(key) {
            Some(period) => Some((period, key)),
            None => {
                debug!(key = %key, "Ignoring moving-average key without numeric period");
                None
            }
        })
        .collect();
    extras.sort();

    CANONICAL_MA_KEYS
        .iter()
        .map(|k| (*k).to_string())
        .chain(extras.into_iter().map(|(_, key)| key.clone()))
        .collect()
}

fn moving_average_entries(snapshot: &Snapshot) -> Result<Vec<MaEntry>, AppError> {
    let mut entries = Vec::new();

    for key in ordered_ma_keys(snapshot) {
        let value = match snapshot.moving_averages.get(&key) {
            None | Some(Value::Null) => continue,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        let value = value.ok_or_else(|| {
            AppError::Presentation(format!("moving average '{key}' is not numeric"))
        })?;

        entries.push(MaEntry {
            label: format!("MA{}", &key[2..]),
            value: format!("${value:.2}"),
        });
    }

    Ok(entries)
}

// ─── Strategy Panel ───────────────────────────────────────────────────────────

fn strategy_panel(params: &StrategyParams) -> StrategyPanel {
    let name = params
        .strategy_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("Custom Strategy")
        .to_string();

    let ma_period = params
        .ma_period
        .filter(|p| *p != 0)
        .map_or_else(|| PLACEHOLDER.to_string(), |p| p.to_string());

    let sell_threshold = params
        .sell_threshold
        .filter(|t| *t != 0.0)
        .map_or_else(|| PLACEHOLDER.to_string(), |t| format!("{:.1}%", t * 100.0));

    let buy_threshold = params
        .buy_threshold
        .filter(|t| *t != 0.0)
        .map_or_else(|| PLACEHOLDER.to_string(), |t| format!("{:.1}%", (t - 1.0) * 100.0));

    StrategyPanel { name, ma_period, sell_threshold, buy_threshold }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(action: &str) -> Value {
        json!({
            "timestamp": "2024-01-05T14:30:45Z",
            "price": 43251.4567,
            "signal": {
                "action": action,
                "position": "ABOVE MA200",
                "reason": "Price crossed above threshold",
                "distance_from_ma": 2.5
            },
            "moving_averages": {
                "ma200": 41000.0,
                "ma50": 42500.5,
                "ma5": 43100.0,
                "ma10": null,
                "ma25": 42900.25,
                "ma100": 41800.0
            },
            "strategy_params": {
                "strategy_name": "MA200 Trend",
                "ma_period": 200,
                "sell_threshold": 0.95,
                "buy_threshold": 1.05
            }
        })
    }

    fn labels(view: &SignalView) -> Vec<&str> {
        view.moving_averages.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_full_payload() {
        let view = render(payload("BUY")).unwrap().view;

        assert_eq!(view.timestamp, "Jan 5, 2024, 02:30:45 PM UTC");
        assert_eq!(view.price, "43251.46");
        assert_eq!(view.action, "BUY");
        assert_eq!(view.badge, Some(Badge::Buy));
        assert_eq!(view.position, "ABOVE MA200");
        assert_eq!(view.distance, "2.5%");
    }

    #[test]
    fn test_badge_matches_lowercased_action() {
        for (action, badge) in [
            ("buy", Some(Badge::Buy)),
            ("SELL", Some(Badge::Sell)),
            ("Hold", Some(Badge::Hold)),
            ("accumulate", None),
        ] {
            let view = render(payload(action)).unwrap().view;
            assert_eq!(view.badge, badge, "action {action}");
            assert_eq!(view.action, action);
        }
    }

    #[test]
    fn test_ma_order_skips_null_and_puts_primary_last() {
        let view = render(payload("buy")).unwrap().view;
        assert_eq!(labels(&view), vec!["MA5", "MA25", "MA50", "MA100", "MA200"]);
        assert_eq!(view.moving_averages[0].value, "$43100.00");
        assert_eq!(view.moving_averages[4].value, "$41000.00");
    }

    #[test]
    fn test_multiple_extra_keys_sorted_by_period() {
        let mut p = payload("buy");
        p["moving_averages"] = json!({
            "ma365": 1.0, "ma200": 2.0, "ma5": 3.0, "ma_trend": "up", "ma150": null
        });
        let view = render(p).unwrap().view;
        assert_eq!(labels(&view), vec!["MA5", "MA200", "MA365"]);
    }

    #[test]
    fn test_extra_keys_need_plain_digit_suffix() {
        let mut p = payload("buy");
        p["moving_averages"] = json!({
            "ma5": 1.0, "ma+7": 2.0, "ma007": 3.0, "ma-3": 4.0, "ma": 5.0, "ma20": 6.0
        });
        let view = render(p).unwrap().view;
        assert_eq!(labels(&view), vec!["MA5", "MA20"]);
    }

    #[test]
    fn test_numeric_string_ma_accepted() {
        let mut p = payload("buy");
        p["moving_averages"] = json!({ "ma50": "123.456" });
        let view = render(p).unwrap().view;
        assert_eq!(view.moving_averages[0].value, "$123.46");
    }

    #[test]
    fn test_non_numeric_ma_is_presentation_error() {
        let mut p = payload("buy");
        p["moving_averages"] = json!({ "ma50": "n/a" });
        let err = render(p).unwrap_err();
        assert!(matches!(err, AppError::Presentation(_)));
        assert!(err.to_string().starts_with("Error displaying data:"));
    }

    #[test]
    fn test_missing_price_is_presentation_error() {
        let mut p = payload("buy");
        p.as_object_mut().unwrap().remove("price");
        let err = render(p).unwrap_err();
        assert!(err.to_string().starts_with("Error displaying data:"));
    }

    #[test]
    fn test_timestamp_fallbacks() {
        assert_eq!(format_timestamp(None), "Unknown");
        assert_eq!(format_timestamp(Some("")), "Unknown");
        assert_eq!(format_timestamp(Some("yesterday-ish")), "yesterday-ish");
        assert_eq!(
            format_timestamp(Some("2024-03-10T09:05:00.123")),
            "Mar 10, 2024, 09:05:00 AM UTC"
        );
        assert_eq!(
            format_timestamp(Some("2024-03-10T09:05:00+02:00")),
            "Mar 10, 2024, 07:05:00 AM UTC"
        );
    }

    #[test]
    fn test_strategy_panel() {
        let panel = render(payload("buy")).unwrap().view.strategy.unwrap();
        assert_eq!(panel.name, "MA200 Trend");
        assert_eq!(panel.ma_period, "200");
        assert_eq!(panel.sell_threshold, "95.0%");
        assert_eq!(panel.buy_threshold, "5.0%");
    }

    #[test]
    fn test_strategy_panel_defaults() {
        let mut p = payload("buy");
        p["strategy_params"] = json!({ "ma_period": 0 });
        let panel = render(p).unwrap().view.strategy.unwrap();
        assert_eq!(panel.name, "Custom Strategy");
        assert_eq!(panel.ma_period, "--");
        assert_eq!(panel.sell_threshold, "--");
        assert_eq!(panel.buy_threshold, "--");
    }

    #[test]
    fn test_strategy_panel_hidden_when_absent() {
        let mut p = payload("buy");
        p.as_object_mut().unwrap().remove("strategy_params");
        assert!(render(p).unwrap().view.strategy.is_none());
    }
}
