//! # models::view
//!
//! The **view model**: a plain description of what the dashboard should show.
//!
//! Command handlers only ever mutate a [`ViewModel`]; the page script applies
//! it to the DOM.  That keeps every formatting and validation rule testable
//! without a browser.

use serde::Serialize;
use uuid::Uuid;

use crate::models::CustomFields;

// ─── Main Panel ───────────────────────────────────────────────────────────────

/// The three mutually exclusive states of the main panel (plus `Idle` before
/// the first load).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Idle,
    Loading,
    Content,
    Error { message: String },
}

/// CSS class of the signal badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Buy,
    Sell,
    Hold,
}

impl Badge {
    /// Case-insensitive match on `signal.action`.  Unknown actions get no badge.
    pub fn classify(action: &str) -> Option<Self> {
        match action.trim().to_lowercase().as_str() {
            "buy"  => Some(Badge::Buy),
            "sell" => Some(Badge::Sell),
            "hold" => Some(Badge::Hold),
            _      => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaEntry {
    /// `MA200`
    pub label: String,
    /// `$123.45`
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyPanel {
    pub name:           String,
    pub ma_period:      String,
    pub sell_threshold: String,
    pub buy_threshold:  String,
}

/// Fully formatted content of the signal card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalView {
    pub timestamp:       String,
    pub price:           String,
    pub action:          String,
    pub badge:           Option<Badge>,
    pub position:        String,
    pub reason:          String,
    pub distance:        String,
    pub moving_averages: Vec<MaEntry>,
    /// `None` hides the strategy panel.
    pub strategy:        Option<StrategyPanel>,
}

// ─── Subscribe Form ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Inline message under the subscribe button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    /// Auto-clear timers only remove the message carrying their own id.
    pub id:   Uuid,
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscribeView {
    pub strategy: String,
    /// Pre-filled custom fields, `Some` only while `custom` is selected.
    pub custom:   Option<CustomFields>,
    pub status:   Option<StatusMessage>,
}

// ─── ViewModel ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub panel:         PanelState,
    /// Present only while `panel` is `Content`.
    pub signal:        Option<SignalView>,
    pub user_id_input: String,
    pub subscribe:     SubscribeView,
    pub online:        bool,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            panel:         PanelState::Idle,
            signal:        None,
            user_id_input: String::new(),
            subscribe:     SubscribeView {
                strategy: crate::models::DEFAULT_STRATEGY.to_string(),
                custom:   None,
                status:   None,
            },
            online:        true,
        }
    }

    pub fn show_loading(&mut self) {
        self.panel = PanelState::Loading;
        self.signal = None;
    }

    pub fn show_content(&mut self, signal: SignalView) {
        self.panel = PanelState::Content;
        self.signal = Some(signal);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.panel = PanelState::Error { message: message.into() };
        self.signal = None;
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_classification() {
        assert_eq!(Badge::classify("BUY"), Some(Badge::Buy));
        assert_eq!(Badge::classify("Sell"), Some(Badge::Sell));
        assert_eq!(Badge::classify("hold"), Some(Badge::Hold));
        assert_eq!(Badge::classify("wait"), None);
        assert_eq!(Badge::classify(""), None);
    }

    #[test]
    fn test_error_hides_content() {
        let mut view = ViewModel::new();
        view.show_error("HTTP 500: Internal Server Error");
        assert!(view.signal.is_none());
        assert_eq!(
            view.panel,
            PanelState::Error { message: "HTTP 500: Internal Server Error".into() }
        );
    }

    #[test]
    fn test_panel_serializes_tagged() {
        let json = serde_json::to_value(PanelState::Error { message: "x".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "error", "message": "x" }));
    }
}
