//! # events
//!
//! Defines [`WsEvent`], everything the service pushes to dashboard pages
//! over `/ws/view`.
//!
//! Events go through a `tokio::sync::broadcast::Sender<String>` as
//! pre-serialized JSON so the channel does not need `ViewModel: Clone` per
//! subscriber.

use serde::Serialize;

use crate::models::ViewModel;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// Full view model after any change.  The page re-applies it wholesale.
    ViewUpdated {
        view: Box<ViewModel>,
    },

    /// Browser reported going offline / coming back.
    ConnectivityChanged {
        online: bool,
    },
}

impl WsEvent {
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
