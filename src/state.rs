//! # state
//!
//! The dashboard's **session state**, owned by the top-level controller and
//! handed to every command handler explicitly.
//!
//! * `view`: what the page should currently display.
//! * `last_snapshot`: last successfully rendered snapshot.  Written by
//!   `load_signal`, read by the custom-strategy pre-fill.  Last write wins;
//!   nothing is persisted across restarts.
//!
//! Every view change is broadcast to connected pages as a `VIEW_UPDATED` event.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::config::Config;
use crate::events::WsEvent;
use crate::models::{Snapshot, StrategyParams, ViewModel};

// ─── AppState ─────────────────────────────────────────────────────────────────

pub struct AppState {
    pub config: Arc<Config>,

    /// Shared reqwest client (connection pooling), built once.
    pub http_client: reqwest::Client,

    pub view: RwLock<ViewModel>,

    /// `None` until the first snapshot renders successfully.
    pub last_snapshot: RwLock<Option<Snapshot>>,

    /// Pre-serialized [`WsEvent`] JSON for `/ws/view` subscribers.
    pub broadcast_tx: broadcast::Sender<String>,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub load_count:      AtomicU64,
    pub subscribe_count: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (broadcast_tx, _) = broadcast::channel(64);

        Self {
            config:          Arc::new(config),
            http_client:     reqwest::Client::new(),
            view:            RwLock::new(ViewModel::new()),
            last_snapshot:   RwLock::new(None),
            broadcast_tx,
            load_count:      AtomicU64::new(0),
            subscribe_count: AtomicU64::new(0),
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    /// Never fails: no listener just means no page is open.
    pub fn broadcast(&self, event: &WsEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }

    /// Apply `change` to the view model, then push the new view to every page.
    pub async fn update_view<R>(&self, change: impl FnOnce(&mut ViewModel) -> R) -> R {
        let (result, view) = {
            let mut guard = self.view.write().await;
            let result = change(&mut *guard);
            (result, guard.clone())
        };

        self.broadcast(&WsEvent::ViewUpdated { view: Box::new(view) });
        result
    }

    /// Copy of the current view (releases the lock immediately).
    pub async fn current_view(&self) -> ViewModel {
        self.view.read().await.clone()
    }

    pub async fn cache_snapshot(&self, snapshot: Snapshot) {
        let mut guard = self.last_snapshot.write().await;
        *guard = Some(snapshot);
    }

    /// `strategy_params` of the cached snapshot, if both exist.
    pub async fn cached_strategy_params(&self) -> Option<StrategyParams> {
        let guard = self.last_snapshot.read().await;
        guard.as_ref().and_then(|s| s.strategy_params.clone())
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> SharedState {
    Arc::new(AppState::new(config))
}
