//! # commands
//!
//! **Command handlers**: one async function per user action.  Each takes the
//! session state explicitly, updates the view model and returns a plain
//! `Result`.  The HTTP routes are only an event-routing shim on top.
//!
//! ```text
//! [Load] / Enter ───────▶ load_signal ──▶ loader ──▶ renderer ──▶ view + cache
//! [Subscribe] / Enter ──▶ subscribe ───▶ composer ──▶ identity ──▶ load_signal
//! strategy selector ────▶ select_strategy ──▶ prefill (reads cache)
//! online/offline ───────▶ set_connectivity
//! ```

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    engine::{
        composer::{build_request, submit},
        identity::derive_user_id,
        loader::fetch_snapshot,
        prefill::prefill_custom_fields,
        renderer::{render, Rendered},
    },
    error::{AppError, ValidationError, OFFLINE_MESSAGE},
    events::WsEvent,
    models::{
        CustomFields, SignalView, StatusKind, StatusMessage, SubscribeForm, CUSTOM_STRATEGY,
    },
    state::SharedState,
};

// ─── Load ─────────────────────────────────────────────────────────────────────

/// Loading → (content | error).  On success the snapshot replaces the
/// session cache.  A second call does not cancel the first: whichever
/// response settles last owns the panel.
pub async fn load_signal(state: &SharedState, user_id: &str) -> Result<SignalView, AppError> {
    let user_id = user_id.trim().to_string();
    let request_id = Uuid::new_v4();
    state.load_count.fetch_add(1, Ordering::Relaxed);

    state
        .update_view(|view| {
            view.user_id_input = user_id.clone();
            view.show_loading();
        })
        .await;

    info!(%request_id, user_id = %user_id, "📡 [LOAD] Fetching snapshot");

    let result = match fetch_snapshot(&state.http_client, &state.config, &user_id).await {
        Ok(payload) => render(payload),
        Err(e) => Err(e),
    };

    match result {
        Ok(Rendered { snapshot, view: signal }) => {
            state.cache_snapshot(snapshot).await;
            state.update_view(|view| view.show_content(signal.clone())).await;

            info!(%request_id, action = %signal.action, price = %signal.price, "✅ [LOAD] Snapshot rendered");
            Ok(signal)
        }
        Err(e) => {
            error!(%request_id, error = %e, "❌ [LOAD] Snapshot failed");
            state.update_view(|view| view.show_error(e.to_string())).await;
            Err(e)
        }
    }
}

// ─── Subscribe ────────────────────────────────────────────────────────────────

/// Validate → POST → derive id → reload with that id.
///
/// Returns the derived user id.  A failed reload after a successful
/// subscription still returns `Ok`: the error is already on the main panel.
pub async fn subscribe(state: &SharedState, form: SubscribeForm) -> Result<String, AppError> {
    // view mirrors the submitted form
    let strategy = form.strategy.trim().to_string();
    let is_custom = form.is_custom();
    let submitted = form.custom;
    state
        .update_view(|view| {
            view.subscribe.custom = if is_custom {
                submitted
                    .or(view.subscribe.custom)
                    .or_else(|| Some(CustomFields::default()))
            } else {
                None
            };
            view.subscribe.strategy = strategy;
        })
        .await;

    let request = match build_request(&form, &state.config.data_field) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "📝 [SUBSCRIBE] Form rejected locally");
            post_status(state, StatusKind::Error, e.to_string()).await;
            return Err(e.into());
        }
    };

    state.subscribe_count.fetch_add(1, Ordering::Relaxed);

    if let Err(e) = submit(&state.http_client, &state.config, &request).await {
        post_status(state, StatusKind::Error, e.to_string()).await;
        return Err(e);
    }

    let user_id = derive_user_id(&request.email);
    info!(user_id = %user_id, strategy = %request.strategy, "📝 [SUBSCRIBE] Subscribed");

    post_status(
        state,
        StatusKind::Success,
        format!("Subscribed! Your user ID is {user_id}"),
    )
    .await;

    if let Err(e) = load_signal(state, &user_id).await {
        warn!(user_id = %user_id, error = %e, "Personalised reload failed after subscribe");
    }

    Ok(user_id)
}

/// The subscribe body did not decode as a form (wrong types, out-of-range
/// numbers).  Reported inline like any other validation failure.
pub async fn reject_form(state: &SharedState, detail: &str) -> AppError {
    warn!(detail, "📝 [SUBSCRIBE] Unreadable form body");
    let err = ValidationError::MalformedForm;
    post_status(state, StatusKind::Error, err.to_string()).await;
    err.into()
}

// ─── Status Message ───────────────────────────────────────────────────────────

/// Show an inline status message and schedule its removal after
/// `config.status_clear_after`.  The timer only removes this exact message,
/// so a newer message is never blanked early.
pub async fn post_status(state: &SharedState, kind: StatusKind, text: String) -> Uuid {
    let id = Uuid::new_v4();

    state
        .update_view(|view| view.subscribe.status = Some(StatusMessage { id, kind, text }))
        .await;

    let delay = state.config.status_clear_after;
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        clear_status(&state, id).await;
    });

    id
}

/// Remove the status message if it is still `id`.  Returns whether it did.
pub async fn clear_status(state: &SharedState, id: Uuid) -> bool {
    let cleared = {
        let mut view = state.view.write().await;
        let current = view.subscribe.status.as_ref().map(|s| s.id);
        if current == Some(id) {
            view.subscribe.status = None;
            Some(view.clone())
        } else {
            None
        }
    };

    match cleared {
        Some(view) => {
            state.broadcast(&WsEvent::ViewUpdated { view: Box::new(view) });
            true
        }
        None => false,
    }
}

// ─── Strategy Selector ────────────────────────────────────────────────────────

/// Record the selected strategy.  Picking `custom` pre-fills the custom fields
/// from the cached snapshot's `strategy_params` (returned when used); without
/// a cached snapshot the fields keep their current values.
pub async fn select_strategy(state: &SharedState, strategy: &str) -> Option<CustomFields> {
    let strategy = strategy.trim().to_string();
    let is_custom = strategy == CUSTOM_STRATEGY;

    let prefill = if is_custom {
        state.cached_strategy_params().await.map(|p| prefill_custom_fields(&p))
    } else {
        None
    };

    state
        .update_view(|view| {
            view.subscribe.custom = if is_custom {
                prefill
                    .or(view.subscribe.custom)
                    .or_else(|| Some(CustomFields::default()))
            } else {
                None
            };
            view.subscribe.strategy = strategy;
        })
        .await;

    prefill
}

// ─── Connectivity ─────────────────────────────────────────────────────────────

/// Offline forces the error panel immediately; coming back online only
/// records the flag.
pub async fn set_connectivity(state: &SharedState, online: bool) {
    if online {
        info!("🌐 Back online");
        state.update_view(|view| view.online = true).await;
    } else {
        warn!("🌐 Gone offline");
        state
            .update_view(|view| {
                view.online = false;
                view.show_error(OFFLINE_MESSAGE);
            })
            .await;
    }

    state.broadcast(&WsEvent::ConnectivityChanged { online });
}

// ─── Tests ────────────────────────────────────────────────────────────────────
