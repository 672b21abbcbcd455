//! # routes::monitor
//!
//! `GET /ws/view`: WebSocket stream of view-model updates.
//!
//! The current view is sent right after the upgrade, then every
//! [`WsEvent`](crate::events::WsEvent) broadcast by the command handlers is
//! forwarded as a JSON text frame.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::{events::WsEvent, state::SharedState};

pub async fn ws_view(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let mut rx = state.broadcast_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 Dashboard page connected");

    let initial = WsEvent::ViewUpdated {
        view: Box::new(state.current_view().await),
    }
    .to_json();

    if sender.send(Message::Text(initial)).await.is_err() {
        return; // page closed before the first frame
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        // every event carries the full view, so the next one catches up
                        debug!("WS page lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    _ => {} // commands come in over HTTP, not the socket
                }
            }
        }
    }

    info!("🔌 Dashboard page disconnected");
}
