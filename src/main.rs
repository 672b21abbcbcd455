//! # LazySignal — Signal Dashboard Service
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  POST /api/signal/load      ┌────────────────────────┐  GET  /snapshot
//!  │  Dashboard   │ ──────────────────────────▶ │  commands              │ ───────────────▶ ┌───────────┐
//!  │  page (JS)   │  POST /api/subscribe        │   ├─ loader            │  POST /subscribe │  Signal   │
//!  │              │ ──────────────────────────▶ │   ├─ renderer          │ ───────────────▶ │  backend  │
//!  │              │  POST /api/strategy/select  │   ├─ composer          │                  └───────────┘
//!  │              │  POST /api/connectivity     │   └─ prefill           │
//!  │              │ ◀────────────────────────── │  AppState              │
//!  └──────────────┘  ws://host/ws/view          │   ├─ view (ViewModel)  │
//!                    VIEW_UPDATED frames        │   └─ last_snapshot     │
//!                                               └────────────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable               | Default                 | Description                          |
//! |------------------------|-------------------------|--------------------------------------|
//! | `API_BASE_URL`         | LazySignal prod         | Base URL of `/snapshot`, `/subscribe`|
//! | `BIND_ADDR`            | `0.0.0.0:3000`          | Address axum listens on              |
//! | `STATUS_CLEAR_SECS`    | `5`                     | Subscribe status auto-clear delay    |
//! | `SUBSCRIBE_DATA_FIELD` | `close`                 | `data_field` of custom strategies    |
//! | `RUST_LOG`             | `lazysignal=debug`      | Tracing filter                       |

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod dashboard;
mod engine;
mod error;
mod events;
mod models;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use config::Config;
use routes::build_router;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("lazysignal=debug".parse()?)
                .add_directive("tower_http=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        LAZYSIGNAL — Signal Dashboard          ║
  ║   Snapshot · Render · Subscribe · Push        ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let addr = config.bind_addr;

    info!(
        backend      = %config.api_base_url,
        status_clear = ?config.status_clear_after,
        "Config loaded"
    );

    let state = build_state(config);

    // ── 4. Page bootstrap: load the default signal once ───────────────────────
    {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = commands::load_signal(&state, "").await {
                warn!(error = %e, "Initial snapshot load failed, waiting for manual retry");
            }
        });
    }

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = build_router(state);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 LazySignal dashboard starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
