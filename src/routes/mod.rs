//! # routes
//!
//! HTTP surface of the dashboard: an event-routing shim that maps page
//! events onto [`crate::commands`].
//!
//! | Method | Path                   | Handler                          |
//! |--------|------------------------|----------------------------------|
//! | GET    | `/`                    | dashboard page                   |
//! | GET    | `/health`              | liveness + counters              |
//! | GET    | `/api/view`            | current view model               |
//! | POST   | `/api/signal/load`     | load + render snapshot           |
//! | POST   | `/api/subscribe`       | subscribe form                   |
//! | POST   | `/api/strategy/select` | strategy selector / pre-fill     |
//! | POST   | `/api/connectivity`    | browser online / offline         |
//! | GET    | `/ws/view`             | view-model push stream           |

pub mod connectivity;
pub mod monitor;
pub mod signal;
pub mod subscribe;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{dashboard, state::SharedState};

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Page ──────────────────────────────────────────────────────────────
        .route("/",                     get(dashboard::index))
        .route("/health",               get(connectivity::health_check))
        // ── Primary view ──────────────────────────────────────────────────────
        .route("/api/view",             get(signal::get_view))
        .route("/api/signal/load",      post(signal::load_signal))
        // ── Secondary view ────────────────────────────────────────────────────
        .route("/api/subscribe",        post(subscribe::subscribe))
        .route("/api/strategy/select",  post(subscribe::select_strategy))
        // ── Platform signals ──────────────────────────────────────────────────
        .route("/api/connectivity",     post(connectivity::set_connectivity))
        .route("/ws/view",              get(monitor::ws_view))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::build_state;
    use crate::test_support::spawn_stub;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post_json(path: &str, body: Value) -> Request<Body> {
        Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app_without_backend() -> Router {
        build_router(build_state(Config::new("http://127.0.0.1:9").unwrap()))
    }

    #[tokio::test]
    async fn test_invalid_email_is_bad_request() {
        let resp = app_without_backend()
            .oneshot(post_json("/api/subscribe", json!({ "email": "not-an-email" })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Please enter a valid email address");
    }

    async fn view_status(app: &Router) -> Value {
        let resp = app
            .clone()
            .oneshot(Request::get("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();
        body_json(resp).await["view"]["subscribe"]["status"].clone()
    }

    #[tokio::test]
    async fn test_negative_ma_period_reported_inline() {
        let app = app_without_backend();
        let form = json!({
            "email": "a@b.co",
            "strategy": "custom",
            "custom": { "ma_period": -5, "sell_percent": 3.0, "buy_percent": 2.0 }
        });

        let resp = app.clone().oneshot(post_json("/api/subscribe", form)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "Invalid custom strategy: MA period must be at least 1"
        );

        let status = view_status(&app).await;
        assert_eq!(status["kind"], "error");
        assert_eq!(status["text"], "Invalid custom strategy: MA period must be at least 1");
    }

    #[tokio::test]
    async fn test_undecodable_form_reported_inline() {
        let app = app_without_backend();
        let form = json!({
            "email": "a@b.co",
            "strategy": "custom",
            "custom": { "ma_period": "fifty", "sell_percent": 3.0, "buy_percent": 2.0 }
        });

        let resp = app.clone().oneshot(post_json("/api/subscribe", form)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["ok"], false);

        let status = view_status(&app).await;
        assert_eq!(status["kind"], "error");
        assert_eq!(status["text"], "Please check the subscription form and try again");
    }

    #[tokio::test]
    async fn test_offline_then_view_shows_error() {
        let app = app_without_backend();

        let resp = app
            .clone()
            .oneshot(post_json("/api/connectivity", json!({ "online": false })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(Request::get("/api/view").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["view"]["panel"]["state"], "error");
        assert_eq!(body["view"]["online"], false);
    }

    #[tokio::test]
    async fn test_load_upstream_500_is_bad_gateway() {
        let upstream = Router::new().route(
            "/snapshot",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let config = Config::new(&spawn_stub(upstream).await).unwrap();
        let app = build_router(build_state(config));

        let resp = app
            .oneshot(Request::post("/api/signal/load").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let resp = app_without_backend()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
