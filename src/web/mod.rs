// Web server: Axum backend for the dashboard and Farcaster frames.
//
// The /api/farcaster/* routes proxy the provider so the browser never
// holds the Neynar key. /api/engagement returns a full report and
// /api/frame/engagement serves the frame metadata page for shared scores.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::neynar::provider::PostFeedProvider;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn PostFeedProvider>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    provider: Arc<dyn PostFeedProvider>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        provider,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Activity Tracker listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let farcaster_api = Router::new()
        .route("/api/farcaster/user", get(handlers::farcaster::get_user))
        .route("/api/farcaster/casts", get(handlers::farcaster::get_casts))
        .route(
            "/api/farcaster/search",
            get(handlers::farcaster::search_users),
        );

    let engagement_api = Router::new()
        .route(
            "/api/engagement",
            get(handlers::engagement::get_engagement),
        )
        .route(
            "/api/frame/engagement",
            get(handlers::frame::engagement_frame),
        );

    Router::new()
        .route("/health", get(health))
        .merge(farcaster_api)
        .merge(engagement_api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Always 200.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
