// SPDX-License-Identifier: Apache-2.0

//! HTTP front of the glentrail catalog. Routes are a thin layer over the
//! store: parse with `glentrail-api`, call the store on the blocking pool,
//! shape the response with the shared DTO builders.

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

mod config;
mod http;
mod state;

pub use config::ServerConfig;
pub use state::AppState;

pub const CRATE_NAME: &str = "glentrail-server";

#[must_use]
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    Router::new()
        .route("/", get(http::meta::index_handler))
        .route("/healthz", get(http::meta::healthz_handler))
        .route("/readyz", get(http::meta::readyz_handler))
        .route("/v1/version", get(http::meta::version_handler))
        .route("/v1/openapi.json", get(http::meta::openapi_handler))
        .route(
            "/v1/walks",
            get(http::walks::list_walks_handler).post(http::walks::create_walk_handler),
        )
        .route("/v1/walks/count", get(http::walks::count_walks_handler))
        .route("/v1/walks/:walk", get(http::walks::walk_detail_handler))
        .route("/v1/walks/:walk/stages", get(http::walks::walk_stages_handler))
        .route("/v1/walks/:walk/reports", get(http::walks::walk_reports_handler))
        .route("/v1/walks/:walk/publish", post(http::walks::publish_walk_handler))
        .route("/v1/walks/:walk/view", post(http::walks::view_walk_handler))
        .route(
            "/v1/regions",
            get(http::regions::list_regions_handler).post(http::regions::create_region_handler),
        )
        .route("/v1/regions/:slug", get(http::regions::region_detail_handler))
        .route("/v1/regions/:slug/walks", get(http::regions::region_walks_handler))
        .route("/v1/reports", post(http::reports::create_report_handler))
        .route("/v1/reports/recent", get(http::reports::recent_reports_handler))
        .route(
            "/v1/reports/:report/publish",
            post(http::reports::publish_report_handler),
        )
        .route("/v1/completions", post(http::social::log_completion_handler))
        .route("/v1/likes", get(http::social::list_likes_handler))
        .route("/v1/likes/toggle", post(http::social::toggle_like_handler))
        .route("/v1/me", get(http::me::me_handler))
        .route("/v1/me/stats", get(http::me::me_stats_handler))
        .route("/v1/me/achievements", get(http::me::me_achievements_handler))
        .route("/v1/me/activity", get(http::me::me_activity_handler))
        .route("/v1/me/history", get(http::me::me_history_handler))
        .route(
            "/v1/me/likes/:target_type/:target_id",
            get(http::me::me_likes_target_handler),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Opens the store, binds the listener and serves until SIGTERM or SIGINT.
pub async fn run(config: ServerConfig) -> Result<(), String> {
    let store = glentrail_store::Store::open(&config.db_path)
        .map_err(|e| format!("open store at {}: {e}", config.db_path.display()))?;
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(store, config);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("glentrail-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
