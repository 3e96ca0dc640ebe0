// src/routes.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{api, web};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let enable_hsts = state.config.enable_hsts;
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // ==================
        // API ROUTES
        // ==================
        .route("/api/links", get(api::list_links))
        .route("/api/health", get(api::health_check))
        // ==================
        // WEB UI ROUTES
        // ==================
        .route("/", get(web::root))
        .route("/:locale", get(web::locale_home))
        .route("/:locale/*path", get(web::locale_page))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(web::fallback)
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            enable_hsts,
            crate::middleware::security::security_headers,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
