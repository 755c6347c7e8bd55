//! Route registration — module routes plus system endpoints.

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use releasehub_core::Module;
use tracing::info;

/// Build the complete router from all modules.
pub fn build_router(modules: &[Box<dyn Module>]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for module in modules {
        info!("Mounting {} module routes", module.name());
        app = app.merge(module.routes());
    }
    app
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "releasehubd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
