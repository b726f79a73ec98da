//! Rutas HTTP del panel
//!
//! `create_app` arma el router completo: endpoints por vista, CORS y
//! trazas de requests.

pub mod analytics_routes;
pub mod captain_routes;
pub mod geocoding_routes;
pub mod listing_routes;
pub mod map_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/map", map_routes::create_map_router())
        .nest("/api/geocoding", geocoding_routes::create_geocoding_router())
        .nest("/api/orders", analytics_routes::create_orders_router())
        .nest("/api/dashboard", analytics_routes::create_dashboard_router())
        .nest("/api/listings", listing_routes::create_listing_router())
        .nest("/api/captains", captain_routes::create_captain_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "delivery-dashboard",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
