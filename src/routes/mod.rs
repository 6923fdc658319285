//! Rutas HTTP
//!
//! Un router por recurso; `create_router` los monta bajo `/api` detrás del
//! middleware de sesión. `/login`, `/logout` y `/health` quedan públicos.

pub mod auth_routes;
pub mod client_routes;
pub mod expense_routes;
pub mod sale_routes;
pub mod seller_routes;
pub mod stats_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, require_session};
use crate::state::AppState;

/// Rutas protegidas, sin el middleware de sesión
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/estadisticas", stats_routes::create_stats_router())
        .nest("/vehiculos", vehicle_routes::create_vehicle_router())
        .nest("/clientes", client_routes::create_client_router())
        .nest("/ventas", sale_routes::create_sale_router())
        .nest(
            "/gastos-corrientes",
            expense_routes::create_current_expense_router(),
        )
        .nest(
            "/gastos-vehiculos",
            expense_routes::create_vehicle_expense_router(),
        )
        .nest("/vendedores", seller_routes::create_seller_router())
}

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = api_router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_session,
    ));

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes::create_auth_router())
        .nest("/api", protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_layer(&state.config)),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "dealership_backoffice",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
