use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Room for base64 expansion and the JSON envelope around the image
fn body_limit(max_image_bytes: usize) -> usize {
    (max_image_bytes / 3)
        .saturating_mul(4)
        .saturating_add(64 * 1024)
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let limit = body_limit(state.max_image_bytes);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            // Outermost first: the request id must exist before the trace span is made
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(limit)),
        )
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/products", get(handlers::list_products))
        .route("/products/:id", get(handlers::get_product))
        // Analyses
        .route("/analyze", post(handlers::analyze))
        .route("/analysis/:id", get(handlers::get_analysis))
        .route("/analysis/:id/recommendations", get(handlers::get_recommendations))
}
