use crate::middleware::require_identity;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

mod health;
mod images;
mod info;

/// Headroom on top of the base64-expanded upload for the JSON envelope
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Request body limit for an upload of at most `max_bytes` raw bytes
fn body_limit(max_bytes: usize) -> usize {
    // base64 grows content by 4/3
    max_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

pub fn router(state: AppState) -> Router {
    let body_limit = body_limit(state.config.uploads.max_bytes);

    let protected = Router::new()
        .route("/info", get(info::get_info))
        .route(
            "/api/images",
            get(images::list_images).post(images::create_image),
        )
        .route(
            "/api/images/{id}",
            get(images::get_image)
                .put(images::update_image)
                .delete(images::delete_image),
        )
        .route_layer(axum_middleware::from_fn(require_identity));

    let public = Router::new().route("/health", get(health::health_check));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
