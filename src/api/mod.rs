//! HTTP surface: the mint action route, its metadata, and a health check.

pub mod handlers;
pub mod metadata;
pub mod response;

pub use metadata::ActionMetadata;
pub use response::ErrorBody;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE};
use http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS policy for browser-embedded callers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            ACCEPT,
            HeaderName::from_static("accept-version"),
            CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            DATE,
            HeaderName::from_static("x-api-version"),
        ])
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    let action_path = state.action_path.clone();

    Router::new()
        .route(
            &action_path,
            get(handlers::get_metadata).post(handlers::post_mint),
        )
        .route("/healthz", get(handlers::healthz))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
