use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::predicate::{NotForContentType, Predicate};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with all bview endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/", get(handler::bucket_list_handler))
        .route("/bucket/:name", get(handler::bucket_content_handler))
        .route("/rest", post(handler::rest_post_handler))
        .route("/rest/:bucket", delete(handler::rest_delete_handler))
        .route("/rest/:bucket/:action", get(handler::rest_get_handler))
        .route("/health", get(handler::health_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http());

    if config.compression {
        // No size floor: small records and error bodies are gzipped too.
        let predicate = NotForContentType::GRPC
            .and(NotForContentType::IMAGES)
            .and(NotForContentType::SSE);
        router.layer(CompressionLayer::new().compress_when(predicate))
    } else {
        router
    }
}
