use crate::controller::{health_check_controller, stream_controller, subscription_controller};
use crate::AppState;
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Periodic SSE API"
        ),
        paths(
            stream_controller::stream_sse,
            stream_controller::stream_flux,
            subscription_controller::launch_sse_client,
            subscription_controller::launch_flux_client,
            subscription_controller::launch_sse_from_flux_endpoint_client,
            health_check_controller::health_check,
        ),
        tags(
            (name = "periodic_sse", description = "Periodic SSE producer/consumer API")
        )
    )]
struct ApiDoc;

/// Routes served by the producing binary.
pub fn define_server_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(stream_routes(app_state.clone()))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors_layer(&app_state))
}

/// Routes served by the consuming (trigger) binary.
pub fn define_consumer_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(subscription_routes(app_state.clone()))
        .merge(health_routes())
        .layer(cors_layer(&app_state))
}

/// Routes for the producing stream endpoints. Every connection binds a fresh
/// event source; no stream state is shared between clients.
fn stream_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/sse-server/stream-sse",
            get(stream_controller::stream_sse),
        )
        .route(
            "/sse-server/stream-flux",
            get(stream_controller::stream_flux),
        )
        .with_state(app_state)
}

/// Routes that launch background stream consumption and return immediately.
fn subscription_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/sse-consumer/launch-sse-client",
            get(subscription_controller::launch_sse_client),
        )
        .route(
            "/sse-consumer/launch-flux-client",
            get(subscription_controller::launch_flux_client),
        )
        .route(
            "/sse-consumer/launch-sse-from-flux-endpoint-client",
            get(subscription_controller::launch_sse_from_flux_endpoint_client),
        )
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn cors_layer(app_state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}
