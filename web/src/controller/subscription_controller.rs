use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use log::*;
use service::AppState;
use sse_client::LogObserver;

/// GET launch a typed SSE consumer against the typed stream endpoint.
/// Returns immediately; stream outcomes land in the logs.
#[utoipa::path(
    get,
    path = "/sse-consumer/launch-sse-client",
    responses(
        (status = 200, description = "Consumption launched in the background", body = String),
        (status = 500, description = "The stream client could not be created")
    )
)]
pub(crate) async fn launch_sse_client(State(app_state): State<AppState>) -> impl IntoResponse {
    let client = app_state.stream_client.clone();
    let launched = app_state
        .subscriptions
        .launch(move || client.subscribe_typed(LogObserver::new("sse")));

    match launched {
        Ok(id) => {
            debug!("Launched typed SSE subscription {}", id.as_str());
            (
                StatusCode::OK,
                "Launched event client from SSE! Check the logs...",
            )
        }
        Err(e) => {
            error!("Failed to launch typed SSE subscription: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to launch event client")
        }
    }
}

/// GET launch a plain payload consumer against the plain stream endpoint.
#[utoipa::path(
    get,
    path = "/sse-consumer/launch-flux-client",
    responses(
        (status = 200, description = "Consumption launched in the background", body = String),
        (status = 500, description = "The stream client could not be created")
    )
)]
pub(crate) async fn launch_flux_client(State(app_state): State<AppState>) -> impl IntoResponse {
    let client = app_state.stream_client.clone();
    let launched = app_state
        .subscriptions
        .launch(move || client.subscribe_plain(LogObserver::new("flux")));

    match launched {
        Ok(id) => {
            debug!("Launched plain subscription {}", id.as_str());
            (
                StatusCode::OK,
                "Launched event client from Flux! Check the logs...",
            )
        }
        Err(e) => {
            error!("Failed to launch plain subscription: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to launch event client")
        }
    }
}

/// GET launch a typed-framing consumer against the plain stream endpoint
/// (cross-flavor decode; id and event name come back empty).
#[utoipa::path(
    get,
    path = "/sse-consumer/launch-sse-from-flux-endpoint-client",
    responses(
        (status = 200, description = "Consumption launched in the background", body = String),
        (status = 500, description = "The stream client could not be created")
    )
)]
pub(crate) async fn launch_sse_from_flux_endpoint_client(
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    let client = app_state.stream_client.clone();
    let launched = app_state
        .subscriptions
        .launch(move || client.subscribe_typed_from_plain(LogObserver::new("sse-from-flux")));

    match launched {
        Ok(id) => {
            debug!("Launched cross-flavor subscription {}", id.as_str());
            (
                StatusCode::OK,
                "Launched event client from Flux Endpoint! Check the logs...",
            )
        }
        Err(e) => {
            error!("Failed to launch cross-flavor subscription: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to launch event client")
        }
    }
}
