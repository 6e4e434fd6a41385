use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use sse_client::Runner;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    let interface = config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", interface, config.consumer_port);

    let app_state = AppState::new(config);
    let subscriptions = app_state.subscriptions.clone();
    let routes = web::router::define_consumer_routes(app_state);

    info!("SSE consumer server starting on http://{addr}");
    info!(
        "Trigger endpoints: /sse-consumer/launch-sse-client, \
         /sse-consumer/launch-flux-client, \
         /sse-consumer/launch-sse-from-flux-endpoint-client"
    );

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, routes).with_graceful_shutdown(shutdown_signal(subscriptions));

    if let Err(e) = server.await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Waits for ctrl-c, then cancels every launched subscription so no consuming
/// task outlives the process's interest in it.
async fn shutdown_signal(subscriptions: Arc<Runner>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }

    info!(
        "Shutting down, cancelling {} active subscription(s)",
        subscriptions.active_count()
    );
    subscriptions.cancel_all();
}
