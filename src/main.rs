use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    let interface = config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", interface, config.port);

    let app_state = AppState::new(config);
    let routes = web::router::define_server_routes(app_state);

    info!("Periodic SSE server starting on http://{addr}");
    info!("Stream endpoints: /sse-server/stream-sse, /sse-server/stream-flux");

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
