use config::Config;
use sse_client::{Runner, StreamClient};
use std::sync::Arc;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-wide connection factory for the producing endpoints,
    /// constructed once at startup and shared by every launch.
    pub stream_client: Arc<StreamClient>,
    /// Owner of every fired-and-forgotten subscription handle.
    pub subscriptions: Arc<Runner>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let stream_client = Arc::new(StreamClient::new(config.sse_base_url()));

        Self {
            config,
            stream_client,
            subscriptions: Arc::new(Runner::new()),
        }
    }
}
