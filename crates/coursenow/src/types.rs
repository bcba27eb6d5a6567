use std::sync::Arc;

use crate::config::ServerConfig;
use crate::schedule::{Clock, SystemClock};

/// State shared by every request handler.
pub struct ServerState {
    /// The loaded server configuration
    pub config: ServerConfig,
    /// Where the current moment of each request comes from
    pub clock: Arc<dyn Clock>,
}

impl ServerState {
    /// Creates state that reads the system clock.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }
}
