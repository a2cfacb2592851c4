use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::pricing::{PaymentProcessor, SimulatedProcessor};
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    /// Pluggable payment backend. Default: SimulatedProcessor with the configured delay.
    pub payment_processor: Arc<dyn PaymentProcessor>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let delay = Duration::from_millis(config.payment_delay_ms);
        Self {
            sessions: SessionRegistry::new(),
            payment_processor: Arc::new(SimulatedProcessor::new(delay)),
            config,
        }
    }
}
