use config::Config;
use offload::Computation;
use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    computation: Arc<dyn Computation>,
}

impl AppState {
    pub fn new(app_config: Config, computation: Arc<dyn Computation>) -> Self {
        Self {
            config: app_config,
            computation,
        }
    }

    /// A shared handle suitable for moving onto a worker thread.
    pub fn computation(&self) -> Arc<dyn Computation> {
        Arc::clone(&self.computation)
    }

    pub fn computation_ref(&self) -> &dyn Computation {
        self.computation.as_ref()
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.config.worker_timeout()
    }
}
