use pahescope_core::{Config, ResolutionOrchestrator};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: ResolutionOrchestrator,
}

impl AppState {
    pub fn new(config: Config, orchestrator: ResolutionOrchestrator) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &ResolutionOrchestrator {
        &self.orchestrator
    }
}
