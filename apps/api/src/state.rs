use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::DashboardManager;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator boundary. Production: GeminiClient. Tests: stubs.
    pub generator: Arc<dyn TextGenerator>,
    /// Deployment settings; generator auth is consumed at startup.
    #[allow(dead_code)]
    pub config: Config,
    pub dashboard: DashboardManager,
}
