use crate::observability::AppMetrics;
use crate::services::chatbot::ChatbotService;
use std::sync::Arc;

/// Application state shared by the request handlers
#[derive(Clone)]
pub struct AppState {
    /// Query resolution pipeline
    pub chatbot_service: Arc<dyn ChatbotService>,
    /// Request counters exposed on /metrics
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chatbot_service", &"Arc<dyn ChatbotService>")
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(chatbot_service: Box<dyn ChatbotService>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            chatbot_service: Arc::from(chatbot_service),
            metrics,
        }
    }
}
