pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use config::Settings;
use services::AppMetrics;
use std::sync::Arc;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    pub fn new(settings: Settings, metrics: AppMetrics) -> Self {
        Self {
            settings: Arc::new(settings),
            metrics: Arc::new(metrics),
        }
    }
}
