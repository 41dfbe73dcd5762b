#![allow(dead_code)]

use axum::Router;
use stroke_core::config::ServerSettings;
use stroke_web::config::Settings;
use stroke_web::services::AppMetrics;
use stroke_web::startup::{build_router, Application};
use stroke_web::AppState;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Use random port for testing (port 0)
        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            ..Default::default()
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}

/// Router over default settings, for `oneshot` tests.
pub fn test_router() -> Router {
    let metrics = AppMetrics::new().expect("metrics registry");
    build_router(AppState::new(Settings::default(), metrics))
}
