//! Router construction and server lifecycle.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use stroke_core::error::AppError;
use stroke_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;

use crate::config::Settings;
use crate::handlers::{
    app::{about_page, health_check, index, predict_page},
    metrics::metrics,
    predict::{predict, predict_result},
};
use crate::middleware::metrics::metrics_middleware;
use crate::services::AppMetrics;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.settings.assets.static_dir.clone();

    Router::new()
        .route("/", get(index))
        .route("/about", get(about_page))
        .route("/predict", get(predict_page).post(predict))
        .route("/api/predict", post(predict))
        .route("/predict/result", post(predict_result))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn_with_state(state.clone(), metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(http_trace_layer())
        // Outermost, so the trace span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Owns the bound listener and the router until `run_until_stopped`.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let metrics = AppMetrics::new()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to register metrics: {}", e)))?;

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(settings, metrics));

        tracing::info!("stroke-web listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
