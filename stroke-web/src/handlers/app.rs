use askama::Template;
use axum::{response::IntoResponse, Json};
use serde_json::json;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_page: &'static str,
}

#[derive(Template)]
#[template(path = "pages/predict.html")]
pub struct PredictTemplate {
    pub current_page: &'static str,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub current_page: &'static str,
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        current_page: "home",
    }
}

pub async fn predict_page() -> impl IntoResponse {
    PredictTemplate {
        current_page: "predict",
    }
}

pub async fn about_page() -> impl IntoResponse {
    AboutTemplate {
        current_page: "about",
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "stroke-web",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
