use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use serde::Serialize;
use stroke_core::error::AppError;

use crate::models::{HealthMetricsInput, JsonFields};
use crate::services::{
    calculate_risk_score, classify, render, score_breakdown, RiskAssessment, RiskScore, RiskTier,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(rename = "riskScore")]
    pub risk_score: RiskScore,
}

pub struct FactorRow {
    pub label: &'static str,
    pub points: i64,
}

/// Result card inserted into the predict page by the client script.
#[derive(Template)]
#[template(path = "partials/result.html")]
pub struct ResultTemplate {
    pub assessment: RiskAssessment,
    pub gauge_width: u8,
    pub tier_label: &'static str,
    pub tier_class: &'static str,
    pub factors: Vec<FactorRow>,
    pub raw_total: i64,
}

/// Records the outcome. Health values themselves are not logged.
fn record_assessment(state: &AppState, score: RiskScore, tier: RiskTier) {
    state.metrics.record_assessment(tier);
    tracing::info!(
        risk_score = score.value(),
        tier = tier.label(),
        "Risk assessment computed"
    );
}

/// `POST /predict` (and `/api/predict`): JSON in, `{"riskScore": n}` out.
#[tracing::instrument(skip(state, fields))]
pub async fn predict(
    State(state): State<AppState>,
    fields: JsonFields,
) -> Result<Json<PredictResponse>, AppError> {
    let input = fields.into_input();
    let risk_score = calculate_risk_score(&input);
    record_assessment(&state, risk_score, classify(risk_score));

    Ok(Json(PredictResponse { risk_score }))
}

/// `POST /predict/result`: form-encoded metrics in, rendered result card out.
#[tracing::instrument(skip(state, payload))]
pub async fn predict_result(
    State(state): State<AppState>,
    payload: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<ResultTemplate, AppError> {
    let Form(pairs) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected result form body");
        AppError::from(rejection)
    })?;
    let input = HealthMetricsInput::from_form_pairs(pairs);

    let breakdown = score_breakdown(&input);
    let assessment = render(breakdown.score(), &input, chrono::Local::now().date_naive());
    record_assessment(&state, assessment.score, assessment.tier);

    let factors = breakdown
        .contributions
        .iter()
        .map(|c| FactorRow {
            label: c.factor.label(),
            points: c.points,
        })
        .collect();

    Ok(ResultTemplate {
        gauge_width: assessment.score.value(),
        tier_label: assessment.tier.label(),
        tier_class: assessment.tier.css_class(),
        raw_total: breakdown.total(),
        assessment,
        factors,
    })
}
