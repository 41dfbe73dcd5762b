//! Additive point-scale stroke risk heuristic.
//!
//! Each factor contributes points from its own threshold rules; within a
//! factor the first matching rule wins. The sum is clamped to `0..=100`.

use crate::models::{HealthMetricsInput, SmokingStatus};
use serde::Serialize;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Risk score in the closed range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Clamps `raw` into range.
    pub fn new(raw: i64) -> Self {
        // Clamped to 0..=100 above, so the narrowing cannot truncate.
        Self(raw.clamp(MIN_SCORE, MAX_SCORE) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    Age,
    Hypertension,
    HeartDisease,
    Glucose,
    Bmi,
    Smoking,
}

impl RiskFactor {
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::Age => "Age",
            RiskFactor::Hypertension => "Hypertension",
            RiskFactor::HeartDisease => "Heart disease",
            RiskFactor::Glucose => "Average glucose",
            RiskFactor::Bmi => "BMI",
            RiskFactor::Smoking => "Smoking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorContribution {
    pub factor: RiskFactor,
    pub points: i64,
}

/// Points per factor before clamping, in scoring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<FactorContribution>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    pub fn score(&self) -> RiskScore {
        RiskScore::new(self.total())
    }

    pub fn points_for(&self, factor: RiskFactor) -> i64 {
        self.contributions
            .iter()
            .filter(|c| c.factor == factor)
            .map(|c| c.points)
            .sum()
    }
}

pub fn calculate_risk_score(input: &HealthMetricsInput) -> RiskScore {
    score_breakdown(input).score()
}

pub fn score_breakdown(input: &HealthMetricsInput) -> ScoreBreakdown {
    let contributions = vec![
        FactorContribution {
            factor: RiskFactor::Age,
            points: age_points(input.age()),
        },
        FactorContribution {
            factor: RiskFactor::Hypertension,
            points: if input.has_hypertension() { 20 } else { 0 },
        },
        FactorContribution {
            factor: RiskFactor::HeartDisease,
            points: if input.has_heart_disease() { 25 } else { 0 },
        },
        FactorContribution {
            factor: RiskFactor::Glucose,
            points: glucose_points(input.avg_glucose_level()),
        },
        FactorContribution {
            factor: RiskFactor::Bmi,
            points: bmi_points(input.bmi()),
        },
        FactorContribution {
            factor: RiskFactor::Smoking,
            points: smoking_points(input.smoking_status()),
        },
    ];

    ScoreBreakdown { contributions }
}

fn age_points(age: Option<i64>) -> i64 {
    match age {
        Some(a) if a > 60 => 30,
        Some(a) if a > 40 => 15,
        _ => 0,
    }
}

fn glucose_points(level: Option<i64>) -> i64 {
    match level {
        Some(l) if l > 200 => 20,
        Some(l) if l > 140 => 10,
        _ => 0,
    }
}

fn bmi_points(bmi: Option<i64>) -> i64 {
    match bmi {
        Some(b) if b > 30 => 15,
        Some(b) if b > 25 => 5,
        _ => 0,
    }
}

fn smoking_points(status: SmokingStatus) -> i64 {
    match status {
        SmokingStatus::Smokes => 20,
        SmokingStatus::FormerlySmoked => 10,
        SmokingStatus::Other => 0,
    }
}
