pub mod assessment;
pub mod metrics;
pub mod risk;

pub use assessment::{classify, render, FormattedFields, RiskAssessment, RiskTier};
pub use metrics::AppMetrics;
pub use risk::{calculate_risk_score, score_breakdown, RiskScore, ScoreBreakdown};
