//! Maps a risk score and the submitted metrics onto display values.

use crate::models::HealthMetricsInput;
use crate::services::risk::RiskScore;
use chrono::NaiveDate;

const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// CSS class applied to the tier badge.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

/// Boundary values belong to the higher tier: 30 is Moderate, 60 is High.
pub fn classify(score: RiskScore) -> RiskTier {
    match score.value() {
        s if s < 30 => RiskTier::Low,
        s if s < 60 => RiskTier::Moderate,
        _ => RiskTier::High,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedFields {
    pub age: String,
    pub hypertension: String,
    pub heart_disease: String,
    pub avg_glucose_level: String,
    pub bmi: String,
    pub smoking_status: String,
}

impl FormattedFields {
    pub fn from_input(input: &HealthMetricsInput) -> Self {
        Self {
            age: echo(input.age.as_deref(), ""),
            hypertension: yes_no(input.hypertension.as_deref(), input.has_hypertension()),
            heart_disease: yes_no(input.heart_disease.as_deref(), input.has_heart_disease()),
            avg_glucose_level: echo(input.avg_glucose_level.as_deref(), " mg/dL"),
            bmi: echo(input.bmi.as_deref(), " kg/m²"),
            smoking_status: echo(input.smoking_status.as_deref(), ""),
        }
    }
}

fn provided(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn echo(raw: Option<&str>, unit: &str) -> String {
    match provided(raw) {
        Some(value) => format!("{value}{unit}"),
        None => NOT_PROVIDED.to_string(),
    }
}

fn yes_no(raw: Option<&str>, present: bool) -> String {
    match (provided(raw), present) {
        (None, _) => NOT_PROVIDED.to_string(),
        (Some(_), true) => "Yes".to_string(),
        (Some(_), false) => "No".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub tier: RiskTier,
    /// Score as a percentage with one decimal, e.g. "40.0%".
    pub probability: String,
    pub fields: FormattedFields,
    /// Long-form date, e.g. "October 19, 2026".
    pub assessed_on: String,
}

pub fn render(score: RiskScore, input: &HealthMetricsInput, assessed_on: NaiveDate) -> RiskAssessment {
    RiskAssessment {
        score,
        tier: classify(score),
        probability: format!("{:.1}%", f64::from(score.value())),
        fields: FormattedFields::from_input(input),
        assessed_on: assessed_on.format("%B %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_partition_the_range() {
        for raw in 0..=100 {
            let tier = classify(RiskScore::new(raw));
            let expected = if raw < 30 {
                RiskTier::Low
            } else if raw < 60 {
                RiskTier::Moderate
            } else {
                RiskTier::High
            };
            assert_eq!(tier, expected, "score {raw}");
        }
    }

    #[test]
    fn boundaries_belong_to_higher_tier() {
        assert_eq!(classify(RiskScore::new(29)), RiskTier::Low);
        assert_eq!(classify(RiskScore::new(30)), RiskTier::Moderate);
        assert_eq!(classify(RiskScore::new(59)), RiskTier::Moderate);
        assert_eq!(classify(RiskScore::new(60)), RiskTier::High);
    }

    #[test]
    fn renders_units_and_flags() {
        let input = HealthMetricsInput {
            age: Some("45".into()),
            hypertension: Some("0".into()),
            heart_disease: Some("1".into()),
            avg_glucose_level: Some("150".into()),
            bmi: Some("27.5".into()),
            smoking_status: Some("formerly smoked".into()),
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();

        let assessment = render(RiskScore::new(40), &input, date);

        assert_eq!(assessment.tier, RiskTier::Moderate);
        assert_eq!(assessment.probability, "40.0%");
        assert_eq!(assessment.assessed_on, "October 9, 2026");
        assert_eq!(assessment.fields.age, "45");
        assert_eq!(assessment.fields.hypertension, "No");
        assert_eq!(assessment.fields.heart_disease, "Yes");
        assert_eq!(assessment.fields.avg_glucose_level, "150 mg/dL");
        assert_eq!(assessment.fields.bmi, "27.5 kg/m²");
        assert_eq!(assessment.fields.smoking_status, "formerly smoked");
    }

    #[test]
    fn missing_fields_render_placeholder() {
        let input = HealthMetricsInput {
            avg_glucose_level: Some("   ".into()),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let fields = render(RiskScore::new(0), &input, date).fields;

        assert_eq!(fields.age, NOT_PROVIDED);
        assert_eq!(fields.hypertension, NOT_PROVIDED);
        assert_eq!(fields.avg_glucose_level, NOT_PROVIDED);
        assert_eq!(fields.smoking_status, NOT_PROVIDED);
    }

    #[test]
    fn tier_presentation() {
        assert_eq!(RiskTier::High.label(), "High");
        assert_eq!(RiskTier::Moderate.css_class(), "moderate");
    }
}
