//! Health metrics submitted by the prediction form.
//!
//! Every field is kept as the raw text the client sent. Interpretation
//! (number parsing, flag matching) happens at read time and never fails:
//! a value that cannot be interpreted simply matches no scoring rule.

use serde_json::value::RawValue;
use std::collections::HashMap;

/// Value the form uses for a checked yes/no flag.
pub const FLAG_PRESENT: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthMetricsInput {
    pub age: Option<String>,
    pub hypertension: Option<String>,
    pub heart_disease: Option<String>,
    pub avg_glucose_level: Option<String>,
    pub bmi: Option<String>,
    pub smoking_status: Option<String>,
}

impl HealthMetricsInput {
    /// Builds the input from url-encoded pairs. A repeated key keeps its last
    /// value; unknown keys are ignored.
    pub fn from_form_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut input = Self::default();
        for (key, value) in pairs {
            input.set(&key, Some(value));
        }
        input
    }

    /// Builds the input from the members of a JSON object.
    ///
    /// Numeric fields take strings, numbers and booleans as text. Flag and
    /// smoking fields are compared as strings, so only JSON strings can set
    /// them. `null`, arrays and objects read as absent.
    pub fn from_json_fields(fields: &HashMap<String, Box<RawValue>>) -> Self {
        let mut input = Self::default();
        for (key, raw) in fields {
            let value = match key.as_str() {
                "hypertension" | "heart_disease" | "smoking_status" => json_string(raw),
                _ => json_scalar_text(raw),
            };
            input.set(key, value);
        }
        input
    }

    fn set(&mut self, key: &str, value: Option<String>) {
        let slot = match key {
            "age" => &mut self.age,
            "hypertension" => &mut self.hypertension,
            "heart_disease" => &mut self.heart_disease,
            "avg_glucose_level" => &mut self.avg_glucose_level,
            "bmi" => &mut self.bmi,
            "smoking_status" => &mut self.smoking_status,
            _ => return,
        };
        *slot = value;
    }

    pub fn age(&self) -> Option<i64> {
        self.age.as_deref().and_then(parse_leading_int)
    }

    /// Average glucose level in mg/dL.
    pub fn avg_glucose_level(&self) -> Option<i64> {
        self.avg_glucose_level.as_deref().and_then(parse_leading_int)
    }

    pub fn bmi(&self) -> Option<i64> {
        self.bmi.as_deref().and_then(parse_leading_int)
    }

    pub fn has_hypertension(&self) -> bool {
        is_flag_present(self.hypertension.as_deref())
    }

    pub fn has_heart_disease(&self) -> bool {
        is_flag_present(self.heart_disease.as_deref())
    }

    pub fn smoking_status(&self) -> SmokingStatus {
        SmokingStatus::from_raw(self.smoking_status.as_deref())
    }
}

fn is_flag_present(raw: Option<&str>) -> bool {
    raw == Some(FLAG_PRESENT)
}

fn json_string(raw: &RawValue) -> Option<String> {
    let text = raw.get().trim();
    if text.starts_with('"') {
        serde_json::from_str::<String>(text).ok()
    } else {
        None
    }
}

fn json_scalar_text(raw: &RawValue) -> Option<String> {
    let text = raw.get().trim();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str::<String>(text).ok(),
        Some(b'-' | b'0'..=b'9') => Some(number_text(text)),
        Some(b't') => Some("true".to_string()),
        Some(b'f') => Some("false".to_string()),
        _ => None,
    }
}

/// Renders a JSON number literal the way a browser stringifies it: values
/// beyond `f64` become `Infinity` (which reads as no number at all), very
/// large magnitudes use exponent notation.
fn number_text(literal: &str) -> String {
    match literal.parse::<f64>() {
        Ok(v) if v.is_infinite() => {
            if v > 0.0 {
                "Infinity".to_string()
            } else {
                "-Infinity".to_string()
            }
        }
        Ok(v) if v.abs() >= 1e21 => format!("{v:e}"),
        Ok(v) => v.to_string(),
        Err(_) => literal.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokingStatus {
    Smokes,
    FormerlySmoked,
    /// "never smoked", "Unknown", blank, or anything unrecognised.
    Other,
}

impl SmokingStatus {
    /// Exact, case-sensitive match on the form's option values.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("smokes") => SmokingStatus::Smokes,
            Some("formerly smoked") => SmokingStatus::FormerlySmoked,
            _ => SmokingStatus::Other,
        }
    }
}

/// Reads the integer prefix of `raw`: leading whitespace and an optional sign
/// are skipped, a `0x`/`0X` prefix switches to hexadecimal, digits are
/// consumed up to the first non-digit and the rest is ignored. Returns `None`
/// when no digit follows. Out-of-range values saturate.
///
/// `"27.9"` reads as 27, `"45 years"` as 45, `"0x3E"` as 62, `"abc"` as `None`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .try_fold(None, |acc: Option<i64>, digit| {
            let acc = acc.unwrap_or(0);
            Some(Some(
                acc.saturating_mul(i64::from(radix))
                    .saturating_add(i64::from(digit)),
            ))
        })
        .flatten()?;

    Some(if negative { -magnitude } else { magnitude })
}
