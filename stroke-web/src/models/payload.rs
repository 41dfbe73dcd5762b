use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde_json::{error::Category, value::RawValue};
use std::collections::HashMap;
use stroke_core::error::AppError;

use super::HealthMetricsInput;

/// Members of a JSON object body, each kept as its unparsed JSON text.
///
/// Numbers are only scanned, never converted, so a literal outside the `f64`
/// range is still accepted. A key that appears twice keeps its last value.
/// An array body yields no members; a scalar body is rejected.
#[derive(Debug)]
pub struct JsonFields(pub HashMap<String, Box<RawValue>>);

impl JsonFields {
    pub fn into_input(self) -> HealthMetricsInput {
        HealthMetricsInput::from_json_fields(&self.0)
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(reject(AppError::UnsupportedMediaType(anyhow::anyhow!(
                "Expected request with `Content-Type: application/json`"
            ))));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| reject(AppError::from(rejection)))?;

        let body: Box<RawValue> = serde_json::from_slice(&bytes)
            .map_err(|err| reject(json_error("Failed to parse the request body as JSON", err)))?;

        let fields = match body.get().as_bytes().first() {
            Some(b'{') => serde_json::from_str(body.get()).map_err(|err| {
                reject(json_error("Failed to parse the request body as JSON", err))
            })?,
            // An array carries no named fields; every metric reads as absent.
            Some(b'[') => HashMap::new(),
            _ => {
                return Err(reject(AppError::UnprocessableEntity(anyhow::anyhow!(
                    "Expected a JSON object or array"
                ))))
            }
        };

        Ok(JsonFields(fields))
    }
}

fn json_error(context: &str, err: serde_json::Error) -> AppError {
    match err.classify() {
        Category::Data => AppError::UnprocessableEntity(anyhow::anyhow!("{context}: {err}")),
        _ => AppError::BadRequest(anyhow::anyhow!("{context}: {err}")),
    }
}

fn reject(err: AppError) -> AppError {
    tracing::warn!(error = %err, "Rejected predict request body");
    err
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn json_content_types_are_recognised() {
        assert!(has_json_content_type(&headers("application/json")));
        assert!(has_json_content_type(&headers("application/json; charset=utf-8")));
        assert!(has_json_content_type(&headers("Application/JSON")));
        assert!(has_json_content_type(&headers("application/vnd.api+json")));
        assert!(!has_json_content_type(&headers("text/plain")));
        assert!(!has_json_content_type(&headers("application/x-www-form-urlencoded")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }
}
