//! CORS response headers.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::CorsConfig;
use crate::config::ValidationError;

/// The allow-origin/methods/headers triple, parsed once at startup.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            allow_origin: parse("cors.allow_origin", &config.allow_origin)?,
            allow_methods: parse("cors.allow_methods", &config.allow_methods)?,
            allow_headers: parse("cors.allow_headers", &config.allow_headers)?,
        })
    }

    /// Write all three headers, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type, Range"),
        }
    }
}

fn parse(field: &'static str, value: &str) -> Result<HeaderValue, ValidationError> {
    HeaderValue::from_str(value).map_err(|_| ValidationError::InvalidHeaderValue {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_defaults() {
        let cors = CorsHeaders::from_config(&CorsConfig::default()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://a.test"));
        cors.apply(&mut headers);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Range");
        assert_eq!(headers.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(), 1);
    }

    #[test]
    fn test_rejects_invalid_value() {
        let config = CorsConfig {
            allow_headers: "Content-Type\r\n".into(),
            ..CorsConfig::default()
        };
        assert!(matches!(
            CorsHeaders::from_config(&config),
            Err(ValidationError::InvalidHeaderValue { field: "cors.allow_headers", .. })
        ));
    }
}
