//! Response outcomes.
//!
//! Every request ends in exactly one of four terminal states; nothing is
//! carried across requests.

use axum::http::StatusCode;

use crate::error::ProxyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `url` absent or empty (400).
    MissingParam,
    /// CORS preflight acknowledged (204).
    Preflight,
    /// Upstream body relayed (200).
    Forwarded,
    /// Upstream status, transport or timeout failure (500).
    Failed,
}

impl Outcome {
    pub fn from_error(err: &ProxyError) -> Self {
        if err.is_upstream() {
            Outcome::Failed
        } else {
            Outcome::MissingParam
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::MissingParam => StatusCode::BAD_REQUEST,
            Outcome::Preflight => StatusCode::NO_CONTENT,
            Outcome::Forwarded => StatusCode::OK,
            Outcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::MissingParam => "missing_param",
            Outcome::Preflight => "preflight",
            Outcome::Forwarded => "forwarded",
            Outcome::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_matches_error_status() {
        let missing = ProxyError::MissingParameter;
        assert_eq!(Outcome::from_error(&missing).status(), missing.status_code());

        let upstream = ProxyError::upstream_status(StatusCode::BAD_GATEWAY);
        assert_eq!(Outcome::from_error(&upstream), Outcome::Failed);
        assert_eq!(Outcome::Failed.status(), upstream.status_code());
    }
}
