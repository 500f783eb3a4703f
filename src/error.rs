//! Error types for the matchup picker.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CfbdError>;

#[derive(Error, Debug)]
pub enum CfbdError {
    #[error("no API key configured; set {} or run interactively to be prompted", crate::API_KEY_ENV_VAR)]
    MissingCredential,

    #[error("the API rejected the configured key; enter a new one")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("could not gather {section}: {message}")]
    AggregationFailed { section: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_env_var() {
        let msg = CfbdError::MissingCredential.to_string();
        assert!(msg.contains(crate::API_KEY_ENV_VAR));
    }

    #[test]
    fn malformed_response_names_the_endpoint() {
        let err = CfbdError::MalformedResponse {
            endpoint: "games".to_string(),
            message: "expected a sequence".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("games"));
        assert!(msg.contains("expected a sequence"));
    }

    #[test]
    fn aggregation_failure_names_the_section() {
        let err = CfbdError::AggregationFailed {
            section: "current week games".to_string(),
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("current week games"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CfbdError = io.into();
        assert!(matches!(err, CfbdError::Io(_)));
    }
}
