use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Engine operations never let these escape to their callers: they are converted into
/// `MoodScore::Unavailable`, `SummaryOutcome::Failed`, or the offline chat fallback.
/// The error still carries the cause so it can be logged.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// The generative model could not be reached or rejected the request.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The model answered, but not in the shape that was asked for.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., missing environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Failure classes seen at the boundary with the generative model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ExternalServiceFailure,
    MalformedModelOutput,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::ExternalServiceFailure => "external_service_failure",
            ErrorKind::MalformedModelOutput => "malformed_model_output",
            ErrorKind::Other => "other",
        };
        f.write_str(label)
    }
}

impl AppError {
    /// Classifies the error for logging. Timeouts count as service failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ExternalService(_) | AppError::Timeout(_) => ErrorKind::ExternalServiceFailure,
            AppError::MalformedOutput(_) => ErrorKind::MalformedModelOutput,
            _ => ErrorKind::Other,
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Model request timed out: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP timeout: {}", err))
        } else if err.is_decode() {
            AppError::MalformedOutput(format!("Undecodable response body: {}", err))
        } else {
            AppError::ExternalService(format!("HTTP error: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedOutput(format!("JSON error: {}", err))
    }
}

impl From<ParseIntError> for AppError {
    fn from(err: ParseIntError) -> Self {
        AppError::MalformedOutput(format!("Expected an integer: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            AppError::ExternalService("down".into()).kind(),
            ErrorKind::ExternalServiceFailure
        );
        assert_eq!(
            AppError::Timeout("slow".into()).kind(),
            ErrorKind::ExternalServiceFailure
        );
        assert_eq!(
            AppError::MalformedOutput("nope".into()).kind(),
            ErrorKind::MalformedModelOutput
        );
        assert_eq!(AppError::Config("x".into()).kind(), ErrorKind::Other);
    }

    #[test]
    fn test_parse_int_error_is_malformed_output() {
        let err: AppError = "positive".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, AppError::MalformedOutput(_)));
        assert!(err.to_string().starts_with("Malformed model output"));
    }
}
