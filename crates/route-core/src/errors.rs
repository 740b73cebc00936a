//! Error types for the swap router

use thiserror::Error;

/// Top-level errors surfaced by router operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Route discovery and quoting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("No route found from {source_token} to {destination_token}")]
    NoRouteFound {
        source_token: String,
        destination_token: String,
    },

    #[error("No quote available across {candidates} candidate paths")]
    QuoteUnavailable { candidates: usize },

    #[error("Oracle call failed for path {path}: {message}")]
    OracleCallFailed { path: String, message: String },
}

/// Errors from the external quoting oracle or pair registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("Endpoint unreachable at {url}")]
    Unreachable { url: String },

    #[error("Call reverted: {message}")]
    Reverted { message: String },

    #[error("Call timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Endpoint returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, Error>;

impl RouteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::NoRouteFound { .. } => "no_route_found",
            Self::QuoteUnavailable { .. } => "quote_unavailable",
            Self::OracleCallFailed { .. } => "oracle_call_failed",
        }
    }

    /// Whether the caller should show a "no route" state
    pub fn is_no_route(&self) -> bool {
        matches!(
            self,
            Self::NoRouteFound { .. } | Self::QuoteUnavailable { .. }
        )
    }
}

impl OracleError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "unreachable",
            Self::Reverted { .. } => "reverted",
            Self::Timeout { .. } => "timeout",
            Self::ApiError { .. } => "api_error",
            Self::ParseError(_) => "parse_error",
        }
    }
}
