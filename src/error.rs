//! Muninn error types

/// Muninn error types
#[derive(Debug, thiserror::Error)]
pub enum MuninnError {
    // Caller-contract violations: malformed queries are rejected before any
    // fragment is formed.
    #[error("invalid query '{ref_id}': {reason}")]
    InvalidQuery { ref_id: String, reason: String },

    #[error("invalid time range: start time must be before end time")]
    InvalidTimeRange,

    // Batch limit errors: the caller recovers by splitting the batch into
    // smaller requests.
    /// The batch would need more generated `SEARCH(...)` sub-queries than the
    /// API accepts per request.
    #[error(
        "maximum number of search expressions per request ({max}) exceeded by query '{ref_id}'"
    )]
    TooManySearchExpressions { ref_id: String, max: usize },

    /// The batch would carry more metric data queries than the API accepts
    /// per request.
    #[error(
        "maximum number of metric data queries per request ({max}) exceeded by query '{ref_id}'"
    )]
    TooManyMetricDataQueries { ref_id: String, max: usize },

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MuninnError {
    /// Whether this error is a batch-limit rejection.
    ///
    /// Limit errors are recoverable: the host splits the query set across
    /// several requests and rebuilds each batch with a fresh builder.
    /// Everything else is a caller-contract violation.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            MuninnError::TooManySearchExpressions { .. }
                | MuninnError::TooManyMetricDataQueries { .. }
        )
    }

    /// Ref id of the query that caused the error, if it is attributable.
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            MuninnError::InvalidQuery { ref_id, .. }
            | MuninnError::TooManySearchExpressions { ref_id, .. }
            | MuninnError::TooManyMetricDataQueries { ref_id, .. } => Some(ref_id),
            _ => None,
        }
    }
}

/// Result type alias for muninn operations
pub type Result<T> = std::result::Result<T, MuninnError>;
