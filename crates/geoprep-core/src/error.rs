//! Error types shared across geoprep.
//!
//! `ProviderError` lives here rather than in `geoprep-providers` so the
//! gateway can downcast and classify failures for retry decisions without
//! string matching.

use thiserror::Error;

/// Errors raised by the core orchestration layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Username or password was blank after trimming.
    #[error("username and password are required")]
    MissingCredentials,

    /// Signup attempted for a username that is already registered.
    #[error("user '{0}' already exists")]
    UserExists(String),

    /// Username/password pair did not match a stored user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Admin passcode mismatch.
    #[error("access denied: incorrect admin code")]
    AccessDenied,

    /// The current user may not perform this action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An operation that needs a logged-in user was called without one.
    #[error("not logged in")]
    NotLoggedIn,

    /// A chat turn was sent while a non-chat mode was active.
    #[error("mode '{0}' does not accept chat messages")]
    NotAChatMode(String),

    /// The evaluation form was submitted with a blank answer.
    #[error("answer must not be empty")]
    EmptyAnswer,

    /// The language model returned no text for a structured request.
    #[error("empty response from language model")]
    EmptyResponse,

    /// The language model reply could not be parsed as an evaluation result.
    #[error("failed to parse evaluation result: {0}")]
    MalformedEvaluation(#[from] serde_json::Error),

    /// Reading or writing the key-value store failed.
    #[error("storage error for key '{key}': {message}")]
    Storage { key: String, message: String },
}

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        match self {
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_) => true,
            // Request timeouts and rate limits can succeed on a later attempt.
            ProviderError::ApiError { status, .. } => {
                (400..500).contains(status) && *status != 408 && *status != 429
            }
            _ => false,
        }
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_classification() {
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(ProviderError::ModelNotFound("x".into()).is_permanent());
        assert!(!ProviderError::Timeout(30).is_permanent());
        assert!(!ProviderError::RateLimited { retry_after_ms: 10 }.is_permanent());
        let api = |status| ProviderError::ApiError {
            status,
            message: String::new(),
        };
        assert!(api(400).is_permanent());
        assert!(!api(408).is_permanent());
        assert!(!api(429).is_permanent());
        assert!(!api(500).is_permanent());
        assert!(!api(0).is_permanent());
    }

    #[test]
    fn retry_after_only_for_rate_limits() {
        let limited = ProviderError::RateLimited {
            retry_after_ms: 5000,
        };
        assert_eq!(limited.retry_after_ms(), Some(5000));
        assert_eq!(ProviderError::NetworkError("reset".into()).retry_after_ms(), None);
    }
}
