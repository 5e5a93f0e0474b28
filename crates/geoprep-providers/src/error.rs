//! Provider error types.
//!
//! The error enum lives in `geoprep-core` so the gateway retry loop can
//! classify failures without depending on this crate.

pub use geoprep_core::error::ProviderError;

/// Build the HTTP client shared by the remote providers.
pub(crate) fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::NetworkError(format!("failed to build HTTP client: {e}")).into())
}

/// Map a transport-level failure to a provider error.
pub(crate) fn transport_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}
