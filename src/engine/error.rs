//! Fetch error types.

use thiserror::Error;

/// Errors raised inside a fetch operation.
///
/// These never cross the public fetcher contract: the release and branch
/// fetchers fold them into a final progress message and a sentinel result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {code} for url ({url})")]
    Status { url: String, code: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("unsupported download URL: {0}")]
    UnsupportedUrl(String),

    #[error("No release assets found.")]
    NoReleaseAssets,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl FetchError {
    /// Classify a `ureq` failure for `url`.
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => FetchError::Status {
                url: url.to_string(),
                code,
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            },
        }
    }

    pub(crate) fn invalid_response(url: &str, message: impl std::fmt::Display) -> Self {
        FetchError::InvalidResponse {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}
