//! Document sources: fetch raw text from a remote reference.
//!
//! One implementation per source kind (webpage, PDF, video transcript).
//! Failures are classified here; rendering them into user-visible
//! diagnostics is the router's job, so tests can assert on the
//! classification independently of wording.

pub mod pdf;
pub mod webpage;
pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

pub use pdf::PdfSource;
pub use webpage::WebpageSource;
pub use youtube::YoutubeSource;

/// Classified content-fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed: {0}")]
    Network(String),

    #[error("fetch timed out")]
    Timeout,

    #[error("document contained no extractable text")]
    EmptyContent,

    #[error("no transcript available")]
    NoTranscript,

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

/// A source of raw document text.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and extract the text behind `reference`.
    async fn fetch(&self, reference: &str) -> Result<String, FetchError>;
}
