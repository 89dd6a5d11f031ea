//! Typed errors for the archive sampler.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the sampler's retry
//! loop can branch on the failure kind.

use thiserror::Error;

use crate::types::Coordinate;

/// Errors produced while reading records out of a fetched document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Document lacks one (or both) of the two round grids
    #[error("game does not exist")]
    GameMissing,

    /// Grid cell is a placeholder for a clue that was never revealed
    #[error("clue does not exist at {coordinate}")]
    ClueMissing { coordinate: Coordinate },

    /// Question text embeds a hyperlink to external media
    #[error("question contains a link at {coordinate}")]
    LinkClue { coordinate: Coordinate },

    /// Archive index document has no listing entries
    #[error("archive index could not be parsed: {reason}")]
    ParseFailure { reason: String },

    /// Game document has both rounds but an unexpected inner structure
    #[error("malformed game document: {reason}")]
    Malformed { reason: String },
}

impl ExtractError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Whether sampling should move on to a different game and coordinate.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::ParseFailure { .. })
    }
}

/// Errors raised by a [`Fetcher`](crate::traits::fetcher::Fetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Document URL could not be built from the base URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors surfaced by the sampling engine.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Document could not be fetched
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Document could not be turned into a record
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// No high-water mark is known yet
    #[error("game index has not been refreshed")]
    IndexUnset,

    /// Every attempt in the budget failed
    #[error("gave up after {attempts} attempts: {last}")]
    Aborted {
        attempts: u32,
        #[source]
        last: Box<SampleError>,
    },
}

impl SampleError {
    /// Whether the failure came from the irregular source universe and another
    /// draw may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(_) => true,
            Self::Extract(e) => e.is_retryable(),
            Self::IndexUnset | Self::Aborted { .. } => false,
        }
    }
}

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for sampling operations.
pub type SampleResult<T> = std::result::Result<T, SampleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Round;

    #[test]
    fn test_extract_retry_classification() {
        let coordinate = Coordinate::new(Round::First, 1, 1).unwrap();

        assert!(ExtractError::GameMissing.is_retryable());
        assert!(ExtractError::ClueMissing { coordinate }.is_retryable());
        assert!(ExtractError::LinkClue { coordinate }.is_retryable());
        assert!(ExtractError::malformed("no title").is_retryable());
        assert!(!ExtractError::ParseFailure {
            reason: "empty".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_sample_retry_classification() {
        let fetch = SampleError::Fetch(FetchError::Status {
            status: 503,
            url: "http://example.com".into(),
        });
        assert!(fetch.is_retryable());
        assert!(!SampleError::IndexUnset.is_retryable());

        let aborted = SampleError::Aborted {
            attempts: 5,
            last: Box::new(SampleError::Extract(ExtractError::GameMissing)),
        };
        assert!(!aborted.is_retryable());
        assert_eq!(
            aborted.to_string(),
            "gave up after 5 attempts: game does not exist"
        );
    }
}
