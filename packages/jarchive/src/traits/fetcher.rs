//! Fetcher trait for retrieving archive documents.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jarchive::traits::fetcher::{DocumentRef, Fetcher};
//!
//! let index = fetcher.fetch(&DocumentRef::Index).await?;
//! let game = fetcher.fetch(&DocumentRef::Game(4680)).await?;
//! ```

use async_trait::async_trait;
use std::fmt;

use crate::error::FetchResult;

/// A document in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRef {
    /// Archive root page listing recent games
    Index,
    /// A single game page by id
    Game(u32),
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRef::Index => f.write_str("archive index"),
            DocumentRef::Game(id) => write!(f, "game {}", id),
        }
    }
}

/// Retrieves raw document text.
///
/// Implementations:
/// - `HttpFetcher` - reqwest against the live archive
/// - `MockFetcher` - canned documents with call tracking
///
/// Timeouts and transport retries are the implementation's concern; the
/// sampler treats every error as a failed attempt.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the raw content of a document.
    async fn fetch(&self, document: &DocumentRef) -> FetchResult<String>;

    /// Name of this fetcher, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_display() {
        assert_eq!(DocumentRef::Index.to_string(), "archive index");
        assert_eq!(DocumentRef::Game(17).to_string(), "game 17");
    }
}
