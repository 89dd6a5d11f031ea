//! Mock fetcher for testing.
//!
//! Serves canned documents and records every request.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{DocumentRef, Fetcher};

/// Mock fetcher for testing.
///
/// Documents that were never added answer with a 404 status, the same way
/// the live archive does for ids it does not know.
///
/// # Example
///
/// ```rust
/// use jarchive::fetchers::MockFetcher;
/// use jarchive::testing::{archive_index_html, GameFixture};
///
/// let mock = MockFetcher::new()
///     .with_index(archive_index_html(&[1]))
///     .with_game(1, GameFixture::new().to_html());
/// ```
#[derive(Default)]
pub struct MockFetcher {
    /// Canned documents
    documents: Arc<RwLock<HashMap<DocumentRef, String>>>,
    /// Documents that fail with a server error
    failing: Arc<RwLock<HashSet<DocumentRef>>>,
    /// Track calls for verification
    calls: Arc<RwLock<Vec<DocumentRef>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document that will be returned by fetch.
    pub fn add_document(&self, document: DocumentRef, content: impl Into<String>) {
        self.documents
            .write()
            .unwrap()
            .insert(document, content.into());
    }

    /// Make a document fail with a 500 status.
    pub fn add_failure(&self, document: DocumentRef) {
        self.failing.write().unwrap().insert(document);
    }

    /// Serve the archive index (builder pattern).
    pub fn with_index(self, content: impl Into<String>) -> Self {
        self.add_document(DocumentRef::Index, content);
        self
    }

    /// Serve a game page (builder pattern).
    pub fn with_game(self, id: u32, content: impl Into<String>) -> Self {
        self.add_document(DocumentRef::Game(id), content);
        self
    }

    /// Fail a document (builder pattern).
    pub fn failing(self, document: DocumentRef) -> Self {
        self.add_failure(document);
        self
    }

    /// Get the number of fetches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the number of fetches made for one document.
    pub fn calls_for(&self, document: &DocumentRef) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| *call == document)
            .count()
    }

    /// Get the documents requested, in order.
    pub fn calls(&self) -> Vec<DocumentRef> {
        self.calls.read().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            failing: Arc::clone(&self.failing),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, document: &DocumentRef) -> FetchResult<String> {
        self.calls.write().unwrap().push(*document);

        if self.failing.read().unwrap().contains(document) {
            return Err(FetchError::Status {
                status: 500,
                url: document.to_string(),
            });
        }

        self.documents
            .read()
            .unwrap()
            .get(document)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: document.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_canned_documents() {
        let mock = MockFetcher::new()
            .with_index("<html>index</html>")
            .with_game(3, "<html>game three</html>");

        assert_eq!(
            mock.fetch(&DocumentRef::Index).await.unwrap(),
            "<html>index</html>"
        );
        assert_eq!(
            mock.fetch(&DocumentRef::Game(3)).await.unwrap(),
            "<html>game three</html>"
        );
    }

    #[tokio::test]
    async fn test_unknown_document_is_not_found() {
        let mock = MockFetcher::new();
        let err = mock.fetch(&DocumentRef::Game(99)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_failing_document() {
        let mock = MockFetcher::new()
            .with_index("<html></html>")
            .failing(DocumentRef::Index);
        let err = mock.fetch(&DocumentRef::Index).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_call_tracking_is_shared_between_clones() {
        let mock = MockFetcher::new().with_game(1, "one");
        let clone = mock.clone();

        clone.fetch(&DocumentRef::Game(1)).await.unwrap();
        clone.fetch(&DocumentRef::Game(2)).await.unwrap_err();
        clone.fetch(&DocumentRef::Game(1)).await.unwrap();

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls_for(&DocumentRef::Game(1)), 2);
        assert_eq!(
            mock.calls(),
            vec![
                DocumentRef::Game(1),
                DocumentRef::Game(2),
                DocumentRef::Game(1)
            ]
        );

        mock.reset_calls();
        assert_eq!(clone.call_count(), 0);
    }
}
