//! Fetcher implementations.
//!
//! - `HttpFetcher` - the live archive over HTTP
//! - `MockFetcher` - for testing

mod http;
mod mock;

pub use http::{HttpFetcher, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::{DocumentRef, Fetcher};
