//! Test harness serving the router over a mocked archive.
//!
//! Requests go through the full middleware stack via `tower::ServiceExt`,
//! without binding a socket.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jarchive::{
    testing::{archive_index_html, GameFixture},
    MockFetcher, Sampler, SamplerConfig,
};
use serde_json::Value;
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

pub struct TestHarness {
    pub app: Router,
    pub state: AppState,
    pub fetcher: MockFetcher,
}

impl TestHarness {
    /// Archive with a single fully revealed game, id 1.
    pub fn new() -> Self {
        let fetcher = MockFetcher::new()
            .with_index(archive_index_html(&[1]))
            .with_game(1, GameFixture::new().to_html());
        Self::with_fetcher(fetcher)
    }

    pub fn with_fetcher(fetcher: MockFetcher) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let config = SamplerConfig::new().with_max_attempts(5).with_seed(7);
        let sampler = Sampler::new(Arc::new(fetcher.clone()), config);
        let state = AppState::new(sampler);

        Self {
            app: build_app(state.clone()),
            state,
            fetcher,
        }
    }

    /// Issue a GET and decode the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }
}
