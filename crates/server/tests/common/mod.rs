//! Common test utilities for E2E testing with mocks.
//!
//! Builds the in-process server with a mock rendering collaborator
//! injected, so the full request/response cycle runs without a browser or
//! network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pahescope_core::testing::MockRenderer;
use pahescope_core::{Config, ResolutionOrchestrator};

/// Test fixture for E2E testing with a mock rendering collaborator.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock renderer - script page behavior, assert collaborator usage
    pub renderer: MockRenderer,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default config and an unscripted
    /// mock renderer.
    pub fn new() -> Self {
        let mut config = Config::default();
        // No real player to wait for.
        config.browser.player_settle_secs = 0;

        let renderer = MockRenderer::new();
        let orchestrator =
            ResolutionOrchestrator::new(Arc::new(renderer.clone()), config.clone());
        let state = Arc::new(pahescope_server::state::AppState::new(config, orchestrator));
        let router = pahescope_server::api::create_router(state);

        Self { router, renderer }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body was not JSON")
        };

        TestResponse { status, body }
    }
}
