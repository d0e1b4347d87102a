//! Mock Gemini API server for testing
//!
//! Simulates the `models/{model}:generateContent` endpoint.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_GEMINI_KEY: &str = "test-gemini-key";

/// Mock Gemini API server
pub struct GeminiMockServer {
    pub server: MockServer,
}

/// Response body with a single candidate holding `text`
pub fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}

impl GeminiMockServer {
    /// Create a new mock Gemini server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in the generative configuration
    pub fn api_url(&self) -> String {
        format!("{}/v1beta", self.server.uri())
    }

    /// Answer generateContent requests for `model` with `text`
    pub async fn mock_generate(&self, model: &str, text: &str) {
        self.mock_generate_response(model, 200, candidate_body(text)).await;
    }

    /// Answer generateContent requests for `model` with a raw status and body
    pub async fn mock_generate_response(&self, model: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", model)))
            .and(query_param("key", TEST_GEMINI_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Request bodies received so far, parsed as JSON
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
