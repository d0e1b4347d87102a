//! Mock Microsoft Translator server for testing
//!
//! Simulates the `/translate` endpoint of the Translator v3 API with
//! configurable per-text responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TRANSLATOR_KEY: &str = "test-translator-key";
pub const TEST_TRANSLATOR_REGION: &str = "centralindia";

/// Mock Translator API server
pub struct TranslatorMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
    /// Exact number of requests the mock must receive
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            custom_response: None,
            expected_calls: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing(status: u16) -> Self {
        Self {
            status,
            custom_response: Some(json!({
                "error": { "code": 401000, "message": "The request is not authorized" }
            })),
            ..Self::default()
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            custom_response: Some(body),
            ..Self::default()
        }
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

/// Response body the service returns for one translated text
pub fn translation_body(translated: &str, lang: &str) -> Value {
    json!([{ "translations": [{ "text": translated, "to": lang }] }])
}

impl TranslatorMockServer {
    /// Create a new mock Translator server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Endpoint to put in the translator configuration
    pub fn endpoint(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Answer requests translating `text` into `lang`
    pub async fn mock_translation(&self, text: &str, lang: &str, translated: &str, config: MockResponseConfig) {
        let body = config
            .custom_response
            .clone()
            .unwrap_or_else(|| translation_body(translated, lang));

        let mut response = ResponseTemplate::new(config.status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("POST"))
            .and(path("/translate"))
            .and(query_param("api-version", "3.0"))
            .and(query_param("to", lang))
            .and(header("Ocp-Apim-Subscription-Key", TEST_TRANSLATOR_KEY))
            .and(header("Ocp-Apim-Subscription-Region", TEST_TRANSLATOR_REGION))
            .and(body_json(json!([{ "text": text }])))
            .respond_with(response);

        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }

        mock.mount(&self.server).await;
    }

    /// Answer every translate request with the given status and body
    pub async fn mock_any(&self, config: MockResponseConfig) {
        let body = config.custom_response.clone().unwrap_or_else(|| json!([]));
        let mut mock = Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(config.status).set_body_json(body));

        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }

        mock.mount(&self.server).await;
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
