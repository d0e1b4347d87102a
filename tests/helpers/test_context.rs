//! Test context for unified test setup
//!
//! Builds settings pointing at the mock servers and the services on top of
//! them.

use std::sync::Arc;
use FarmLive::{
    config::Settings,
    services::ServiceFactory,
    FallbackDictionary, TranslationService,
};

use super::{
    gemini_mock::{GeminiMockServer, TEST_GEMINI_KEY},
    translator_mock::{TranslatorMockServer, TEST_TRANSLATOR_KEY, TEST_TRANSLATOR_REGION},
};

/// Unified test context that manages all test components
pub struct TestContext {
    pub translator_mock: TranslatorMockServer,
    pub gemini_mock: GeminiMockServer,
    pub settings: Settings,
}

/// Test configuration options
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub translator_key: bool,
    pub gemini_key: bool,
    pub live_translation: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            translator_key: true,
            gemini_key: true,
            live_translation: true,
        }
    }
}

impl TestContext {
    /// Create a new test context with both API keys configured
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let translator_mock = TranslatorMockServer::new().await;
        let gemini_mock = GeminiMockServer::new().await;

        let mut settings = Settings::default();
        settings.translator.endpoint = translator_mock.endpoint();
        settings.translator.region = TEST_TRANSLATOR_REGION.to_string();
        settings.translator.timeout_seconds = 2;
        settings.translator.api_key = config.translator_key.then(|| TEST_TRANSLATOR_KEY.to_string());
        settings.generative.api_url = gemini_mock.api_url();
        settings.generative.timeout_seconds = 2;
        settings.generative.api_key = config.gemini_key.then(|| TEST_GEMINI_KEY.to_string());
        settings.features.live_translation = config.live_translation;

        Self {
            translator_mock,
            gemini_mock,
            settings,
        }
    }

    /// Translation service over the built-in fallback tables
    pub fn translation_service(&self) -> TranslationService {
        let dictionary = FallbackDictionary::builtin().expect("built-in tables must parse");
        self.translation_service_with(dictionary)
    }

    /// Translation service over a custom dictionary
    pub fn translation_service_with(&self, dictionary: FallbackDictionary) -> TranslationService {
        TranslationService::from_settings(&self.settings, Arc::new(dictionary))
            .expect("Failed to create translation service")
    }

    /// All services built from the context settings
    pub async fn services(&self) -> ServiceFactory {
        ServiceFactory::from_settings(&self.settings)
            .await
            .expect("Failed to create services")
    }
}
