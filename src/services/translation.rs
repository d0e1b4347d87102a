//! Translation service implementation
//!
//! Resolves a (text, target language) request through an ordered chain of
//! strategies: cache, live backend, dictionary exact match, dictionary
//! phrase substitution and finally an annotated passthrough. The service is
//! total: every call yields a string and failures only show up in the logs.

use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::Settings;
use crate::i18n::{FallbackDictionary, Language};
use crate::models::{CacheKey, ResolutionSource, Translation};
use crate::utils::errors::{Result, TranslationError};
use crate::utils::logging::log_translation;
use super::cache::{CacheStats, TranslationCache};
use super::translator::{MicrosoftTranslator, TranslationBackend};

/// Resolution steps tried in order for a non-trivial request.
///
/// Annotation terminates the chain and always succeeds, so it is not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Cache,
    Backend,
    DictionaryExact,
    DictionarySubstitution,
}

/// Default resolution order
pub const RESOLUTION_CHAIN: [Strategy; 4] = [
    Strategy::Cache,
    Strategy::Backend,
    Strategy::DictionaryExact,
    Strategy::DictionarySubstitution,
];

/// Translation cache and dispatcher
#[derive(Clone)]
pub struct TranslationService {
    backend: Arc<dyn TranslationBackend>,
    dictionary: Arc<FallbackDictionary>,
    cache: Arc<TranslationCache>,
    live_translation: bool,
    source_language: String,
    target_languages: Arc<Vec<String>>,
}

impl TranslationService {
    /// Create a service from its collaborators
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        dictionary: Arc<FallbackDictionary>,
        cache: Arc<TranslationCache>,
    ) -> Self {
        Self {
            backend,
            dictionary,
            cache,
            live_translation: true,
            source_language: Language::SOURCE.code().to_string(),
            target_languages: Arc::new(Language::ALL.iter().map(|lang| lang.code().to_string()).collect()),
        }
    }

    /// Create a service backed by Microsoft Translator with a fresh cache
    pub fn from_settings(settings: &Settings, dictionary: Arc<FallbackDictionary>) -> Result<Self> {
        let backend = Arc::new(MicrosoftTranslator::new(&settings.translator)?);
        Ok(Self::new(backend, dictionary, Arc::new(TranslationCache::new()))
            .with_live_translation(settings.features.live_translation)
            .with_languages(&settings.i18n.default_language, &settings.i18n.supported_languages))
    }

    /// Set the language content is authored in and the codes the backend is asked for.
    ///
    /// Requests for the source language are returned untouched; codes outside
    /// `supported` never reach the backend.
    pub fn with_languages(mut self, source: &str, supported: &[String]) -> Self {
        self.source_language = source.to_string();
        self.target_languages = Arc::new(supported.to_vec());
        self
    }

    /// Check whether `code` is the language content is authored in
    pub fn is_source_language(&self, code: &str) -> bool {
        code == self.source_language
    }

    /// Check whether `code` may be sent to the live backend
    pub fn is_target_language(&self, code: &str) -> bool {
        self.target_languages.iter().any(|lang| lang == code)
    }

    /// Enable or disable calls to the live backend
    pub fn with_live_translation(mut self, enabled: bool) -> Self {
        self.live_translation = enabled;
        self
    }

    /// Translate `text` into `target_lang`
    pub async fn translate_text(&self, text: &str, target_lang: &str) -> String {
        self.translate_text_detailed(text, target_lang).await.text
    }

    /// Translate `text` and report which strategy produced the result
    pub async fn translate_text_detailed(&self, text: &str, target_lang: &str) -> Translation {
        if self.is_source_language(target_lang) {
            return Translation::new(text, ResolutionSource::Identity);
        }

        if text.trim().is_empty() {
            return Translation::new(text, ResolutionSource::Blank);
        }

        let key = CacheKey::new(text, target_lang);
        for strategy in RESOLUTION_CHAIN {
            if let Some(resolved) = self.apply(strategy, &key).await {
                return self.remember(key, resolved).await;
            }
        }

        let annotated = Translation::new(annotate(text, target_lang), ResolutionSource::Annotated);
        let miss = TranslationError::NoFallbackMatch { language: target_lang.to_string() };
        debug!(error = %miss, "Annotating original text");
        self.remember(key, annotated).await
    }

    async fn apply(&self, strategy: Strategy, key: &CacheKey) -> Option<Translation> {
        match strategy {
            Strategy::Cache => self
                .cache
                .get(key)
                .await
                .map(|entry| Translation::new(entry.text, ResolutionSource::Cache)),
            Strategy::Backend => self.from_backend(key).await,
            Strategy::DictionaryExact => dictionary_exact(&self.dictionary, key),
            Strategy::DictionarySubstitution => dictionary_substitution(&self.dictionary, key),
        }
    }

    async fn from_backend(&self, key: &CacheKey) -> Option<Translation> {
        if !self.live_translation {
            return None;
        }

        if !self.is_target_language(&key.target_lang) {
            debug!(lang = %key.target_lang, "Unsupported target language, skipping translation backend");
            return None;
        }

        debug!(lang = %key.target_lang, backend = self.backend.name(), "Translating via backend");
        match self.backend.translate(&key.text, &key.target_lang).await {
            Ok(text) if !text.trim().is_empty() => Some(Translation::new(text, ResolutionSource::Backend)),
            Ok(_) => {
                let error = TranslationError::MalformedResponse("empty translation".to_string());
                warn!(backend = self.backend.name(), lang = %key.target_lang, error = %error, "Falling back to dictionary");
                None
            }
            Err(TranslationError::CredentialMissing { .. }) => None,
            Err(error) => {
                warn!(backend = self.backend.name(), lang = %key.target_lang, error = %error, "Falling back to dictionary");
                None
            }
        }
    }

    /// Cache a freshly resolved translation; cache hits pass straight through
    async fn remember(&self, key: CacheKey, resolved: Translation) -> Translation {
        if !resolved.source.is_cacheable() {
            return resolved;
        }
        let target_lang = key.target_lang.clone();
        let stored = self.cache.insert(key, resolved.text, resolved.source).await;
        log_translation(&target_lang, stored.source, stored.text.chars().count());
        Translation::new(stored.text, stored.source)
    }

    /// Empty the translation cache
    pub async fn clear_cache(&self) -> usize {
        self.cache.clear().await
    }

    /// Get cache statistics
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats().await
    }

    /// Shared cache handle
    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// Shared dictionary handle
    pub fn dictionary(&self) -> &Arc<FallbackDictionary> {
        &self.dictionary
    }

    /// Check whether the live backend will be consulted at all
    pub fn is_live(&self) -> bool {
        self.live_translation && self.backend.is_configured()
    }
}

/// Verbatim dictionary lookup
pub fn dictionary_exact(dictionary: &FallbackDictionary, key: &CacheKey) -> Option<Translation> {
    dictionary
        .exact(&key.target_lang, &key.text)
        .map(|text| Translation::new(text, ResolutionSource::DictionaryExact))
}

/// Whole-word phrase substitution; `None` when no phrase matched
pub fn dictionary_substitution(dictionary: &FallbackDictionary, key: &CacheKey) -> Option<Translation> {
    dictionary
        .substitute(&key.target_lang, &key.text)
        .map(|text| Translation::new(text, ResolutionSource::DictionarySubstitution))
}

/// Last-resort marker for text that could not be translated
pub fn annotate(text: &str, target_lang: &str) -> String {
    format!("{} ({})", text, target_lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::utils::errors::TranslationResult;

    /// Backend answering from a fixed table and counting calls
    struct StubBackend {
        responses: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationBackend for StubBackend {
        fn name(&self) -> &str {
            "stub"
        }

        async fn translate(&self, text: &str, _target_lang: &str) -> TranslationResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(text)
                .cloned()
                .ok_or_else(|| TranslationError::BackendUnavailable("no stub response".to_string()))
        }
    }

    fn dictionary() -> Arc<FallbackDictionary> {
        Arc::new(
            FallbackDictionary::empty()
                .with_phrases("hi", &[("About", "X"), ("Contact", "संपर्क")])
                .unwrap(),
        )
    }

    fn service(backend: Arc<StubBackend>) -> TranslationService {
        TranslationService::new(backend, dictionary(), Arc::new(TranslationCache::new()))
    }

    #[tokio::test]
    async fn test_source_language_is_identity() {
        let backend = Arc::new(StubBackend::new(&[("hello", "नमस्ते")]));
        let service = service(backend.clone());

        let result = service.translate_text_detailed("hello", "en").await;
        assert_eq!(result, Translation::new("hello", ResolutionSource::Identity));
        assert_eq!(backend.calls(), 0);
        assert!(service.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_text_is_returned_unchanged() {
        let backend = Arc::new(StubBackend::new(&[]));
        let service = service(backend.clone());

        assert_eq!(service.translate_text("", "hi").await, "");
        assert_eq!(service.translate_text("   ", "hi").await, "   ");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_result_is_cached() {
        let backend = Arc::new(StubBackend::new(&[("hello", "नमस्ते")]));
        let service = service(backend.clone());

        let first = service.translate_text_detailed("hello", "hi").await;
        let second = service.translate_text_detailed("hello", "hi").await;

        assert_eq!(first.source, ResolutionSource::Backend);
        assert_eq!(second.source, ResolutionSource::Cache);
        assert_eq!(first.text, second.text);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_order() {
        let backend = Arc::new(StubBackend::new(&[]));
        let service = service(backend.clone());

        let exact = service.translate_text_detailed("About", "hi").await;
        assert_eq!(exact, Translation::new("X", ResolutionSource::DictionaryExact));

        let substituted = service.translate_text_detailed("I love soil and About", "hi").await;
        assert_eq!(
            substituted,
            Translation::new("I love soil and X", ResolutionSource::DictionarySubstitution)
        );

        let annotated = service.translate_text_detailed("Aboutish", "hi").await;
        assert_eq!(annotated, Translation::new("Aboutish (hi)", ResolutionSource::Annotated));
    }

    #[tokio::test]
    async fn test_substitution_beside_devanagari() {
        let backend = Arc::new(StubBackend::new(&[]));
        let service = service(backend);

        let result = service.translate_text_detailed("Aboutकिसान", "hi").await;
        assert_eq!(result, Translation::new("Xकिसान", ResolutionSource::DictionarySubstitution));
    }

    #[tokio::test]
    async fn test_fallback_results_are_cached() {
        let backend = Arc::new(StubBackend::new(&[]));
        let service = service(backend.clone());

        service.translate_text("Weather", "hi").await;
        let again = service.translate_text_detailed("Weather", "hi").await;

        assert_eq!(again, Translation::new("Weather (hi)", ResolutionSource::Cache));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_language_skips_backend() {
        let backend = Arc::new(StubBackend::new(&[("About", "À propos")]));
        let service = service(backend.clone());

        assert_eq!(service.translate_text("About", "fr").await, "About (fr)");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_disabled_live_translation_uses_dictionary() {
        let backend = Arc::new(StubBackend::new(&[("About", "परिचय")]));
        let service = service(backend.clone()).with_live_translation(false);

        assert_eq!(service.translate_text("About", "hi").await, "X");
        assert_eq!(backend.calls(), 0);
        assert!(!service.is_live());
    }

    #[tokio::test]
    async fn test_clear_cache_forces_new_backend_call() {
        let backend = Arc::new(StubBackend::new(&[("hello", "नमस्ते")]));
        let service = service(backend.clone());

        service.translate_text("hello", "hi").await;
        assert_eq!(service.clear_cache().await, 1);
        service.translate_text("hello", "hi").await;

        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_configured_languages() {
        let backend = Arc::new(StubBackend::new(&[("About", "அறிமுகம்")]));
        let supported = vec!["en".to_string(), "hi".to_string()];
        let service = service(backend.clone()).with_languages("en", &supported);

        assert_eq!(service.translate_text("About", "ta").await, "About (ta)");
        assert_eq!(backend.calls(), 0);
        assert!(service.is_target_language("hi"));
        assert!(!service.is_target_language("ta"));
        assert!(service.is_source_language("en"));
    }

    #[test]
    fn test_annotate() {
        assert_eq!(annotate("Soil", "ta"), "Soil (ta)");
    }
}
