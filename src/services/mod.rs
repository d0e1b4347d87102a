//! Services module
//!
//! This module contains the translation, generative and assistant services

pub mod assistant;
pub mod batch;
pub mod cache;
pub mod generative;
pub mod translation;
pub mod translator;

// Re-export commonly used services
pub use assistant::AssistantService;
pub use cache::{TranslationCache, CacheStats};
pub use generative::{GeminiService, GenerativeBackend, extract_keywords};
pub use translation::{TranslationService, Strategy, RESOLUTION_CHAIN};
pub use translator::{MicrosoftTranslator, TranslationBackend};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::i18n::FallbackDictionary;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub translation_service: TranslationService,
    pub gemini_service: Arc<GeminiService>,
    pub assistant_service: AssistantService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized.
    ///
    /// The translation cache is created here, once, and shared by every
    /// service that translates.
    pub fn new(settings: &Settings, dictionary: FallbackDictionary) -> Result<Self> {
        let translation_service = TranslationService::from_settings(settings, Arc::new(dictionary))?;
        let gemini_service = Arc::new(GeminiService::new(&settings.generative)?);
        let assistant_service = AssistantService::new(gemini_service.clone(), translation_service.clone())
            .with_generation(settings.features.generative_assistant);

        Ok(Self {
            translation_service,
            gemini_service,
            assistant_service,
        })
    }

    /// Build the fallback dictionary from configuration, then all services
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let dictionary = FallbackDictionary::from_config(&settings.i18n).await?;
        Self::new(settings, dictionary)
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let cache_stats = self.translation_service.cache_stats().await;

        ServiceHealthStatus {
            translator_configured: self.translation_service.is_live(),
            generative_configured: self.gemini_service.is_configured(),
            fallback_languages: self.translation_service.dictionary().get_stats().languages.len(),
            cached_translations: cache_stats.total_entries,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub translator_configured: bool,
    pub generative_configured: bool,
    pub fallback_languages: usize,
    pub cached_translations: u64,
}

impl ServiceHealthStatus {
    /// Translation needs at least one source beyond the annotated passthrough
    pub fn is_healthy(&self) -> bool {
        self.translator_configured || self.fallback_languages > 0
    }

    /// Get list of degraded services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.translator_configured {
            issues.push("Translator API key missing, using fallback translations".to_string());
        }
        if !self.generative_configured {
            issues.push("Gemini API key missing, using canned assistant responses".to_string());
        }
        if self.fallback_languages == 0 {
            issues.push("Fallback dictionary is empty".to_string());
        }

        issues
    }
}
