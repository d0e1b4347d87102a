//! Translation backend implementation
//!
//! This service handles the Microsoft Translator v3 API integration,
//! including HTTP client setup, request construction, response parsing
//! and error mapping. Callers never see these errors directly: the
//! translation service routes every failure to its fallback chain.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use crate::config::TranslatorConfig;
use crate::utils::errors::{FarmLiveError, Result, TranslationError, TranslationResult};
use crate::utils::helpers::{truncate_text, MAX_ERROR_BODY};

const BACKEND_NAME: &str = "microsoft-translator";
const API_VERSION: &str = "3.0";

/// A text translation provider
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether credentials are present; unconfigured backends are never called
    fn is_configured(&self) -> bool {
        true
    }

    /// Translate `text` from English into `target_lang`
    async fn translate(&self, text: &str, target_lang: &str) -> TranslationResult<String>;
}

/// Single element of the request body
#[derive(Debug, Clone, Serialize)]
struct TranslateRequestItem<'a> {
    text: &'a str,
}

/// Single element of the response body
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponseItem {
    #[serde(default)]
    pub translations: Vec<TranslatedText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    pub to: Option<String>,
}

/// Microsoft Translator client
#[derive(Debug)]
pub struct MicrosoftTranslator {
    client: Client,
    translate_url: Url,
    api_key: Option<String>,
    region: String,
    credential_warning_logged: AtomicBool,
}

impl MicrosoftTranslator {
    /// Create a new MicrosoftTranslator instance
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FarmLive/1.0")
            .build()
            .map_err(FarmLiveError::Http)?;

        // Url::join drops the last path segment unless the base ends in '/'
        let endpoint = if config.endpoint.ends_with('/') {
            config.endpoint.clone()
        } else {
            format!("{}/", config.endpoint)
        };
        let translate_url = Url::parse(&endpoint)?.join("translate")?;

        Ok(Self {
            client,
            translate_url,
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            region: config.region.clone(),
            credential_warning_logged: AtomicBool::new(false),
        })
    }

    fn parse_response(items: Vec<TranslateResponseItem>) -> TranslationResult<String> {
        let text = items
            .into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|translated| translated.text)
            .ok_or_else(|| {
                TranslationError::MalformedResponse("response has no translations".to_string())
            })?;

        if text.trim().is_empty() {
            return Err(TranslationError::MalformedResponse("empty translation".to_string()));
        }

        Ok(text)
    }
}

#[async_trait]
impl TranslationBackend for MicrosoftTranslator {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn translate(&self, text: &str, target_lang: &str) -> TranslationResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            if !self.credential_warning_logged.swap(true, Ordering::Relaxed) {
                warn!(backend = BACKEND_NAME, "Translator API key not found. Using fallback translations.");
            }
            return Err(TranslationError::CredentialMissing {
                backend: BACKEND_NAME.to_string(),
            });
        };

        debug!(lang = target_lang, chars = text.chars().count(), "Making translator API request");

        let response = self
            .client
            .post(self.translate_url.clone())
            .query(&[("api-version", API_VERSION), ("to", target_lang)])
            .header("Ocp-Apim-Subscription-Key", api_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&[TranslateRequestItem { text }])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::BackendUnavailable("request timed out".to_string())
                } else {
                    TranslationError::BackendUnavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::BackendUnavailable(
                format!("HTTP {}: {}", status, truncate_text(&error_text, MAX_ERROR_BODY))
            ));
        }

        let items: Vec<TranslateResponseItem> = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        Self::parse_response(items)
    }
}
