//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `FARMLIVE__TRANSLATOR__API_KEY`
pub const ENV_PREFIX: &str = "FARMLIVE";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub translator: TranslatorConfig,
    pub generative: GenerativeConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Microsoft Translator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslatorConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub region: String,
    pub timeout_seconds: u64,
}

/// Gemini generative API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerativeConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub vision_model: String,
    /// Model for the multimedia explanation and video context calls
    pub educational_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    /// Directory of `<lang>.json` files layered over the built-in fallback tables
    pub fallback_dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub live_translation: bool,
    pub generative_assistant: bool,
}

impl Settings {
    /// Load settings from defaults, configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load settings using the given configuration file name (extension optional)
    pub fn load_from(file_name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("i18n.supported_languages")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FarmLiveError> {
        super::validation::validate_settings(self)
    }

    /// Copy of the settings with API keys masked, for display
    pub fn redacted(&self) -> Self {
        let mut settings = self.clone();
        if settings.translator.api_key.is_some() {
            settings.translator.api_key = Some("***".to_string());
        }
        if settings.generative.api_key.is_some() {
            settings.generative.api_key = Some("***".to_string());
        }
        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig {
                api_key: None,
                endpoint: "https://api.cognitive.microsofttranslator.com/".to_string(),
                region: "global".to_string(),
                timeout_seconds: 10,
            },
            generative: GenerativeConfig {
                api_key: None,
                api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-1.5-pro".to_string(),
                vision_model: "gemini-pro-vision".to_string(),
                educational_model: "gemini-pro".to_string(),
                temperature: 0.7,
                max_output_tokens: 800,
                timeout_seconds: 30,
            },
            i18n: I18nConfig {
                default_language: "en".to_string(),
                supported_languages: crate::i18n::Language::ALL
                    .iter()
                    .map(|lang| lang.code().to_string())
                    .collect(),
                fallback_dir: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
            features: FeaturesConfig {
                live_translation: true,
                generative_assistant: true,
            },
        }
    }
}
