//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::i18n::Language;
use crate::utils::errors::{FarmLiveError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_translator_config(&settings.translator)?;
    validate_generative_config(&settings.generative)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate translator configuration
///
/// A missing API key is not an error: translation then runs on the fallback
/// dictionary alone.
fn validate_translator_config(config: &super::TranslatorConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(FarmLiveError::Config(
            "Translator endpoint is required".to_string()
        ));
    }

    url::Url::parse(&config.endpoint).map_err(|e| {
        FarmLiveError::Config(format!("Invalid translator endpoint '{}': {}", config.endpoint, e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(FarmLiveError::Config(
            "Translator timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate generative API configuration
fn validate_generative_config(config: &super::GenerativeConfig) -> Result<()> {
    url::Url::parse(&config.api_url).map_err(|e| {
        FarmLiveError::Config(format!("Invalid generative API URL '{}': {}", config.api_url, e))
    })?;

    if config.model.is_empty() || config.vision_model.is_empty() || config.educational_model.is_empty() {
        return Err(FarmLiveError::Config(
            "Generative model names are required".to_string()
        ));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(FarmLiveError::Config(
            format!("Temperature must be between 0.0 and 2.0, got {}", config.temperature)
        ));
    }

    if config.max_output_tokens == 0 {
        return Err(FarmLiveError::Config(
            "Max output tokens must be greater than 0".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(FarmLiveError::Config(
            "Generative API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(FarmLiveError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(FarmLiveError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(FarmLiveError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    for code in &config.supported_languages {
        if !Language::is_supported(code) {
            return Err(FarmLiveError::Config(
                format!("Unknown language code in supported languages: {}", code)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FarmLiveError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FarmLiveError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
