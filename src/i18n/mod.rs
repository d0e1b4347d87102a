//! Internationalization module
//!
//! This module holds the supported language set and the static fallback
//! dictionary that the translation service degrades to when the live
//! translation backend is unavailable.

pub mod languages;
pub mod loader;

// Re-export commonly used i18n components
pub use languages::Language;
pub use loader::{FallbackDictionary, DictionaryStats, LanguageStats};
