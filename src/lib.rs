//! FarmLive translation and assistant services
//!
//! Localizes farming content into Indian languages through a cached
//! dispatcher that prefers a live machine-translation backend and falls back
//! to bundled phrase tables. A Gemini-backed farming assistant answers
//! questions in the farmer's language.

#![allow(non_snake_case)]

pub mod config;
pub mod i18n;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FarmLiveError, Result};

// Re-export main components for easy access
pub use i18n::{FallbackDictionary, Language};
pub use models::{ResolutionSource, TranslatableStructure, Translation};
pub use services::{ServiceFactory, TranslationCache, TranslationService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
