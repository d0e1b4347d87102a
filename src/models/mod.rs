//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod generative;
pub mod translation;

// Re-export commonly used models
pub use generative::{GenerationOptions, MultimediaContent, KeywordKind};
pub use translation::{TranslatableStructure, CacheKey, ResolutionSource, Translation, CachedTranslation};
