//! Translation data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered field name → value mapping translated by `translate_object`.
///
/// String values and string elements of arrays are translated; everything
/// else passes through untouched.
pub type TranslatableStructure = Map<String, Value>;

/// Cache key: the exact (target language, source text) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub target_lang: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(text: &str, target_lang: &str) -> Self {
        Self {
            target_lang: target_lang.to_string(),
            text: text.to_string(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.target_lang, self.text)
    }
}

/// Which step of the resolution chain produced a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Target is the source language; text returned as-is
    Identity,
    /// Empty or whitespace-only text returned as-is
    Blank,
    Cache,
    Backend,
    DictionaryExact,
    DictionarySubstitution,
    /// Nothing matched; text suffixed with the language code
    Annotated,
}

impl ResolutionSource {
    /// Whether the result of this step is written to the cache
    pub fn is_cacheable(&self) -> bool {
        matches!(
            self,
            ResolutionSource::Backend
                | ResolutionSource::DictionaryExact
                | ResolutionSource::DictionarySubstitution
                | ResolutionSource::Annotated
        )
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionSource::Identity => "identity",
            ResolutionSource::Blank => "blank",
            ResolutionSource::Cache => "cache",
            ResolutionSource::Backend => "backend",
            ResolutionSource::DictionaryExact => "dictionary_exact",
            ResolutionSource::DictionarySubstitution => "dictionary_substitution",
            ResolutionSource::Annotated => "annotated",
        };
        f.write_str(name)
    }
}

/// A resolved translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub source: ResolutionSource,
}

impl Translation {
    pub fn new(text: impl Into<String>, source: ResolutionSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Cached translation with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTranslation {
    pub text: String,
    pub source: ResolutionSource,
    pub cached_at: DateTime<Utc>,
}
