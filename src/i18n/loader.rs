//! Fallback dictionary loading and lookup
//!
//! The fallback dictionary holds precomputed translations of the fixed UI
//! vocabulary, keyed by target language. It is used when the live translation
//! backend cannot produce a result. Built-in tables are compiled into the
//! binary; a directory of `<lang>.json` files can extend or override them at
//! startup. Once constructed the dictionary is never mutated.

use std::collections::HashMap;
use std::path::Path;
use regex::{NoExpand, Regex, RegexBuilder};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::config::I18nConfig;
use crate::i18n::Language;
use crate::utils::errors::{FarmLiveError, Result};

/// Built-in tables, in the order they are registered
const BUILTIN_TABLES: [(&str, &str); 5] = [
    ("hi", include_str!("../../translations/hi.json")),
    ("kn", include_str!("../../translations/kn.json")),
    ("ta", include_str!("../../translations/ta.json")),
    ("te", include_str!("../../translations/te.json")),
    ("ml", include_str!("../../translations/ml.json")),
];

/// A single English phrase and its localized form
#[derive(Debug, Clone)]
struct PhraseRule {
    phrase: String,
    translation: String,
    pattern: Regex,
}

impl PhraseRule {
    fn new(phrase: &str, translation: &str) -> Result<Self> {
        // ASCII word boundary: a phrase touching non-Latin script still matches
        let pattern = RegexBuilder::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(phrase)))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            phrase: phrase.to_string(),
            translation: translation.to_string(),
            pattern,
        })
    }
}

/// Phrase rules for one target language, in registration order
#[derive(Debug, Clone, Default)]
struct LanguageTable {
    rules: Vec<PhraseRule>,
    index: HashMap<String, usize>,
}

impl LanguageTable {
    fn insert(&mut self, phrase: &str, translation: &str) -> Result<()> {
        let rule = PhraseRule::new(phrase, translation)?;
        match self.index.get(phrase) {
            Some(&position) => self.rules[position] = rule,
            None => {
                self.index.insert(phrase.to_string(), self.rules.len());
                self.rules.push(rule);
            }
        }
        Ok(())
    }

    fn exact(&self, text: &str) -> Option<&str> {
        self.index
            .get(text)
            .map(|&position| self.rules[position].translation.as_str())
    }
}

/// Static per-language phrase tables used as the translation fallback
#[derive(Debug, Clone, Default)]
pub struct FallbackDictionary {
    tables: HashMap<String, LanguageTable>,
}

impl FallbackDictionary {
    /// Create a dictionary with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a dictionary from the tables shipped with the crate
    pub fn builtin() -> Result<Self> {
        let mut dictionary = Self::empty();
        for (lang_code, content) in BUILTIN_TABLES {
            let map = parse_table(content, lang_code)?;
            dictionary.merge_map(lang_code, &map)?;
        }
        Ok(dictionary)
    }

    /// Build the dictionary described by the i18n configuration
    pub async fn from_config(config: &I18nConfig) -> Result<Self> {
        let mut dictionary = Self::builtin()?;
        if let Some(dir) = &config.fallback_dir {
            dictionary.load_dir(Path::new(dir)).await?;
        }
        Ok(dictionary)
    }

    /// Register phrases for a language, keeping their order
    pub fn with_phrases(mut self, lang_code: &str, phrases: &[(&str, &str)]) -> Result<Self> {
        let table = self.tables.entry(lang_code.to_string()).or_default();
        for (phrase, translation) in phrases {
            table.insert(phrase, translation)?;
        }
        Ok(self)
    }

    /// Layer every `<lang>.json` file in `dir` over the current tables
    pub async fn load_dir(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            warn!("Fallback dictionary directory not found: {}", dir.display());
            return Ok(());
        }

        let mut entries = fs::read_dir(dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(path);
            }
        }
        // Directory iteration order is platform dependent
        files.sort();

        for path in files {
            let Some(lang_code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(&path).await?;
            let map = parse_table(&content, lang_code)?;
            self.merge_map(lang_code, &map)?;
            info!("Loaded fallback translations for language: {}", lang_code);
        }

        Ok(())
    }

    fn merge_map(&mut self, lang_code: &str, map: &Map<String, Value>) -> Result<()> {
        let table = self.tables.entry(lang_code.to_string()).or_default();
        for (phrase, value) in map {
            match value {
                Value::String(translation) => table.insert(phrase, translation)?,
                _ => warn!(lang = lang_code, phrase = %phrase, "Skipping non-string fallback entry"),
            }
        }
        debug!("Fallback table for {} now has {} phrases", lang_code, table.rules.len());
        Ok(())
    }

    /// Check whether any phrases exist for a language
    pub fn has_language(&self, lang_code: &str) -> bool {
        self.tables.contains_key(lang_code)
    }

    /// Verbatim lookup of `text` under `lang_code`
    pub fn exact(&self, lang_code: &str, text: &str) -> Option<&str> {
        self.tables.get(lang_code)?.exact(text)
    }

    /// Replace whole-word occurrences of every registered phrase in `text`.
    ///
    /// Phrases are applied in registration order, each to the output of the
    /// previous one. Returns `None` when nothing matched.
    pub fn substitute(&self, lang_code: &str, text: &str) -> Option<String> {
        let table = self.tables.get(lang_code)?;
        let mut result = text.to_string();

        for rule in &table.rules {
            if rule.pattern.is_match(&result) {
                result = rule
                    .pattern
                    .replace_all(&result, NoExpand(&rule.translation))
                    .into_owned();
            }
        }

        (result != text).then_some(result)
    }

    /// Iterate over the registered phrases of a language, in order
    pub fn phrases<'a>(&'a self, lang_code: &str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.tables
            .get(lang_code)
            .into_iter()
            .flat_map(|table| table.rules.iter())
            .map(|rule| (rule.phrase.as_str(), rule.translation.as_str()))
    }

    /// Get dictionary statistics
    pub fn get_stats(&self) -> DictionaryStats {
        let mut languages: Vec<LanguageStats> = self
            .tables
            .iter()
            .map(|(code, table)| LanguageStats {
                code: code.clone(),
                native_name: Language::from_code(code).map(|lang| lang.native_name()),
                phrase_count: table.rules.len(),
            })
            .collect();
        languages.sort_by(|a, b| a.code.cmp(&b.code));

        DictionaryStats {
            total_phrases: languages.iter().map(|lang| lang.phrase_count).sum(),
            languages,
        }
    }
}

fn parse_table(content: &str, lang_code: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(content)? {
        Value::Object(map) => Ok(map),
        _ => Err(FarmLiveError::Config(
            format!("Invalid fallback dictionary format for {}", lang_code)
        )),
    }
}

/// Dictionary statistics
#[derive(Debug, Clone)]
pub struct DictionaryStats {
    pub languages: Vec<LanguageStats>,
    pub total_phrases: usize,
}

/// Language-specific statistics
#[derive(Debug, Clone)]
pub struct LanguageStats {
    pub code: String,
    /// `None` for tables loaded under a code outside the supported set
    pub native_name: Option<&'static str>,
    pub phrase_count: usize,
}
