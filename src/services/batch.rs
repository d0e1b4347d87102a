//! Batch translation
//!
//! Translates every leaf of a keyed structure concurrently. All leaf futures
//! are polled together on the calling task, so one batch costs one round of
//! backend latency. Output order follows input order regardless of which
//! request finishes first.

use std::panic::AssertUnwindSafe;
use futures::future::join_all;
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};
use crate::models::TranslatableStructure;
use crate::utils::errors::TranslationError;
use super::translation::TranslationService;

impl TranslationService {
    /// Translate each string field and each string element of array fields.
    ///
    /// Other values, including nested objects and nulls, are passed through.
    /// A leaf whose translation fails keeps its original value; its siblings
    /// are unaffected.
    pub async fn translate_object(
        &self,
        structure: TranslatableStructure,
        target_lang: &str,
    ) -> TranslatableStructure {
        if self.is_source_language(target_lang) || structure.is_empty() {
            return structure;
        }

        let field_count = structure.len();
        let fields = structure.into_iter().map(|(field, value)| async move {
            let translated = self.translate_value(&field, value, target_lang).await;
            (field, translated)
        });

        let translated: TranslatableStructure = join_all(fields).await.into_iter().collect();
        debug!(lang = target_lang, fields = field_count, "Translated structure");
        translated
    }

    /// Translate a list of strings, preserving order and length
    pub async fn translate_texts(&self, texts: Vec<String>, target_lang: &str) -> Vec<String> {
        if self.is_source_language(target_lang) {
            return texts;
        }

        let leaves = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| async move {
                self.translate_leaf(&index.to_string(), text, target_lang).await
            });
        join_all(leaves).await
    }

    async fn translate_value(&self, field: &str, value: Value, target_lang: &str) -> Value {
        match value {
            Value::String(text) => Value::String(self.translate_leaf(field, text, target_lang).await),
            Value::Array(items) => {
                let items = items.into_iter().map(|item| async move {
                    match item {
                        Value::String(text) => Value::String(self.translate_leaf(field, text, target_lang).await),
                        other => other,
                    }
                });
                Value::Array(join_all(items).await)
            }
            other => other,
        }
    }

    async fn translate_leaf(&self, field: &str, text: String, target_lang: &str) -> String {
        let outcome = AssertUnwindSafe(self.translate_text(&text, target_lang))
            .catch_unwind()
            .await;

        match outcome {
            Ok(translated) => translated,
            Err(_) => {
                let error = TranslationError::PartialBatchFailure { field: field.to_string() };
                warn!(lang = target_lang, error = %error, "Keeping original value");
                text
            }
        }
    }
}
