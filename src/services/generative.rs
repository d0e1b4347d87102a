//! Gemini generative content service implementation
//!
//! This service handles the Gemini `generateContent` API integration used by
//! the assistant surfaces: plain text generation, plant image analysis,
//! multimedia-oriented explanations and video context summaries.

use std::time::Duration;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info, warn};
use crate::config::GenerativeConfig;
use crate::models::generative::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, SafetySetting,
};
use crate::models::{GenerationOptions, KeywordKind, MultimediaContent};
use crate::utils::errors::{FarmLiveError, GenerativeError, GenerativeResult, Result};
use crate::utils::helpers::{truncate_text, MAX_ERROR_BODY};

const BACKEND_NAME: &str = "gemini";
const MAX_KEYWORDS: usize = 5;

/// A text (and image) generation provider
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether an API key is present
    fn is_configured(&self) -> bool {
        true
    }

    /// Options used when the caller has no preference
    fn default_options(&self) -> GenerationOptions;

    /// Generate text for `prompt`
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenerativeResult<String>;

    /// Describe a base64-encoded JPEG according to `prompt`
    async fn analyze_image(&self, image_base64: &str, prompt: &str) -> GenerativeResult<String>;
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiService {
    client: Client,
    config: GenerativeConfig,
}

impl GeminiService {
    /// Create a new GeminiService instance
    pub fn new(config: &GenerativeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("FarmLive/1.0")
            .build()
            .map_err(FarmLiveError::Http)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn api_key(&self) -> GenerativeResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerativeError::CredentialMissing {
                backend: BACKEND_NAME.to_string(),
            })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            model
        )
    }

    /// Generate text using explicit options
    pub async fn generate_content(&self, prompt: &str, options: &GenerationOptions) -> GenerativeResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part::text(prompt)] }],
            safety_settings: Vec::new(),
            generation_config: GenerationConfig::from(options),
        };
        self.send(&options.model, &request).await
    }

    /// Generate an educational explanation plus video and image search terms
    pub async fn generate_multimedia_content(&self, query: &str) -> GenerativeResult<MultimediaContent> {
        let options = self
            .default_options()
            .with_model(self.config.educational_model.clone())
            .with_temperature(0.7)
            .with_max_output_tokens(4096)
            .with_sampling(0.95, 40);

        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part::text(multimedia_prompt(query))] }],
            safety_settings: SafetySetting::standard(),
            generation_config: GenerationConfig::from(&options),
        };

        let text_content = self.send(&options.model, &request).await?;
        let video_keywords = extract_keywords(&text_content, KeywordKind::Video);
        let image_keywords = extract_keywords(&text_content, KeywordKind::Image);

        info!(
            video_keywords = video_keywords.len(),
            image_keywords = image_keywords.len(),
            "Generated multimedia content"
        );

        Ok(MultimediaContent {
            text_content,
            video_keywords,
            image_keywords,
        })
    }

    /// Explain how a video relates to the user's original question
    pub async fn analyze_video_content(&self, video_transcript: &str, query: &str) -> GenerativeResult<String> {
        let options = self
            .default_options()
            .with_model(self.config.educational_model.clone())
            .with_temperature(0.4)
            .with_max_output_tokens(1024)
            .with_sampling(0.95, 40);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(video_context_prompt(video_transcript, query))],
            }],
            safety_settings: Vec::new(),
            generation_config: GenerationConfig::from(&options),
        };

        self.send(&options.model, &request).await
    }

    async fn send(&self, model: &str, request: &GenerateContentRequest) -> GenerativeResult<String> {
        let api_key = self.api_key()?;
        let url = self.endpoint(model);

        debug!(model = model, "Making Gemini API request");

        let response = self
            .client
            .post(url.as_str())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerativeError::Timeout
                } else {
                    GenerativeError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerativeError::RequestFailed(
                format!("HTTP {}: {}", status, truncate_text(&error_text, MAX_ERROR_BODY))
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerativeError::InvalidResponse(e.to_string()))?;

        match body.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!(model = model, "Unexpected Gemini API response format");
                Err(GenerativeError::InvalidResponse(
                    "response has no candidate text".to_string()
                ))
            }
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiService {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }

    fn default_options(&self) -> GenerationOptions {
        GenerationOptions::from_config(&self.config)
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenerativeResult<String> {
        self.generate_content(prompt, options).await
    }

    async fn analyze_image(&self, image_base64: &str, prompt: &str) -> GenerativeResult<String> {
        let data = strip_data_uri(image_base64);
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| GenerativeError::InvalidInput(format!("image is not valid base64: {}", e)))?;

        let options = self
            .default_options()
            .with_model(self.config.vision_model.clone())
            .with_temperature(0.4)
            .with_max_output_tokens(2048)
            .with_sampling(0.95, 40);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), Part::jpeg(data)],
            }],
            safety_settings: SafetySetting::standard(),
            generation_config: GenerationConfig::from(&options),
        };

        self.send(&options.model, &request).await
    }
}

/// Drop a `data:<mime>;base64,` header if present
pub fn strip_data_uri(image: &str) -> &str {
    if image.starts_with("data:") {
        if let Some((_, data)) = image.split_once(',') {
            return data;
        }
    }
    image
}

fn multimedia_prompt(query: &str) -> String {
    format!(
        "Generate a comprehensive, educational response about the following agricultural topic: \"{}\"\n\n\
         Format your response to include:\n\
         1. A detailed explanation suitable for farmers and agricultural professionals\n\
         2. Key points that would be important to visualize in images or videos\n\
         3. Specific topics that would benefit from video demonstrations\n\
         4. Practical implementation steps\n\
         5. Regional considerations for India, if applicable\n\n\
         Keep the response informative, practical, and focused on sustainable farming practices.",
        query
    )
}

fn video_context_prompt(video_transcript: &str, query: &str) -> String {
    format!(
        "Given this video transcript or description about agriculture: \"{}\"\n\n\
         And the user's original query: \"{}\"\n\n\
         Provide a concise educational context that explains:\n\
         1. How this video relates to the user's query\n\
         2. Key educational points covered in the video\n\
         3. How a farmer could apply this information practically\n\n\
         Keep your response under 200 words and focus on practical agricultural knowledge.",
        video_transcript, query
    )
}

/// Pull up to five media search terms out of generated text.
///
/// List items are collected from sections that talk about the requested
/// media kind; a heading or blank line ends a section. When no list item is
/// found, short phrases around kind-specific terms are used instead.
pub fn extract_keywords(text: &str, kind: KeywordKind) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let demonstration = format!("{} demonstration", kind.as_str());
    let plural = format!("{}s", kind.as_str());
    let mut in_relevant_section = false;

    for line in text.lines() {
        let lower = line.to_lowercase();
        if lower.contains(&demonstration)
            || lower.contains(&plural)
            || lower.contains("visual")
            || lower.contains("demonstrate")
            || lower.contains("show")
        {
            in_relevant_section = true;
        }

        if in_relevant_section {
            if let Some(item) = list_item(line) {
                let keyword = item.trim();
                if keyword.chars().count() > 3 && !keywords.iter().any(|k| k == keyword) {
                    keywords.push(keyword.to_string());
                }
            }
        }

        if is_heading(line) || line.is_empty() {
            in_relevant_section = false;
        }
    }

    if keywords.is_empty() {
        for term in kind.fallback_terms() {
            let Ok(pattern) = regex::Regex::new(&format!(r"(?i)\b(\w+\s+){{0,3}}{}(\s+\w+){{0,3}}", term)) else {
                continue;
            };
            for found in pattern.find_iter(text) {
                let phrase = found.as_str().trim();
                if phrase.len() > term.len() && !keywords.iter().any(|k| k == phrase) {
                    keywords.push(phrase.to_string());
                }
            }
        }
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Text of a `*`/`-`/`•` bullet or `1.` numbered line
fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();

    let rest = if let Some(rest) = trimmed
        .strip_prefix('*')
        .or_else(|| trimmed.strip_prefix('-'))
        .or_else(|| trimmed.strip_prefix('•'))
    {
        rest
    } else {
        let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        trimmed[digits..].strip_prefix('.')?
    };

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let item = rest.trim();
    (!item.is_empty()).then_some(item)
}

/// Markdown heading of level 1 to 6
fn is_heading(line: &str) -> bool {
    let hashes = line.len() - line.trim_start_matches('#').len();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(char::is_whitespace)
}
