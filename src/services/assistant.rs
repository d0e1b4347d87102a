//! Farming assistant service
//!
//! Answers farmer questions with the generative backend and localizes the
//! answer through the translation service. When generation fails, a canned
//! answer matched on keywords is used instead.

use std::sync::Arc;
use rand::seq::SliceRandom;
use tracing::{info, warn};
use crate::utils::errors::{FarmLiveError, GenerativeError, GenerativeResult, Result};
use crate::utils::helpers::normalize_whitespace;
use super::generative::GenerativeBackend;
use super::translation::TranslationService;

const PLANT_ANALYSIS_PROMPT: &str = "Analyze this plant image and provide details about: \
    1) Plant species identification, 2) Detection of any diseases, pests, or nutrient deficiencies, \
    3) Recommended treatments or actions. Focus on information relevant for farmers.";

const ERROR_MESSAGE: &str = "Sorry, I'm having trouble processing your request. Please try again.";

/// Keyword rules checked in order against the lowercased message
const KEYWORD_RESPONSES: [(&[&str], &str); 4] = [
    (
        &["rust", "fungus"],
        "Leaf rust can be treated with fungicides containing propiconazole or tebuconazole. \
         Also ensure proper plant spacing for air circulation.",
    ),
    (
        &["soil", "crop"],
        "For optimal crop selection, I'll need to know your soil type. Clay soils work well \
         for wheat or barley, while sandy soils are better for millet or peanuts.",
    ),
    (
        &["weather", "rain"],
        "Our weather prediction system indicates a 60% chance of rain in the next 3 days. \
         You might want to delay irrigation if rain is expected.",
    ),
    (
        &["price", "market"],
        "Current market trends show wheat prices at ₹2,150 per quintal in your region, \
         with a predicted 5% increase next month.",
    ),
];

/// Answers used when no keyword rule matches
pub const GENERIC_RESPONSES: [&str; 4] = [
    "Based on my analysis, I recommend checking your soil pH levels as a first step.",
    "This appears to be a nutrient deficiency. Have you considered adding organic compost?",
    "Our pest database suggests this might be a common seasonal issue. Regular monitoring is advised.",
    "I'm checking the latest farming data for your region to give you the most accurate advice.",
];

/// Farming assistant
#[derive(Clone)]
pub struct AssistantService {
    generative: Arc<dyn GenerativeBackend>,
    translation: TranslationService,
    enabled: bool,
}

impl AssistantService {
    /// Create a new AssistantService instance
    pub fn new(generative: Arc<dyn GenerativeBackend>, translation: TranslationService) -> Self {
        Self {
            generative,
            translation,
            enabled: true,
        }
    }

    /// Enable or disable calls to the generative backend
    pub fn with_generation(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Answer `message` in `lang`
    pub async fn respond(&self, message: &str, lang: &str) -> Result<String> {
        let message = normalize_whitespace(message);
        if message.is_empty() {
            return Err(FarmLiveError::InvalidInput("message must not be empty".to_string()));
        }

        let answer = match self.generate_answer(&message).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(backend = self.generative.name(), error = %e, "Using fallback assistant response");
                fallback_response(&message).to_string()
            }
        };

        Ok(self.translation.translate_text(&answer, lang).await)
    }

    async fn generate_answer(&self, message: &str) -> GenerativeResult<String> {
        if !self.enabled {
            return Err(GenerativeError::RequestFailed(
                "generative assistant disabled".to_string()
            ));
        }

        let options = self
            .generative
            .default_options()
            .with_temperature(0.4)
            .with_max_output_tokens(250);

        self.generative.generate(&assistant_prompt(message), &options).await
    }

    /// Analyze a plant photo and describe it in `lang`
    pub async fn analyze_plant_image(&self, image_base64: &str, lang: &str) -> Result<String> {
        let analysis = self
            .generative
            .analyze_image(image_base64, PLANT_ANALYSIS_PROMPT)
            .await?;

        info!(lang = lang, "Plant image analyzed");
        Ok(self.translation.translate_text(&analysis, lang).await)
    }

    /// Apology shown when a request could not be handled
    pub async fn error_message(&self, lang: &str) -> String {
        self.translation.translate_text(ERROR_MESSAGE, lang).await
    }
}

fn assistant_prompt(message: &str) -> String {
    format!(
        "You are an AI farming assistant for FarmLive Innovations. The user is asking: \"{}\". \n\
         Provide helpful, accurate information about farming, agriculture, crop management, pest control, or related topics.\n\
         Focus on sustainable farming practices and localized solutions for Indian farmers.\n\
         Keep your answer concise (under 150 words) and friendly.",
        message
    )
}

/// Canned answer for `message`, by keyword or at random
pub fn fallback_response(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    KEYWORD_RESPONSES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(_, response)| *response)
        .unwrap_or_else(|| {
            GENERIC_RESPONSES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(GENERIC_RESPONSES[0])
        })
}
