//! Supported language codes

use serde::{Deserialize, Serialize};

/// Languages the platform can present content in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Kn,
    Ta,
    Te,
    Ml,
    Gu,
    Mr,
    Pa,
    Bn,
    Ur,
}

impl Language {
    /// Every supported language, source language first
    pub const ALL: [Language; 11] = [
        Language::En,
        Language::Hi,
        Language::Kn,
        Language::Ta,
        Language::Te,
        Language::Ml,
        Language::Gu,
        Language::Mr,
        Language::Pa,
        Language::Bn,
        Language::Ur,
    ];

    /// Language all UI strings are authored in
    pub const SOURCE: Language = Language::En;

    /// Two-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Kn => "kn",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Ml => "ml",
            Language::Gu => "gu",
            Language::Mr => "mr",
            Language::Pa => "pa",
            Language::Bn => "bn",
            Language::Ur => "ur",
        }
    }

    /// Name of the language in its own script
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Kn => "ಕನ್ನಡ",
            Language::Ta => "தமிழ்",
            Language::Te => "తెలుగు",
            Language::Ml => "മലയാളം",
            Language::Gu => "ગુજરાતી",
            Language::Mr => "मराठी",
            Language::Pa => "ਪੰਜਾਬੀ",
            Language::Bn => "বাংলা",
            Language::Ur => "اردو",
        }
    }

    /// Parse a two-letter code; locale suffixes such as `hi-IN` are accepted
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.split(['-', '_']).next().unwrap_or(code);
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Strict check against the two-letter codes, no locale suffixes
    pub fn is_supported(code: &str) -> bool {
        Self::ALL.iter().any(|lang| lang.code() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
