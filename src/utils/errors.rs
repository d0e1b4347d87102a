//! Error handling for FarmLive
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for FarmLive application
#[derive(Error, Debug)]
pub enum FarmLiveError {
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Generative AI error: {0}")]
    Generative(#[from] GenerativeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid fallback phrase pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Translation backend errors
///
/// None of these reach callers of the translation service; they are routed
/// to the fallback chain and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("No credentials configured for {backend}")]
    CredentialMissing { backend: String },

    #[error("Translation backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("No fallback translation for language {language}")]
    NoFallbackMatch { language: String },

    #[error("Translation of field '{field}' failed")]
    PartialBatchFailure { field: String },
}

/// Generative content API specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerativeError {
    #[error("No API key configured for {backend}")]
    CredentialMissing { backend: String },

    #[error("Generative API request failed: {0}")]
    RequestFailed(String),

    #[error("Generative API timeout")]
    Timeout,

    #[error("Invalid generative API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid generative request: {0}")]
    InvalidInput(String),
}

/// Result type alias for FarmLive operations
pub type Result<T> = std::result::Result<T, FarmLiveError>;

/// Result type alias for translation backend operations
pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

/// Result type alias for generative API operations
pub type GenerativeResult<T> = std::result::Result<T, GenerativeError>;

impl FarmLiveError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            FarmLiveError::Translation(e) => e.is_recoverable(),
            FarmLiveError::Generative(e) => e.is_recoverable(),
            FarmLiveError::Config(_) => false,
            FarmLiveError::ConfigLoad(_) => false,
            FarmLiveError::Http(_) => true,
            FarmLiveError::Serialization(_) => false,
            FarmLiveError::Io(_) => true,
            FarmLiveError::UrlParse(_) => false,
            FarmLiveError::Pattern(_) => false,
            FarmLiveError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FarmLiveError::Config(_) => ErrorSeverity::Critical,
            FarmLiveError::ConfigLoad(_) => ErrorSeverity::Critical,
            FarmLiveError::Pattern(_) => ErrorSeverity::Critical,
            FarmLiveError::Translation(_) => ErrorSeverity::Warning,
            FarmLiveError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl TranslationError {
    /// Credential problems persist for the whole session; everything else may
    /// succeed on the next call.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TranslationError::CredentialMissing { .. })
    }
}

impl GenerativeError {
    /// Check if retrying the request could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GenerativeError::RequestFailed(_) | GenerativeError::Timeout
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
