/*!
 * Error types for the subsentence application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;
use thiserror::Error;

/// A tagged document could not be read back from its markup form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed tagged document: {reason}")]
pub struct DocumentError {
    /// What was wrong with the document
    pub reason: String,
}

impl DocumentError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The account's character allowance is used up
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    /// The provider answered, but not with a well-formed tagged document
    #[error("Provider returned an unusable document: {0}")]
    MalformedDocument(#[from] DocumentError),
}

/// Errors that can occur while reading a cue stream
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The source holds no cues at all
    #[error("Subtitle source contains no cues")]
    EmptySource,

    /// The source cannot be read as ordered timed cues
    #[error("Malformed subtitle source at line {line}: {reason}")]
    MalformedSource {
        /// 1-based line where parsing gave up
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// The source could not be read from disk
    #[error("Failed to read subtitle source: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a translation pass
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No cues to translate
    #[error("Subtitle source contains no cues")]
    EmptySource,

    /// Cue stream could not be parsed or violates ordering
    #[error("Malformed subtitle source: {0}")]
    MalformedSource(String),

    /// Provider usage is at or above its limit
    #[error("Translation quota exceeded: {used}/{limit} characters used")]
    QuotaExceeded {
        /// Characters already consumed
        used: u64,
        /// Account limit
        limit: u64,
    },

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// The translated document could not be parsed
    #[error("Failed to parse translated document: {0}")]
    ResponseParse(DocumentError),
}

impl From<ProviderError> for TranslationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::MalformedDocument(e) => Self::ResponseParse(e),
            other => Self::Provider(other),
        }
    }
}

impl From<DocumentError> for TranslationError {
    fn from(error: DocumentError) -> Self {
        Self::ResponseParse(error)
    }
}

impl From<SubtitleError> for TranslationError {
    fn from(error: SubtitleError) -> Self {
        match error {
            SubtitleError::EmptySource => Self::EmptySource,
            other => Self::MalformedSource(other.to_string()),
        }
    }
}

/// Non-fatal conditions reported alongside a finished pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationWarning {
    /// No usable translation came back for the sentence starting at this cue
    MissingTranslationFor(usize),

    /// Provider usage crossed 90% of the limit
    QuotaNearlyExhausted {
        used: u64,
        limit: u64,
    },
}

impl fmt::Display for TranslationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTranslationFor(id) => {
                write!(f, "No translated text found for subtitle starting at index {}", id)
            }
            Self::QuotaNearlyExhausted { used, limit } => {
                write!(f, "Provider usage at {}/{} characters", used, limit)
            }
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
