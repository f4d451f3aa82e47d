/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scriptable provider that simulates different behaviors:
 * - `MockProvider::working()` - Translates every entry with a prefix
 * - `MockProvider::dropping(ids)` - Omits the listed entries from its answer
 * - `MockProvider::malformed()` - Fails as if the answer could not be parsed
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::empty()` - Answers with a document holding no entries
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::{DocumentError, ProviderError};
use crate::translation::TaggedDocument;
use super::{TranslateOptions, TranslationProvider, Usage};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing each entry with the target language
    Working,
    /// Succeeds but leaves out the entries with these ids
    Dropping(Vec<usize>),
    /// Answers with something that is not a tagged document
    Malformed,
    /// Always fails with an error
    Failing,
    /// Returns a document with no entries at all
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Reported usage; `None` makes the usage query fail
    usage: Option<Usage>,
    /// Number of translate calls, shared between clones
    translate_calls: Arc<AtomicUsize>,
    /// Number of usage calls, shared between clones
    usage_calls: Arc<AtomicUsize>,
    /// Custom per-entry translation (optional)
    custom_translation: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            usage: Some(Usage { used: 0, limit: 500_000 }),
            translate_calls: Arc::new(AtomicUsize::new(0)),
            usage_calls: Arc::new(AtomicUsize::new(0)),
            custom_translation: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that omits the given ids from its answer
    pub fn dropping(ids: Vec<usize>) -> Self {
        Self::new(MockBehavior::Dropping(ids))
    }

    /// Create a mock whose answers cannot be parsed
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns an empty document
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Report this usage from `usage()`
    pub fn with_usage(mut self, used: u64, limit: u64) -> Self {
        self.usage = Some(Usage { used, limit });
        self
    }

    /// Make `usage()` fail
    pub fn with_failing_usage(mut self) -> Self {
        self.usage = None;
        self
    }

    /// Set a custom per-entry translation
    pub fn with_custom_translation(mut self, translate: fn(&str) -> String) -> Self {
        self.custom_translation = Some(translate);
        self
    }

    /// How many times `translate` has been called
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// How many times `usage` has been called
    pub fn usage_calls(&self) -> usize {
        self.usage_calls.load(Ordering::SeqCst)
    }

    fn translate_entries(&self, document: &TaggedDocument, target_language: &str, skip: &[usize]) -> TaggedDocument {
        let mut translated = TaggedDocument::default();
        for entry in document.entries.iter().filter(|e| !skip.contains(&e.id)) {
            let text = match self.custom_translation {
                Some(translate) => translate(&entry.text),
                None => format!("[{}] {}", target_language, entry.text),
            };
            translated.push(entry.id, text);
        }
        translated
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            usage: self.usage,
            translate_calls: Arc::clone(&self.translate_calls),
            usage_calls: Arc::clone(&self.usage_calls),
            custom_translation: self.custom_translation,
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        document: &TaggedDocument,
        target_language: &str,
        _options: &TranslateOptions,
    ) -> Result<TaggedDocument, ProviderError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(self.translate_entries(document, target_language, &[])),

            MockBehavior::Dropping(ids) => Ok(self.translate_entries(document, target_language, ids)),

            MockBehavior::Malformed => {
                // Truncated document, rejected by the real parser
                let garbage = format!("<subtitles><subtitle id='1'>{}", target_language);
                Err(TaggedDocument::parse(&garbage)
                    .err()
                    .unwrap_or_else(|| DocumentError::new("unterminated document"))
                    .into())
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(TaggedDocument::default()),
        }
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        self.usage_calls.fetch_add(1, Ordering::SeqCst);
        self.usage
            .ok_or_else(|| ProviderError::ConnectionError("Simulated usage query failure".to_string()))
    }
}
