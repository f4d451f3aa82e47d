/*!
 * Scripted providers for tests that need control over the raw response.
 *
 * `MockProvider` from the library covers canned behaviors; the provider here
 * answers with literal markup and records the request it was given.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use subsentence::errors::ProviderError;
use subsentence::providers::{TranslateOptions, TranslationProvider, Usage};
use subsentence::translation::TaggedDocument;

/// Answers every translate call with the same markup
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    /// Raw markup returned as the translation
    response: String,
    /// Usage reported to the quota check
    usage: Usage,
    /// Last request seen, as markup
    last_request: Arc<Mutex<Option<String>>>,
    /// Options sent with the last request
    last_options: Arc<Mutex<Option<TranslateOptions>>>,
}

impl ScriptedProvider {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            usage: Usage { used: 0, limit: 500_000 },
            last_request: Arc::new(Mutex::new(None)),
            last_options: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_request(&self) -> Option<String> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn last_options(&self) -> Option<TranslateOptions> {
        self.last_options.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    async fn translate(
        &self,
        document: &TaggedDocument,
        _target_language: &str,
        options: &TranslateOptions,
    ) -> Result<TaggedDocument, ProviderError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(document.to_markup());
        }
        if let Ok(mut guard) = self.last_options.lock() {
            *guard = Some(options.clone());
        }
        Ok(TaggedDocument::parse(&self.response)?)
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        Ok(self.usage)
    }
}
