use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::translation::TaggedDocument;
use super::{TranslateOptions, TranslationProvider, Usage};

const FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const PRO_ENDPOINT: &str = "https://api.deepl.com";

/// DeepL client for interacting with the DeepL API
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL, without the `/v2` path
    endpoint: Url,
}

/// Translate response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslateResponse {
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    #[serde(default)]
    pub detected_source_language: Option<String>,
    pub text: String,
}

/// Usage response
#[derive(Debug, Deserialize)]
pub struct DeepLUsageResponse {
    pub character_count: u64,
    pub character_limit: u64,
}

impl std::fmt::Debug for DeepL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepL")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl DeepL {
    /// Create a new DeepL client.
    ///
    /// An empty `endpoint` picks the free or pro API from the key suffix.
    pub fn new(api_key: impl Into<String>, endpoint: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::AuthenticationError("DeepL API key is empty".to_string()));
        }

        let base = if endpoint.trim().is_empty() {
            Self::default_endpoint(&api_key)
        } else {
            endpoint.trim()
        };
        // Trailing slash so `join` appends instead of replacing the last segment
        let endpoint = Url::parse(&format!("{}/", base.trim_end_matches('/')))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid DeepL endpoint '{}': {}", base, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_key, endpoint })
    }

    /// Free-tier keys end in `:fx` and live on a separate host
    pub fn default_endpoint(api_key: &str) -> &'static str {
        if api_key.trim().ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PRO_ENDPOINT
        }
    }

    fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        self.endpoint
            .join(path)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid DeepL URL for {}: {}", path, e)))
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Map a non-success status to the matching provider error
    fn status_error(status: StatusCode, body: String) -> ProviderError {
        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(body),
            429 => ProviderError::RateLimitExceeded(body),
            456 => ProviderError::QuotaExhausted(body),
            code => ProviderError::ApiError { status_code: code, message: body },
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ProviderError> {
        let response = request
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(Self::status_error(status, error_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl TranslationProvider for DeepL {
    async fn translate(
        &self,
        document: &TaggedDocument,
        target_language: &str,
        options: &TranslateOptions,
    ) -> Result<TaggedDocument, ProviderError> {
        let target = language_utils::to_deepl_target_code(target_language)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let mut form: Vec<(&str, String)> = vec![
            ("text", document.to_markup()),
            ("target_lang", target),
            ("tag_handling", "xml".to_string()),
        ];
        if let Some(source) = &options.source_language {
            let source = language_utils::to_deepl_source_code(source)
                .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
            form.push(("source_lang", source));
        }
        if let Some(formality) = options.formality {
            form.push(("formality", formality.as_str().to_string()));
        }

        debug!("Sending {} entries ({} chars) to DeepL", document.len(), document.char_count());

        let url = self.api_url("v2/translate")?;
        let response = self.send(self.client.post(url).form(&form)).await?;
        let body = response.json::<DeepLTranslateResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL response: {}", e)))?;

        let translation = body.translations.into_iter().next()
            .ok_or_else(|| ProviderError::ParseError("DeepL returned no translations".to_string()))?;
        if let Some(detected) = &translation.detected_source_language {
            debug!("DeepL detected source language {}", detected);
        }

        Ok(TaggedDocument::parse(&translation.text)?)
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        let url = self.api_url("v2/usage")?;
        let response = self.send(self.client.get(url)).await?;
        let body = response.json::<DeepLUsageResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL usage: {}", e)))?;

        Ok(Usage {
            used: body.character_count,
            limit: body.character_limit,
        })
    }
}
