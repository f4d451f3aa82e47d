/*!
 * Translation provider capability and its implementations.
 *
 * - `deepl`: DeepL API adapter
 * - `mock`: Scriptable provider for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::str::FromStr;

use crate::errors::ProviderError;
use crate::translation::TaggedDocument;

/// Requested register of the translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Default,
    More,
    Less,
    PreferMore,
    #[default]
    PreferLess,
}

impl Formality {
    /// Wire value understood by the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::More => "more",
            Self::Less => "less",
            Self::PreferMore => "prefer_more",
            Self::PreferLess => "prefer_less",
        }
    }
}

impl std::fmt::Display for Formality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Self::Default),
            "more" => Ok(Self::More),
            "less" => Ok(Self::Less),
            "prefer_more" => Ok(Self::PreferMore),
            "prefer_less" => Ok(Self::PreferLess),
            _ => Err(anyhow::anyhow!("Invalid formality: {}", s)),
        }
    }
}

/// Per-request translation options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Source language code; `None` lets the provider detect it
    pub source_language: Option<String>,
    pub formality: Option<Formality>,
}

/// Character usage reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used: u64,
    pub limit: u64,
}

impl Usage {
    /// Nothing left to spend (a zero limit counts as exhausted)
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Fraction of the limit consumed
    pub fn ratio(&self) -> f64 {
        if self.limit == 0 {
            1.0
        } else {
            self.used as f64 / self.limit as f64
        }
    }
}

/// Capability every translation backend offers the engine
///
/// The engine only talks to this trait, so any backend (or a test double)
/// can be plugged into a pass.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate every entry of `document` into `target_language`,
    /// returning a document with the same ids
    async fn translate(
        &self,
        document: &TaggedDocument,
        target_language: &str,
        options: &TranslateOptions,
    ) -> Result<TaggedDocument, ProviderError>;

    /// Current character usage and limit
    async fn usage(&self) -> Result<Usage, ProviderError>;
}

pub mod deepl;
pub mod mock;
