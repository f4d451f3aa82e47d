use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::providers::{Formality, TranslateOptions};

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO); `None` lets the provider detect it
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language codes (ISO), one pass per language
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: DeepL
    #[default]
    DeepL,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::DeepL => "DeepL",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeepL => write!(f, "deepl"),
        }
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider_type: TranslationProvider,

    // @field: API key, injected into the adapter at construction
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL; empty picks the default for the key
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Requested formality
    #[serde(default)]
    pub formality: Option<Formality>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: TranslationProvider::default(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
            formality: Some(Formality::default()),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Files translated at the same time during folder runs
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            concurrent_files: default_concurrent_files(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_languages() -> Vec<String> {
    vec!["ja".to_string()]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_concurrent_files() -> usize {
    2
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        for language in &self.target_languages {
            crate::language_utils::validate_language_code(language)
                .with_context(|| format!("Invalid target language '{}'", language))?;
        }

        if let Some(source) = &self.source_language {
            crate::language_utils::validate_language_code(source)
                .with_context(|| format!("Invalid source language '{}'", source))?;
        }

        if self.provider.api_key.trim().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.provider.provider_type.display_name()
            ));
        }

        if self.output.concurrent_files == 0 {
            return Err(anyhow!("output.concurrent_files must be at least 1"));
        }

        Ok(())
    }

    /// Options sent with every translate request
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            source_language: self.source_language.clone(),
            formality: self.provider.formality,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_languages: default_target_languages(),
            provider: ProviderConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
