use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{Config, TranslationProvider as ProviderKind};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::deepl::DeepL;
use crate::providers::{TranslationProvider, Usage};
use crate::subtitle_processor::SubtitleCollection;
use crate::translation::TranslationService;

// @module: Application controller for subtitle file translation

/// What happened to one file/language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Translation written to this path, with this many warnings
    Translated { output: PathBuf, warnings: usize },
    /// Output already existed and overwrite was not requested
    Skipped { output: PathBuf },
}

/// Totals for a folder run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Pass runner bound to the configured provider
    service: TranslationService,
}

impl Controller {
    /// Build a controller with the provider named in the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let provider: Arc<dyn TranslationProvider> = match config.provider.provider_type {
            ProviderKind::DeepL => Arc::new(
                DeepL::new(
                    config.provider.api_key.clone(),
                    &config.provider.endpoint,
                    config.provider.timeout_secs,
                )
                .context("Failed to create DeepL client")?,
            ),
        };

        Ok(Self::with_provider(config, provider))
    }

    /// Build a controller around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn TranslationProvider>) -> Self {
        let service = TranslationService::new(provider).with_options(config.translate_options());
        Self { config, service }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Query the provider's usage
    pub async fn usage(&self) -> Result<Usage> {
        let usage = self.service.usage().await?;
        Ok(usage)
    }

    /// Translate one subtitle file into every configured target language
    pub async fn run(&self, input_file: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<Vec<FileOutcome>> {
        if !FileManager::is_subtitle_file(input_file) {
            return Err(anyhow!("Input is not an .srt file: {:?}", input_file));
        }

        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input_file.parent().unwrap_or(Path::new(".")).to_path_buf());
        FileManager::ensure_dir(&output_dir)?;

        let mut outcomes = Vec::with_capacity(self.config.target_languages.len());
        for language in &self.config.target_languages {
            let outcome = self
                .translate_file(input_file, &output_dir, language, force_overwrite)
                .await
                .with_context(|| format!("Failed to translate {:?} to {}", input_file, language))?;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Translate one file into one language and write the result
    async fn translate_file(&self, input_file: &Path, output_dir: &Path, language: &str, force_overwrite: bool) -> Result<FileOutcome> {
        let output = FileManager::generate_output_path(input_file, output_dir, language);
        if output.exists() && !force_overwrite {
            warn!("Skipping {}, translation already exists (use -f to force overwrite)", output.display());
            return Ok(FileOutcome::Skipped { output });
        }

        let language_name = language_utils::get_language_name(language).unwrap_or_else(|_| language.to_string());
        info!("{} -> {}", input_file.display(), language_name);

        let start_time = Instant::now();
        let subtitles = SubtitleCollection::load(input_file)?;
        let outcome = self.service.translate_cues(&subtitles.entries, language).await?;

        for warning in &outcome.warnings {
            warn!("{}: {}", input_file.display(), warning);
        }

        let translated = SubtitleCollection::from_output_cues(output.clone(), &outcome.cues);
        translated.write_to_srt(&output)?;

        info!(
            "Success: {} ({}, {})",
            output.display(),
            outcome.summary(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(FileOutcome::Translated {
            output,
            warnings: outcome.warnings.len(),
        })
    }

    /// Translate every subtitle file under a directory
    pub async fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>, force_overwrite: bool) -> Result<FolderSummary> {
        if !input_dir.is_dir() {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(input_dir, &self.config.target_languages)?;
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(FolderSummary::default());
        }
        info!("Found {} subtitle files in {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("=>-"));

        let results: Vec<(PathBuf, Result<Vec<FileOutcome>>)> = stream::iter(files)
            .map(|file| {
                let progress = progress.clone();
                async move {
                    let result = self.run(&file, output_dir, force_overwrite).await;
                    progress.inc(1);
                    (file, result)
                }
            })
            .buffer_unordered(self.config.output.concurrent_files.max(1))
            .collect()
            .await;

        progress.finish_and_clear();

        let mut summary = FolderSummary::default();
        for (file, result) in results {
            match result {
                Ok(outcomes) => {
                    for outcome in outcomes {
                        match outcome {
                            FileOutcome::Translated { .. } => summary.translated += 1,
                            FileOutcome::Skipped { .. } => summary.skipped += 1,
                        }
                    }
                }
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Folder done: {} translated, {} skipped, {} failed",
            summary.translated, summary.skipped, summary.failed
        );
        debug!("Folder summary: {:?}", summary);

        Ok(summary)
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
