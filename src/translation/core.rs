/*!
 * Translation pass orchestration.
 *
 * A pass runs: cue validation, quota check, sentence aggregation, request
 * building, the single provider call, and response mapping. Nothing is kept
 * between passes, so one service can run many passes concurrently.
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::errors::{TranslationError, TranslationWarning};
use crate::providers::{TranslateOptions, TranslationProvider, Usage};
use crate::subtitle_processor::{Cue, SubtitleCollection};
use super::document::TaggedDocument;
use super::mapping::{OutputCue, ResponseMapper};
use super::sentences::SentenceAggregator;

/// Usage ratio above which a pass warns
const QUOTA_WARNING_RATIO: f64 = 0.9;

/// Result of one successful pass
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    /// Translated cues in input order
    pub cues: Vec<OutputCue>,

    /// Non-fatal problems met during the pass
    pub warnings: Vec<TranslationWarning>,

    /// Sentences sent to the provider
    pub sentence_count: usize,

    /// Time spent waiting on the provider
    pub provider_duration: Duration,
}

impl TranslationOutcome {
    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} sentences -> {} cues, {} warnings, provider {:.2}s",
            self.sentence_count,
            self.cues.len(),
            self.warnings.len(),
            self.provider_duration.as_secs_f64()
        )
    }
}

/// Runs translation passes against one provider
#[derive(Debug, Clone)]
pub struct TranslationService {
    provider: Arc<dyn TranslationProvider>,
    options: TranslateOptions,
}

impl TranslationService {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            provider,
            options: TranslateOptions::default(),
        }
    }

    /// Set the options sent with every translate request
    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Raw provider usage, without gating
    pub async fn usage(&self) -> Result<Usage, TranslationError> {
        Ok(self.provider.usage().await?)
    }

    /// Query usage and refuse to continue when the limit is reached.
    ///
    /// Returns a warning when more than 90% of the limit is used.
    pub async fn check_quota(&self) -> Result<(Usage, Option<TranslationWarning>), TranslationError> {
        let usage = self.provider.usage().await?;
        debug!("Provider usage: {}/{}", usage.used, usage.limit);

        if usage.is_exhausted() {
            return Err(TranslationError::QuotaExceeded {
                used: usage.used,
                limit: usage.limit,
            });
        }

        let warning = (usage.ratio() > QUOTA_WARNING_RATIO).then(|| {
            let warning = TranslationWarning::QuotaNearlyExhausted {
                used: usage.used,
                limit: usage.limit,
            };
            warn!("{}", warning);
            warning
        });

        Ok((usage, warning))
    }

    /// Parse SRT content and translate it
    pub async fn translate_srt(&self, content: &str, target_language: &str) -> Result<TranslationOutcome, TranslationError> {
        let cues = SubtitleCollection::parse_srt_string(content)?;
        self.translate_cues(&cues, target_language).await
    }

    /// Run one full pass over an ordered cue stream
    pub async fn translate_cues(&self, cues: &[Cue], target_language: &str) -> Result<TranslationOutcome, TranslationError> {
        Self::validate_cues(cues)?;

        let (_, quota_warning) = self.check_quota().await?;
        let mut outcome = TranslationOutcome {
            warnings: quota_warning.into_iter().collect(),
            ..Default::default()
        };

        let sentences = SentenceAggregator::aggregate(cues);
        outcome.sentence_count = sentences.len();
        if sentences.is_empty() {
            warn!("All {} cues are blank, nothing to translate", cues.len());
            return Ok(outcome);
        }

        let request = TaggedDocument::from_sentences(&sentences);
        info!(
            "Translating {} cues as {} sentences ({} chars) to {}",
            cues.len(),
            sentences.len(),
            request.char_count(),
            target_language
        );

        let started = Instant::now();
        let translated = self.provider.translate(&request, target_language, &self.options).await?;
        outcome.provider_duration = started.elapsed();

        let mapped = ResponseMapper::map(&sentences, &translated);
        outcome.cues = mapped.cues;
        outcome.warnings.extend(mapped.warnings);

        debug!("Pass finished: {}", outcome.summary());
        Ok(outcome)
    }

    /// Cue stream preconditions checked before any provider call
    fn validate_cues(cues: &[Cue]) -> Result<(), TranslationError> {
        if cues.is_empty() {
            return Err(TranslationError::EmptySource);
        }

        for cue in cues {
            if cue.index == 0 {
                return Err(TranslationError::MalformedSource("cue index must be positive".to_string()));
            }
            if cue.start_ms > cue.end_ms {
                return Err(TranslationError::MalformedSource(format!("cue {} ends before it starts", cue.index)));
            }
        }

        if let Some(pair) = cues.windows(2).find(|pair| pair[1].index <= pair[0].index) {
            return Err(TranslationError::MalformedSource(format!(
                "cue index {} does not follow {}",
                pair[1].index, pair[0].index
            )));
        }

        Ok(())
    }
}
