/*!
 * # subsentence - sentence-aware subtitle translation
 *
 * A Rust library that translates SRT subtitles one sentence at a time while
 * keeping the original cue timing.
 *
 * ## Features
 *
 * - Rebuild sentences that span several cues
 * - Translate a whole file in one tagged request
 * - Spread each translated sentence back over its cue slots by word count
 * - Quota gate before every pass
 * - DeepL provider, plus a scriptable mock for tests
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing and writing
 * - `translation`: The translation engine:
 *   - `translation::sentences`: Sentence aggregation
 *   - `translation::document`: Tagged request/response document
 *   - `translation::mapping`: Response mapping onto cue slots
 *   - `translation::core`: Pass orchestration
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Translation provider trait and clients:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::mock`: Test double
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{Cue, SubtitleCollection};
pub use translation::{TranslationOutcome, TranslationService};
pub use providers::{TranslationProvider, Usage};
pub use language_utils::{language_codes_match, get_language_name};
pub use errors::{AppError, DocumentError, ProviderError, SubtitleError, TranslationError, TranslationWarning};
