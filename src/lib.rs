/*!
 * # srtrans - AI-powered SRT subtitle translator
 *
 * A Rust library for translating SRT subtitle files with an
 * OpenAI-compatible chat-completions API.
 *
 * ## Features
 *
 * - Parse and serialize SRT subtitle files, preserving timing
 * - Batch entries into fixed-size blocks with stable index markers
 * - Translate block by block, strictly sequentially
 * - Re-wrap translated lines to a configurable width without splitting words
 * - Interactive configuration store that persists answered prompts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration store, prompting, and credential resolution
 * - `subtitle_processor`: SRT parsing and serialization
 * - `translation`: Block encoding, the completion call, and reassembly:
 *   - `translation::core`: Prompt assembly and the per-block request
 *   - `translation::batch`: Block encoding and response parsing
 *   - `translation::formatting`: Greedy line wrapping
 * - `providers`: Chat-completion wire types and the OpenAI-compatible client
 * - `file_utils`: Output path derivation and overwrite confirmation
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod subtitle_processor;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutcome};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use translation::{TranslationService, LineWrapper, TRANSLATION_ERROR_PLACEHOLDER};
pub use errors::{AppError, ConfigError, ProviderError, SubtitleError};
