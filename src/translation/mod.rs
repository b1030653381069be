/*!
 * AI-powered subtitle translation.
 *
 * - `core`: prompt assembly and the per-block completion call
 * - `batch`: block encoding and response reassembly
 * - `formatting`: line wrapping for translated text
 */

pub mod batch;
pub mod core;
pub mod formatting;

// Re-export main types for easier usage
pub use core::TranslationService;
pub use formatting::LineWrapper;
pub use batch::TRANSLATION_ERROR_PLACEHOLDER;
