/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which turns an
 * encoded subtitle block into a prompt, performs exactly one completion
 * request for it, and slices the reply back into per-entry translations.
 */

use anyhow::Result;
use log::debug;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::providers::{ChatRequest, Provider};
use crate::subtitle_processor::SubtitleEntry;
use super::batch;

/// Translation service for subtitle blocks
///
/// Generic over the provider so tests can run against a mock instead of a
/// live endpoint. One service instance is built per run from the resolved
/// configuration and stays immutable afterwards.
pub struct TranslationService<P: Provider> {
    /// Provider implementation
    provider: P,

    /// Model identifier sent with every request
    model: String,

    /// Sampling temperature
    temperature: f32,

    /// Maximum response tokens per request
    max_tokens: u32,

    /// Target language code
    target_language: String,

    /// Optional free-text context prepended to the instruction
    additional_context: String,
}

impl<P: Provider> TranslationService<P> {
    /// Create a new translation service from the resolved configuration
    pub fn new(provider: P, config: &Config) -> Self {
        Self {
            provider,
            model: config.settings.model.clone(),
            temperature: config.settings.temperature,
            max_tokens: config.settings.max_tokens,
            target_language: config.translation.target_language.clone(),
            additional_context: config.translation.additional_context.clone(),
        }
    }

    /// Assemble the full prompt for an encoded block body.
    ///
    /// The fixed instruction is `Translate this into <language>: `; when
    /// additional context is configured it is prepended with a single space.
    pub fn build_prompt(&self, block_body: &str) -> String {
        if self.additional_context.is_empty() {
            format!("Translate this into {}: {}", self.target_language, block_body)
        } else {
            format!(
                "{} Translate this into {}: {}",
                self.additional_context, self.target_language, block_body
            )
        }
    }

    /// Translate one block of entries.
    ///
    /// Issues a single request carrying the whole block in one system-role
    /// message and returns the parsed per-entry translations, in response
    /// order. Any provider failure aborts the run; there is no retry.
    pub async fn translate_block(&self, block: &[SubtitleEntry]) -> Result<Vec<String>> {
        let block_body = batch::encode_block(block);
        let prompt = self.build_prompt(&block_body);
        debug!("Prompt:\n{}", prompt);

        let request = ChatRequest::new(&self.model, self.max_tokens)
            .temperature(self.temperature)
            .add_message("system", prompt);

        let response = self.provider.complete(request).await?;
        let translated_text = response
            .first_content()
            .ok_or(ProviderError::EmptyResponse)?
            .trim()
            .to_string();
        debug!("Response:\n{}", translated_text);

        Ok(batch::parse_block_response(&translated_text))
    }
}
