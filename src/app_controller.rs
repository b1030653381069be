use anyhow::{Context, Result};
use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::openai::OpenAI;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::translation::TranslationService;
use crate::translation::batch;

// @module: Application controller for subtitle translation

/// Outcome of a translation run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// All blocks translated and the output file written
    Completed(PathBuf),

    /// The user declined to overwrite an existing output file
    Canceled,
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the main workflow for one input subtitle file.
    ///
    /// The output path is derived from the input path; when it already
    /// exists and `force_overwrite` is not set, the user is asked for
    /// confirmation and a declined overwrite cancels the run without
    /// touching any file. The API key is resolved before any network call.
    pub async fn run(&self, input_file: PathBuf, force_overwrite: bool) -> Result<RunOutcome> {
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::translated_output_path(&input_file);
        if FileManager::file_exists(&output_path)
            && !force_overwrite
            && !FileManager::confirm_overwrite(&output_path)?
        {
            return Ok(RunOutcome::Canceled);
        }

        // Credentials are checked up front so a missing key aborts before
        // the input is parsed or any request is issued
        let api_key = self.config.resolve_api_key()?;

        let mut subtitles = SubtitleCollection::load_from_file(&input_file)
            .context("Failed to parse subtitle file")?;
        info!(
            "Loaded {} entries from {}",
            subtitles.entries.len(),
            input_file.display()
        );

        let provider = OpenAI::new(api_key, self.config.settings.endpoint.clone());
        let service = TranslationService::new(provider, &self.config);

        info!(
            "Translating into {} with model {}",
            language_utils::display_language(&self.config.translation.target_language),
            self.config.settings.model
        );

        self.translate_collection(&service, &mut subtitles.entries).await?;

        subtitles.write_to_srt(&output_path)?;
        info!("Translation done! Translated subtitles saved to: {}", output_path.display());

        Ok(RunOutcome::Completed(output_path))
    }

    /// Translate all entries in place, block by block.
    ///
    /// Blocks are processed strictly sequentially in document order: the
    /// next block's request is not issued until the previous block's
    /// response has been parsed and applied.
    pub async fn translate_collection<P: Provider>(
        &self,
        service: &TranslationService<P>,
        entries: &mut [SubtitleEntry],
    ) -> Result<()> {
        let block_size = self.config.settings.block_size;
        let max_line_length = self.config.settings.max_line_length;
        let total_blocks = batch::total_blocks(entries.len(), block_size);

        let progress_bar = ProgressBar::new(total_blocks as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        for (block_index, block) in entries.chunks_mut(block_size.max(1)).enumerate() {
            debug!("Translating block {} of {}", block_index + 1, total_blocks);

            let translations = service.translate_block(block).await?;
            let shortfall = batch::apply_translations(block, &translations, max_line_length);
            if shortfall > 0 {
                warn!(
                    "Block {} returned {} of {} translations, placeholder applied to the rest",
                    block_index + 1,
                    block.len() - shortfall,
                    block.len()
                );
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        Ok(())
    }

    /// Validate that an input path carries the expected extension
    pub fn check_input_extension(input_file: &Path) -> Result<()> {
        if !FileManager::has_srt_extension(input_file) {
            return Err(crate::errors::SubtitleError::WrongExtension(
                input_file.display().to_string(),
            ).into());
        }
        Ok(())
    }
}
