use anyhow::{Context, Result, anyhow};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

// @module: File path and overwrite-confirmation utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Path ends with the .srt extension, case-insensitively
    pub fn has_srt_extension<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .to_string_lossy()
            .to_lowercase()
            .ends_with(".srt")
    }

    // @generates: Output path for the translated subtitle
    // @example: movie.srt -> movie_translated.srt
    pub fn translated_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let extension = input_file
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_else(|| "srt".to_string());

        input_file.with_file_name(format!("{}_translated.{}", stem, extension))
    }

    /// Ask the user whether an existing output file may be overwritten.
    ///
    /// Reads `y`/`n` from stdin, re-prompting on any other answer.
    pub fn confirm_overwrite<P: AsRef<Path>>(path: P) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stdout();
        Self::confirm_overwrite_from(path, &mut reader, &mut writer)
    }

    /// Overwrite confirmation loop over explicit streams, split out so tests
    /// can script the answers.
    pub fn confirm_overwrite_from<P: AsRef<Path>>(
        path: P,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> Result<bool> {
        writeln!(writer, "Warning: The file {} already exists.", path.as_ref().display())?;
        write!(writer, "Do you want to overwrite it? (y/n): ")?;
        writer.flush()?;

        loop {
            let mut line = String::new();
            let read = reader.read_line(&mut line)
                .context("Failed to read overwrite confirmation")?;
            if read == 0 {
                return Err(anyhow!("Input closed while waiting for overwrite confirmation"));
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => {
                    write!(writer, "Please enter 'y' or 'n': ")?;
                    writer.flush()?;
                }
            }
        }
    }
}
