use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::errors::ConfigError;
use crate::language_utils;

/// Application configuration module
/// This module handles loading the configuration store, prompting
/// interactively for any missing value, persisting the completed store, and
/// validating every field before translation begins. The resolved `Config`
/// is immutable for the remainder of the run and passed into every
/// component - there is no ambient global.
/// Default path of the configuration store
pub const DEFAULT_CONFIG_PATH: &str = "srtrans.json";

/// Environment variable checked for the API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Local secret file checked for the API key
pub const API_KEY_FILE: &str = "api_token.txt";

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

/// Translation section of the configuration store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSection {
    /// Target language code (ISO 639-1 or 639-2)
    pub target_language: String,

    /// Additional free-text context for the model, empty when none
    pub additional_context: String,
}

/// Settings section of the configuration store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SettingsSection {
    /// Number of subtitle entries per translation block
    pub block_size: usize,

    /// Maximum characters per wrapped subtitle line, 0 disables wrapping
    pub max_line_length: usize,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum response tokens per request
    pub max_tokens: u32,

    /// Endpoint override for OpenAI-compatible servers, empty for the default
    #[serde(default)]
    pub endpoint: String,
}

/// Resolved application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation section
    pub translation: TranslationSection,

    /// Settings section
    pub settings: SettingsSection,

    /// Whether the environment variable is preferred over the secret file
    /// when resolving the API key
    #[serde(default = "default_prefer_env")]
    pub prefer_env_for_api_key: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_prefer_env() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation: TranslationSection {
                target_language: "es".to_string(),
                additional_context: String::new(),
            },
            settings: SettingsSection {
                block_size: 10,
                max_line_length: 42,
                model: "gpt-4o-mini".to_string(),
                temperature: 0.3,
                max_tokens: 1024,
                endpoint: String::new(),
            },
            prefer_env_for_api_key: true,
            log_level: LogLevel::Info,
        }
    }
}

/// Configuration store as read from disk, before missing values are filled in
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default)]
    translation: RawTranslationSection,

    #[serde(default)]
    settings: RawSettingsSection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefer_env_for_api_key: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawTranslationSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_context: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawSettingsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_line_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
}

impl Config {
    /// Resolve the configuration from the store at `path`, prompting on
    /// stdin for any missing value and persisting the completed store.
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut writer = std::io::stdout();
        Self::resolve_from(path, &mut reader, &mut writer)
    }

    /// Resolve the configuration, reading interactive answers from `reader`
    /// and writing prompts to `writer`. Split out from [`Config::resolve`]
    /// so tests can drive the prompt loop without a terminal.
    pub fn resolve_from<P: AsRef<Path>>(
        path: P,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> Result<Self> {
        let path = path.as_ref();

        let mut raw: RawConfig = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            RawConfig::default()
        };

        let mut prompted = false;

        let target_language = fill_value(
            &mut raw.translation.target_language,
            "Please enter the default translation language code (e.g., 'es' for Spanish):",
            &mut prompted, reader, writer,
        )?;
        let additional_context = fill_value(
            &mut raw.translation.additional_context,
            "Enter any additional info for translation context (leave blank if none):",
            &mut prompted, reader, writer,
        )?;
        let block_size = fill_parsed(
            &mut raw.settings.block_size,
            "block_size",
            "Please enter the number of subtitles to process at once (e.g., 10):",
            &mut prompted, reader, writer,
        )?;
        let max_line_length = fill_parsed(
            &mut raw.settings.max_line_length,
            "max_line_length",
            "Max characters per subtitle line (0 disables wrapping):",
            &mut prompted, reader, writer,
        )?;
        let model = fill_value(
            &mut raw.settings.model,
            "Please enter the model to use (e.g., 'gpt-4o-mini'):",
            &mut prompted, reader, writer,
        )?;
        let temperature = fill_parsed(
            &mut raw.settings.temperature,
            "temperature",
            "Please enter the temperature to use for translation (e.g., 0.3):",
            &mut prompted, reader, writer,
        )?;
        let max_tokens = fill_parsed(
            &mut raw.settings.max_tokens,
            "max_tokens",
            "Please enter the max tokens to use for translation (e.g., 1024):",
            &mut prompted, reader, writer,
        )?;

        // Persist the store whenever a prompt filled in a value
        if prompted {
            let serialized = serde_json::to_string_pretty(&raw)
                .context("Failed to serialize config")?;
            fs::write(path, serialized)
                .map_err(|e| ConfigError::Store(format!("{}: {}", path.display(), e)))?;
        }

        let config = Config {
            translation: TranslationSection {
                target_language,
                additional_context,
            },
            settings: SettingsSection {
                block_size,
                max_line_length,
                model,
                temperature,
                max_tokens,
                endpoint: raw.settings.endpoint.unwrap_or_default(),
            },
            prefer_env_for_api_key: raw.prefer_env_for_api_key.unwrap_or(true),
            log_level: raw.log_level.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate every field before any translation begins
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.translation.target_language)
            .map_err(|e| ConfigError::InvalidValue {
                key: "translation.target_language".to_string(),
                reason: e.to_string(),
            })?;

        if self.settings.block_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "settings.block_size".to_string(),
                reason: "must be at least 1".to_string(),
            }.into());
        }

        if self.settings.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "settings.model".to_string(),
                reason: "must not be empty".to_string(),
            }.into());
        }

        if !self.settings.temperature.is_finite() || !(0.0..=2.0).contains(&self.settings.temperature) {
            return Err(ConfigError::InvalidValue {
                key: "settings.temperature".to_string(),
                reason: format!("{} is outside the range 0.0..=2.0", self.settings.temperature),
            }.into());
        }

        if self.settings.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                key: "settings.max_tokens".to_string(),
                reason: "must be at least 1".to_string(),
            }.into());
        }

        if !self.settings.endpoint.is_empty() {
            let url = url::Url::parse(&self.settings.endpoint)
                .map_err(|e| ConfigError::InvalidValue {
                    key: "settings.endpoint".to_string(),
                    reason: e.to_string(),
                })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::InvalidValue {
                    key: "settings.endpoint".to_string(),
                    reason: format!("unsupported scheme: {}", url.scheme()),
                }.into());
            }
        }

        Ok(())
    }

    /// Resolve the API key from the environment variable or the local secret
    /// file, in the configured preference order.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        let env_value = std::env::var(API_KEY_ENV_VAR).ok();
        resolve_api_key_from(
            self.prefer_env_for_api_key,
            env_value.as_deref(),
            Path::new(API_KEY_FILE),
        )
    }
}

/// API key lookup over explicit sources, split out for tests
pub fn resolve_api_key_from(
    prefer_env: bool,
    env_value: Option<&str>,
    key_file: &Path,
) -> Result<String, ConfigError> {
    let from_env = || {
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let from_file = || {
        fs::read_to_string(key_file)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let key = if prefer_env {
        from_env().or_else(from_file)
    } else {
        from_file().or_else(from_env)
    };

    key.ok_or_else(|| ConfigError::MissingApiKey {
        env_var: API_KEY_ENV_VAR.to_string(),
        key_file: key_file.display().to_string(),
    })
}

/// Return the stored string value, prompting for it when missing
fn fill_value(
    slot: &mut Option<String>,
    prompt: &str,
    prompted: &mut bool,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> Result<String> {
    if let Some(value) = slot {
        return Ok(value.clone());
    }

    let answer = ask(prompt, reader, writer)?;
    *slot = Some(answer.clone());
    *prompted = true;
    Ok(answer)
}

/// Return the stored value, prompting for it and parsing the answer when
/// missing. A malformed answer aborts resolution.
fn fill_parsed<T>(
    slot: &mut Option<T>,
    key: &str,
    prompt: &str,
    prompted: &mut bool,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> Result<T>
where
    T: std::str::FromStr + Clone,
    T::Err: std::fmt::Display,
{
    if let Some(value) = slot {
        return Ok(value.clone());
    }

    let answer = ask(prompt, reader, writer)?;
    let parsed: T = answer.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}': {}", answer, e),
    })?;
    *slot = Some(parsed.clone());
    *prompted = true;
    Ok(parsed)
}

/// Print a prompt and read one trimmed answer line
fn ask(prompt: &str, reader: &mut impl BufRead, writer: &mut impl Write) -> Result<String> {
    writeln!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)
        .context("Failed to read configuration value from input")?;
    Ok(line.trim().to_string())
}
