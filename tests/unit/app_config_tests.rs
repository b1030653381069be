/*!
 * Tests for configuration resolution, validation, and credential lookup
 */

use std::io::Cursor;
use std::path::Path;
use anyhow::Result;

use srtrans::app_config::{Config, resolve_api_key_from};
use srtrans::errors::ConfigError;
use crate::common;

const COMPLETE_CONFIG: &str = r#"{
    "translation": {
        "target_language": "fr",
        "additional_context": "A cooking show."
    },
    "settings": {
        "block_size": 5,
        "max_line_length": 40,
        "model": "gpt-4o-mini",
        "temperature": 0.3,
        "max_tokens": 1024
    }
}"#;

/// Test a complete store resolves without any prompting
#[test]
fn test_resolve_withCompleteStore_shouldNotPrompt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let path = common::create_test_file(&dir, "srtrans.json", COMPLETE_CONFIG)?;

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    let config = Config::resolve_from(&path, &mut input, &mut output)?;

    assert!(output.is_empty(), "no prompt expected, got: {}", String::from_utf8_lossy(&output));
    assert_eq!(config.translation.target_language, "fr");
    assert_eq!(config.translation.additional_context, "A cooking show.");
    assert_eq!(config.settings.block_size, 5);
    assert_eq!(config.settings.max_line_length, 40);
    assert_eq!(config.settings.model, "gpt-4o-mini");
    assert_eq!(config.settings.max_tokens, 1024);
    assert!(config.prefer_env_for_api_key);

    Ok(())
}

/// Test a missing store prompts for every value and persists the answers
#[test]
fn test_resolve_withMissingStore_shouldPromptAndPersist() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("srtrans.json");

    // Answers in prompt order: language, context, block size, line length,
    // model, temperature, max tokens
    let answers = "es\n\n10\n42\ngpt-4o-mini\n0.3\n1024\n";
    let mut input = Cursor::new(answers.as_bytes().to_vec());
    let mut output = Vec::new();
    let config = Config::resolve_from(&path, &mut input, &mut output)?;

    assert_eq!(config.translation.target_language, "es");
    assert_eq!(config.translation.additional_context, "");
    assert_eq!(config.settings.block_size, 10);
    assert_eq!(config.settings.temperature, 0.3);

    let prompts = String::from_utf8_lossy(&output);
    assert!(prompts.contains("translation language code"));
    assert!(prompts.contains("max tokens"));

    // A second resolution must read everything from the persisted store
    assert!(path.exists());
    let mut empty_input = Cursor::new(Vec::new());
    let mut second_output = Vec::new();
    let reloaded = Config::resolve_from(&path, &mut empty_input, &mut second_output)?;

    assert!(second_output.is_empty());
    assert_eq!(reloaded.translation.target_language, "es");
    assert_eq!(reloaded.settings.block_size, 10);

    Ok(())
}

/// Test a partially filled store prompts only for the missing keys
#[test]
fn test_resolve_withPartialStore_shouldPromptOnlyMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let partial = r#"{
        "translation": { "target_language": "de", "additional_context": "" },
        "settings": { "block_size": 8, "max_line_length": 0, "model": "gpt-4o-mini", "max_tokens": 512 }
    }"#;
    let path = common::create_test_file(&dir, "srtrans.json", partial)?;

    // Only temperature is missing
    let mut input = Cursor::new(b"0.7\n".to_vec());
    let mut output = Vec::new();
    let config = Config::resolve_from(&path, &mut input, &mut output)?;

    let prompts = String::from_utf8_lossy(&output);
    assert!(prompts.contains("temperature"));
    assert!(!prompts.contains("language code"));
    assert_eq!(config.settings.temperature, 0.7);
    assert_eq!(config.settings.block_size, 8);

    Ok(())
}

/// Test a malformed numeric answer aborts resolution
#[test]
fn test_resolve_withMalformedAnswer_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("srtrans.json");

    let answers = "es\n\nnot-a-number\n";
    let mut input = Cursor::new(answers.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = Config::resolve_from(&path, &mut input, &mut output);

    assert!(result.is_err());
    Ok(())
}

/// Test a malformed store file aborts resolution
#[test]
fn test_resolve_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let path = common::create_test_file(&dir, "srtrans.json", "{ not json")?;

    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    assert!(Config::resolve_from(&path, &mut input, &mut output).is_err());

    Ok(())
}

/// Test the default configuration passes validation
#[test]
fn test_validate_withDefaultConfig_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

/// Test validation rejects out-of-range values
#[test]
fn test_validate_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.translation.target_language = "zz".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.block_size = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.temperature = 3.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.max_tokens = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.model = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.settings.endpoint = "http://localhost:1234/v1".to_string();
    assert!(config.validate().is_ok());
}

/// Test the environment variable wins when preferred
#[test]
fn test_resolve_api_key_withEnvPreferred_shouldUseEnvValue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let key_file = common::create_test_file(&dir, "api_token.txt", "file-key\n")?;

    let key = resolve_api_key_from(true, Some("env-key"), &key_file)?;
    assert_eq!(key, "env-key");

    Ok(())
}

/// Test the secret file wins when preferred, environment as fallback
#[test]
fn test_resolve_api_key_withFilePreferred_shouldUseFileValue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let key_file = common::create_test_file(&dir, "api_token.txt", "  file-key  \n")?;

    let key = resolve_api_key_from(false, Some("env-key"), &key_file)?;
    assert_eq!(key, "file-key");

    // Missing file falls back to the environment
    let missing = temp_dir.path().join("absent.txt");
    let key = resolve_api_key_from(false, Some("env-key"), &missing)?;
    assert_eq!(key, "env-key");

    Ok(())
}

/// Test a missing credential aborts with the dedicated error
#[test]
fn test_resolve_api_key_withNoSource_shouldFail() {
    let result = resolve_api_key_from(true, None, Path::new("/nonexistent/api_token.txt"));

    match result {
        Err(ConfigError::MissingApiKey { env_var, .. }) => {
            assert_eq!(env_var, "OPENAI_API_KEY");
        }
        other => panic!("expected MissingApiKey, got {:?}", other.map(|_| ())),
    }
}

/// Test an empty environment value does not count as a credential
#[test]
fn test_resolve_api_key_withBlankEnv_shouldFallBackToFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let key_file = common::create_test_file(&dir, "api_token.txt", "file-key")?;

    let key = resolve_api_key_from(true, Some("   "), &key_file)?;
    assert_eq!(key, "file-key");

    Ok(())
}
