/*!
 * Error types for the srtrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the completion API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The response carried no completion choices
    #[error("API response contained no completion")]
    EmptyResponse,
}

/// Errors that can occur while resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value failed validation
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue {
        /// Configuration key name
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// No API key could be resolved from any source
    #[error(
        "No API key found: set the {env_var} environment variable or create `{key_file}`, \
         and adjust `prefer_env_for_api_key` in the config if needed for the load order"
    )]
    MissingApiKey {
        /// Environment variable that was checked
        env_var: String,
        /// Secret file that was checked
        key_file: String,
    },

    /// Reading or writing the configuration store failed
    #[error("Configuration store error: {0}")]
    Store(String),
}

/// Errors that can occur during subtitle file processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The input path does not carry the expected extension
    #[error("The provided file does not have an .srt extension: {0}")]
    WrongExtension(String),

    /// The file could not be parsed as SRT
    #[error("Failed to parse SRT content: {0}")]
    ParseFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration resolution
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
