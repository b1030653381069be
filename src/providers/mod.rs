/*!
 * Provider implementation for the translation service.
 *
 * This module contains the chat-completion wire types shared by every
 * provider implementation and the client for OpenAI-compatible endpoints.
 * The `Provider` trait is the seam the translation service talks through,
 * which also lets tests substitute a mock that never touches the network.
 */

use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single message in a chat-completion conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Chat-completion request payload
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model to use
    pub model: String,

    /// The messages for the conversation
    pub messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
    /// Total number of tokens
    pub total_tokens: u32,
}

/// One completion choice in a chat response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Chat-completion response payload
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The completion choices, first one is used
    pub choices: Vec<ChatChoice>,

    /// Token usage information, when the server reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    /// Text content of the first completion choice
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}

/// Common trait for chat-completion providers
///
/// # Arguments and semantics
/// `complete` performs exactly one request and returns the raw response;
/// there is no retry. Any transport, authentication, or service error is
/// surfaced as a `ProviderError` and treated as fatal by the caller.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a chat request using this provider
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

pub mod openai;
