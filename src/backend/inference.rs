//! Inference client contract
//!
//! A chat-style prompt goes in, generated text comes out. Only the
//! non-streaming form is used.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body sent to the model: `{messages, stream}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceRequest {
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl InferenceRequest {
    /// Non-streaming request over the given messages
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            stream: false,
        }
    }
}

/// Generated text returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InferenceResponse {
    pub response: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("inference service reported failure: {0}")]
    Api(String),
    #[error("malformed inference response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid inference configuration: {0}")]
    Config(String),
}

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Run `model` over `request` and return the generated text
    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError>;
}
