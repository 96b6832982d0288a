use actix_web::web::Bytes;
use anyhow::Result;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// 0.0 = deterministic, higher = more varied
    pub temperature: f32,
    /// Ask the service to constrain the reply to a JSON object
    pub json_response: bool,
    pub max_tokens: Option<u32>,
}

/// Text-to-speech call.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    pub speed: f32,
    pub instructions: String,
}

pub type AudioStream = BoxStream<'static, Result<Bytes>>;

/// Synthesized audio, not yet read.
pub struct SpeechAudio {
    pub content_type: String,
    pub stream: AudioStream,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Text of the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[async_trait]
pub trait SpeechClient: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio>;
}
