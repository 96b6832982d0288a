//! # Language Model Collaborator
//!
//! The interview logic talks to two opaque services:
//! - **Completion**: chat-style text completion (questions, summaries, weakness, verdict)
//! - **Speech**: text-to-speech returning a stream of audio bytes
//!
//! Both are traits so request handling can be exercised without a network.
//! `OpenAiClient` implements both against an OpenAI-compatible HTTP API.

pub mod client;     // Collaborator traits and request types
pub mod openai;     // reqwest implementation

#[cfg(test)]
pub mod fake;       // Scripted collaborators for tests

pub use client::{
    AudioStream, ChatMessage, ChatRole, CompletionClient, CompletionRequest, SpeechAudio,
    SpeechClient, SpeechRequest,
};
pub use openai::OpenAiClient;
