//! Scripted collaborators for tests.

use super::client::{
    CompletionClient, CompletionRequest, SpeechAudio, SpeechClient, SpeechRequest,
};
use actix_web::web::Bytes;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replies are consumed in order; once the script runs out, `fallback` is used.
/// Every request is recorded for later inspection.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    fallback: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn always(reply: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Err("scripted upstream failure".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        self
    }

    pub fn then_fail(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err("scripted upstream failure".to_string()));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        next.map_err(|e| anyhow!(e))
    }
}

/// Returns fixed audio bytes, or fails on demand.
pub struct FakeSpeech {
    audio: Option<Vec<u8>>,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl FakeSpeech {
    pub fn returning(audio: &[u8]) -> Self {
        Self {
            audio: Some(audio.to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            audio: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechClient for FakeSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio> {
        self.requests.lock().unwrap().push(request);
        let audio = self
            .audio
            .clone()
            .ok_or_else(|| anyhow!("scripted speech failure"))?;
        let chunks: Vec<Result<Bytes>> = audio
            .chunks(4)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Ok(SpeechAudio {
            content_type: "audio/mpeg".to_string(),
            stream: futures_util::stream::iter(chunks).boxed(),
        })
    }
}
