//! # Speech Synthesis Adapter
//!
//! Shapes `/api/tts` input into a `SpeechRequest`:
//! - text is required and truncated to the configured character limit
//! - voice and speed fall back to configured defaults
//! - style instructions come from the caller, else from the interviewer's
//!   personality, else a neutral default

use super::session::Personality;
use crate::config::{AppConfig, SpeechConfig};
use crate::error::{AppError, AppResult};
use crate::llm::{SpeechAudio, SpeechClient, SpeechRequest};
use std::sync::Arc;
use tracing::warn;

const NEUTRAL_INSTRUCTIONS: &str = "Speak clearly in a calm, professional tone.";

/// Caller-supplied options for one synthesis.
#[derive(Debug, Clone, Default)]
pub struct SpeechOptions {
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub instructions: Option<String>,
}

#[derive(Clone)]
pub struct SpeechAdapter {
    client: Arc<dyn SpeechClient>,
    model: String,
    defaults: SpeechConfig,
}

/// Cut `text` to at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl SpeechAdapter {
    pub fn new(client: Arc<dyn SpeechClient>, config: &AppConfig) -> Self {
        Self {
            client,
            model: config.openai.tts_model.clone(),
            defaults: config.speech.clone(),
        }
    }

    pub fn build_request(
        &self,
        text: &str,
        options: SpeechOptions,
        personality: Option<Personality>,
    ) -> AppResult<SpeechRequest> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Missing text".to_string()));
        }

        let instructions = non_blank(options.instructions).unwrap_or_else(|| {
            personality
                .map(|p| p.voice_instructions())
                .unwrap_or(NEUTRAL_INSTRUCTIONS)
                .to_string()
        });

        Ok(SpeechRequest {
            model: self.model.clone(),
            input: truncate_chars(text, self.defaults.max_input_chars).to_string(),
            voice: non_blank(options.voice).unwrap_or_else(|| self.defaults.default_voice.clone()),
            speed: options
                .speed
                .filter(|s| s.is_finite())
                .unwrap_or(self.defaults.default_speed),
            instructions,
        })
    }

    pub async fn synthesize(
        &self,
        text: &str,
        options: SpeechOptions,
        personality: Option<Personality>,
    ) -> AppResult<SpeechAudio> {
        let request = self.build_request(text, options, personality)?;
        self.client.synthesize(request).await.map_err(|e| {
            warn!("Speech synthesis failed: {:#}", e);
            AppError::Upstream("Speech synthesis failed".to_string())
        })
    }
}
