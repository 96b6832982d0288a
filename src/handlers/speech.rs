//! `POST /api/tts`: synthesize speech for interviewer text.
//!
//! Audio is streamed back as it arrives from the speech collaborator. When the
//! caller has a live interview, its personality picks the voice style.

use super::cookie::session_id;
use crate::error::AppResult;
use crate::interview::speech::SpeechOptions;
use crate::state::AppState;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub instructions: Option<String>,
}

pub async fn text_to_speech(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<TtsRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();

    let personality = match session_id(&req, &state) {
        Some(id) => state.sessions.get(&id).await?.map(|s| s.personality),
        None => None,
    };

    let options = SpeechOptions {
        voice: body.voice,
        speed: body.speed,
        instructions: body.instructions,
    };
    let audio = state.speech.synthesize(&body.text, options, personality).await?;
    debug!(chars = body.text.chars().count(), ?personality, "Streaming synthesized speech");

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, audio.content_type))
        .insert_header((CACHE_CONTROL, "no-store"))
        .streaming(audio.stream))
}
