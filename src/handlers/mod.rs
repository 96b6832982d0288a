//! # HTTP Handlers
//!
//! Route table for the interview API plus the operational endpoints.
//!
//! ## Routes:
//! - `/api/start`, `/api/next-question`, `/api/submit-answer`
//! - `/api/transcript`, `/api/result`, `/api/status`
//! - `/api/tts`
//! - `/api/v1/health`, `/api/v1/metrics`, `/health`

pub mod cookie;
pub mod interview;
pub mod speech;

use crate::error::AppError;
use crate::health;
use actix_web::web;

/// Register every route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health::health_check))
            .route("/metrics", web::get().to(health::detailed_metrics)),
    )
    .service(
        web::scope("/api")
            .route("/start", web::post().to(interview::start_interview))
            .route("/next-question", web::get().to(interview::next_question))
            .route("/submit-answer", web::post().to(interview::submit_answer))
            .route("/transcript", web::get().to(interview::get_transcript))
            .route("/result", web::get().to(interview::get_result))
            .route("/status", web::get().to(interview::get_status))
            .route("/tts", web::post().to(speech::text_to_speech)),
    )
    .route("/health", web::get().to(health::health_check));
}

/// JSON extractor settings: malformed bodies use the regular error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}
