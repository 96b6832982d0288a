//! # Interview REST API Handlers
//!
//! ## Available Endpoints:
//! - `POST /api/start` - Start (or restart) an interview, issues the session cookie
//! - `GET /api/next-question` - Next question, or `{"end": true}` once time is up
//! - `POST /api/submit-answer` - Answer the pending question
//! - `GET /api/transcript` - Profile, timing and full history
//! - `GET /api/result` - Pass/fail verdict over the history
//! - `GET /api/status` - Phase and timing of the current interview
//!
//! Every handler recomputes the session phase from the clock; nothing is
//! scheduled in the background except weakness analysis.

use super::cookie::{session_cookie, session_id};
use crate::error::{AppError, AppResult};
use crate::interview::parse::{Verdict, VerdictStatus};
use crate::interview::session::{HistoryItem, SessionError};
use crate::interview::{
    AnalysisJob, AnswerSource, InterviewSession, Personality, Profile, SessionPhase,
};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::oneshot;
use tracing::{debug, info};
use uuid::Uuid;

/// Interview length in minutes, as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Minutes(f64),
    Text(String),
}

impl DurationInput {
    fn minutes(&self) -> Option<f64> {
        match self {
            DurationInput::Minutes(minutes) => Some(*minutes),
            DurationInput::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Request body for `POST /api/start`.
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(rename = "type", default)]
    pub role: String,
    #[serde(default)]
    pub resume: String,
    pub duration: Option<DurationInput>,
}

/// Request body for `POST /api/submit-answer`.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub source: AnswerSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub profile: Profile,
    pub personality: Personality,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub status: VerdictStatus,
    pub confidence: i64,
    pub reason: String,
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub phase: SessionPhase,
    pub remaining_seconds: u64,
    pub elapsed_seconds: u64,
    pub pending_question: Option<String>,
    pub answered: usize,
}

async fn load_session(req: &HttpRequest, state: &AppState) -> AppResult<InterviewSession> {
    let id = session_id(req, state).ok_or(AppError::NotStarted)?;
    state.sessions.get(&id).await?.ok_or(AppError::NotStarted)
}

/// `POST /api/start`
///
/// ## Request Body:
/// ```json
/// { "type": "Backend Engineer", "resume": "...", "duration": 10 }
/// ```
///
/// Any session already bound to the caller's cookie is discarded. The
/// interview may not outlast the session cookie, so `duration` is capped at
/// the cookie max-age.
pub async fn start_interview(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<StartRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let minutes = body
        .duration
        .as_ref()
        .and_then(DurationInput::minutes)
        .ok_or_else(|| {
            AppError::from(SessionError::InvalidDuration(
                "duration must be a positive number of minutes".to_string(),
            ))
        })?;

    let profile = Profile {
        role: body.role.trim().to_string(),
        resume: body.resume.trim().to_string(),
    };
    let session = InterviewSession::start(
        Uuid::new_v4().to_string(),
        profile,
        minutes,
        Personality::random(),
        state.clock.now(),
    )?;
    let max_age_secs = state.config.session.max_age_secs;
    if session.duration_seconds > max_age_secs {
        return Err(SessionError::InvalidDuration(format!(
            "duration must not exceed {} minutes",
            max_age_secs / 60
        ))
        .into());
    }

    if let Some(previous) = session_id(&req, &state) {
        if state.sessions.expire(&previous).await? {
            debug!(session_id = %previous, "Replaced previous interview session");
        }
    }

    let cookie = session_cookie(&state, &session.id)?;
    info!(
        session_id = %session.id,
        personality = %session.personality,
        duration_seconds = session.duration_seconds,
        profile_sparse = session.profile.is_sparse(),
        "Interview started"
    );
    state.sessions.set(session).await?;
    state.record_interview_started();

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({ "success": true })))
}

/// `GET /api/next-question`
///
/// ## Response:
/// - `{"question": "..."}` while the interview is running
/// - `{"end": true}` once time is up, nothing is pending and something was answered
///
/// After expiry a pending question is returned again so it can still be answered.
pub async fn next_question(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let session = load_session(&req, &state).await?;
    let now = state.clock.now();

    if session.should_end(now) {
        info!(session_id = %session.id, answered = session.history.len(), "Interview time is up");
        return Ok(HttpResponse::Ok().json(json!({ "end": true })));
    }

    if session.is_expired(now) {
        if let Some(pending) = &session.current_question {
            return Ok(HttpResponse::Ok().json(json!({ "question": pending })));
        }
    }

    let remaining = session.remaining_seconds(now);
    let generated = state.engine.next_question(&session, remaining).await;
    info!(
        session_id = %session.id,
        strategy = generated.strategy.as_str(),
        fallback = generated.fallback,
        remaining_seconds = remaining,
        "Question generated"
    );

    let question = generated.text.clone();
    let asked_at = state.clock.now();
    let stored = state
        .sessions
        .update(
            &session.id,
            Box::new(move |s: &mut InterviewSession| s.begin_question(question, asked_at)),
        )
        .await?;
    if !stored {
        return Err(AppError::NotStarted);
    }
    state.sessions.touch(&session.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "question": generated.text })))
}

/// `POST /api/submit-answer`
///
/// Records the answer, clears the pending question and queues weakness
/// analysis. The response does not wait for the analysis.
///
/// ## Response:
/// ```json
/// { "time_up": false }
/// ```
pub async fn submit_answer(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SubmitAnswerRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    if body.answer.trim().is_empty() {
        return Err(SessionError::EmptyAnswer.into());
    }
    let id = session_id(&req, &state).ok_or(AppError::NotStarted)?;
    let now = state.clock.now();

    let (sender, mut receiver) = oneshot::channel();
    let answer = body.answer;
    let source = body.source;
    let found = state
        .sessions
        .update(
            &id,
            Box::new(move |s: &mut InterviewSession| {
                let recorded = s.record_answer(&answer, source, now).map(HistoryItem::clone);
                let remaining = s.remaining_seconds(now);
                let _ = sender.send(recorded.map(|item| (item, remaining)));
            }),
        )
        .await?;
    if !found {
        return Err(AppError::NotStarted);
    }

    let (item, remaining) = receiver
        .try_recv()
        .map_err(|_| AppError::Internal("answer update produced no result".to_string()))??;

    state.sessions.touch(&id).await?;
    state.record_answer_submitted();
    state.analysis.submit(AnalysisJob {
        session_id: id.clone(),
        question: item.question,
        answer: item.answer,
    });

    let time_up = remaining == 0;
    info!(session_id = %id, time_up, "Answer recorded");
    Ok(HttpResponse::Ok().json(json!({ "time_up": time_up })))
}

/// `GET /api/transcript`
pub async fn get_transcript(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let session = load_session(&req, &state).await?;
    let remaining_seconds = session.remaining_seconds(state.clock.now());

    Ok(HttpResponse::Ok().json(TranscriptResponse {
        profile: session.profile,
        personality: session.personality,
        started_at: session.start_time,
        duration_seconds: session.duration_seconds,
        remaining_seconds,
        history: session.history,
    }))
}

/// `GET /api/result`
///
/// ## Response:
/// ```json
/// { "status": "Fail", "confidence": 35, "reason": "...", "history": [...] }
/// ```
pub async fn get_result(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let session = match load_session(&req, &state).await {
        Ok(session) => session,
        Err(AppError::NotStarted) => return Err(AppError::NoData),
        Err(e) => return Err(e),
    };

    let Verdict {
        status,
        confidence,
        reason,
    } = state.engine.synthesize_verdict(&session).await?;
    info!(session_id = %session.id, ?status, confidence, "Interview result synthesized");

    Ok(HttpResponse::Ok().json(ResultResponse {
        status,
        confidence,
        reason,
        history: session.history,
    }))
}

/// `GET /api/status`
pub async fn get_status(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let session = load_session(&req, &state).await?;
    let now = state.clock.now();

    Ok(HttpResponse::Ok().json(StatusResponse {
        phase: session.phase(now),
        remaining_seconds: session.remaining_seconds(now),
        elapsed_seconds: session.elapsed_seconds(now),
        pending_question: session.current_question,
        answered: session.history.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        get, post_json, read_json, session_cookie_from, TestApp,
    };
    use crate::interview::analysis::wait_for_idle;
    use crate::interview::prompts::{QuestionStrategy, DEFAULT_QUESTION, SUMMARY_HEADING};
    use crate::llm::fake::ScriptedCompletion;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    fn long_resume() -> String {
        vec!["distributed"; 70].join(" ")
    }

    #[actix_web::test]
    async fn test_full_interview_flow() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Why Rust?"}"#));
        let app = test::init_service(harness.app()).await;

        let start = post_json(
            &app,
            "/api/start",
            None,
            json!({"type": "Senior Backend Engineer", "resume": long_resume(), "duration": 10}),
        )
        .await;
        assert_eq!(start.status(), StatusCode::OK);
        let cookie = session_cookie_from(&start);
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(read_json(start).await, json!({"success": true}));

        let next = get(&app, "/api/next-question", Some(&cookie)).await;
        assert_eq!(read_json(next).await, json!({"question": "Why Rust?"}));

        let submit = post_json(
            &app,
            "/api/submit-answer",
            Some(&cookie),
            json!({"answer": "Because of the borrow checker."}),
        )
        .await;
        assert_eq!(submit.status(), StatusCode::OK);
        assert_eq!(read_json(submit).await, json!({"time_up": false}));

        let transcript = read_json(get(&app, "/api/transcript", Some(&cookie)).await).await;
        assert_eq!(transcript["profile"]["type"], "Senior Backend Engineer");
        assert_eq!(transcript["durationSeconds"], 600);
        assert_eq!(transcript["history"].as_array().unwrap().len(), 1);
        assert_eq!(transcript["history"][0]["question"], "Why Rust?");
        assert_eq!(transcript["history"][0]["source"], "voice");
        assert!(transcript["history"][0]["askedAt"].is_string());
    }

    #[actix_web::test]
    async fn test_start_validation() {
        let harness = TestApp::new(ScriptedCompletion::always("{}"));
        let app = test::init_service(harness.app()).await;

        for body in [
            json!({"type": "Engineer", "resume": "x", "duration": 0}),
            json!({"type": "Engineer", "resume": "x", "duration": -5}),
            json!({"type": "Engineer", "resume": "x", "duration": "soon"}),
            json!({"type": "Engineer", "resume": "x"}),
            json!({"type": "", "resume": "x", "duration": 5}),
        ] {
            let response = post_json(&app, "/api/start", None, body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error = read_json(response).await;
            assert_eq!(error["error"]["type"], "invalid_input");
        }

        // Longer than the one-hour session cookie
        let too_long =
            post_json(&app, "/api/start", None, json!({"type": "QA Lead", "resume": "", "duration": 61}))
                .await;
        assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
        let error = read_json(too_long).await;
        assert_eq!(error["error"]["type"], "invalid_input");
        assert!(error["error"]["message"].as_str().unwrap().contains("60 minutes"));
        assert_eq!(harness.state.sessions.count().await.unwrap(), 0);

        let full_hour =
            post_json(&app, "/api/start", None, json!({"type": "QA Lead", "resume": "", "duration": 60}))
                .await;
        assert_eq!(full_hour.status(), StatusCode::OK);

        let numeric_string =
            post_json(&app, "/api/start", None, json!({"type": "QA Lead", "resume": "", "duration": "2.5"}))
                .await;
        assert_eq!(numeric_string.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_malformed_body_uses_error_shape() {
        let harness = TestApp::new(ScriptedCompletion::always("{}"));
        let app = test::init_service(harness.app()).await;

        let request = test::TestRequest::post()
            .uri("/api/start")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["type"], "invalid_input");
    }

    #[actix_web::test]
    async fn test_operations_before_start_fail() {
        let harness = TestApp::new(ScriptedCompletion::always("{}"));
        let app = test::init_service(harness.app()).await;

        for path in ["/api/next-question", "/api/transcript", "/api/status"] {
            let response = get(&app, path, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(read_json(response).await["error"]["type"], "not_started");
        }

        let submit = post_json(&app, "/api/submit-answer", None, json!({"answer": "hi"})).await;
        assert_eq!(read_json(submit).await["error"]["type"], "not_started");

        let result = get(&app, "/api/result", None).await;
        assert_eq!(result.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(result).await["error"]["type"], "no_data");
    }

    #[actix_web::test]
    async fn test_tampered_cookie_is_not_started() {
        let harness = TestApp::new(ScriptedCompletion::always("{}"));
        let app = test::init_service(harness.app()).await;

        let start = post_json(
            &app,
            "/api/start",
            None,
            json!({"type": "Data Engineer", "resume": "x", "duration": 5}),
        )
        .await;
        let mut cookie = session_cookie_from(&start);
        cookie.set_value(format!("{}x", cookie.value()));

        let response = get(&app, "/api/transcript", Some(&cookie)).await;
        assert_eq!(read_json(response).await["error"]["type"], "not_started");
    }

    #[actix_web::test]
    async fn test_second_submission_is_invalid_state() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Q?"}"#));
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 10).await;

        get(&app, "/api/next-question", Some(&cookie)).await;
        let first = post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "A"})).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "B"})).await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(second).await["error"]["type"], "invalid_state");

        let blank = post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "  "})).await;
        assert_eq!(read_json(blank).await["error"]["type"], "invalid_input");

        let transcript = read_json(get(&app, "/api/transcript", Some(&cookie)).await).await;
        assert_eq!(transcript["history"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_history_grows_by_one_per_answer_and_weakness_arrives() {
        let completion = ScriptedCompletion::always(r#"{"question": "Q?"}"#);
        let harness = TestApp::new(completion);
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 30).await;

        for round in 1..=3 {
            get(&app, "/api/next-question", Some(&cookie)).await;
            post_json(
                &app,
                "/api/submit-answer",
                Some(&cookie),
                json!({"answer": format!("Answer {}", round), "source": "text"}),
            )
            .await;
            let status = read_json(get(&app, "/api/status", Some(&cookie)).await).await;
            assert_eq!(status["answered"], round);
            assert!(status["pendingQuestion"].is_null());
        }

        wait_for_idle(&harness.state.analysis).await;
        let transcript = read_json(get(&app, "/api/transcript", Some(&cookie)).await).await;
        // Analyses reuse the scripted reply, which is not "pending"
        assert_eq!(transcript["history"][2]["weakness"], r#"{"question": "Q?"}"#);
        assert_eq!(transcript["history"][2]["source"], "text");
    }

    #[actix_web::test]
    async fn test_sparse_profile_prompt_asks_for_clarification() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Tell me more?"}"#));
        let app = test::init_service(harness.app()).await;

        let start = post_json(
            &app,
            "/api/start",
            None,
            json!({"type": "Backend Engineer", "resume": "Go and Rust, five years.", "duration": 10}),
        )
        .await;
        let cookie = session_cookie_from(&start);
        let next = read_json(get(&app, "/api/next-question", Some(&cookie)).await).await;
        assert!(!next["question"].as_str().unwrap().is_empty());

        let requests = harness.completion.requests();
        let prompt = &requests.last().unwrap().messages;
        let text: String = prompt.iter().map(|m| m.content.clone()).collect();
        assert!(text.contains("Profile sparse: true"));
        assert!(text.contains(QuestionStrategy::ClarifyProfile.hint()));
    }

    #[actix_web::test]
    async fn test_unusable_model_reply_falls_back_to_default_question() {
        let completion = ScriptedCompletion::always("Sure! Here's a question: why?").then_fail();
        let harness = TestApp::new(completion);
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 10).await;

        // Upstream failure, then a reply with no JSON object
        for _ in 0..2 {
            let next = read_json(get(&app, "/api/next-question", Some(&cookie)).await).await;
            assert_eq!(next["question"], DEFAULT_QUESTION);
        }
    }

    #[actix_web::test]
    async fn test_expired_interview_ends() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Q?"}"#));
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 1).await;

        get(&app, "/api/next-question", Some(&cookie)).await;
        post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "A"})).await;

        harness.clock.advance_secs(61);
        let next = read_json(get(&app, "/api/next-question", Some(&cookie)).await).await;
        assert_eq!(next, json!({"end": true}));

        let status = read_json(get(&app, "/api/status", Some(&cookie)).await).await;
        assert_eq!(status["phase"], "expired");
        assert_eq!(status["remainingSeconds"], 0);
    }

    #[actix_web::test]
    async fn test_grace_submission_after_expiry() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Last one?"}"#));
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 1).await;

        get(&app, "/api/next-question", Some(&cookie)).await;
        let calls_before = harness.completion.requests().len();
        harness.clock.advance_secs(90);

        // The pending question is repeated without asking the model again
        let repeat = read_json(get(&app, "/api/next-question", Some(&cookie)).await).await;
        assert_eq!(repeat["question"], "Last one?");
        assert_eq!(harness.completion.requests().len(), calls_before);

        let submit = post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "Done"})).await;
        assert_eq!(read_json(submit).await, json!({"time_up": true}));

        let next = read_json(get(&app, "/api/next-question", Some(&cookie)).await).await;
        assert_eq!(next, json!({"end": true}));
    }

    #[actix_web::test]
    async fn test_summary_used_after_five_answers() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Q?"}"#));
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 60).await;

        for i in 0..6 {
            get(&app, "/api/next-question", Some(&cookie)).await;
            post_json(
                &app,
                "/api/submit-answer",
                Some(&cookie),
                json!({"answer": format!("unique-answer-{}", i)}),
            )
            .await;
        }
        wait_for_idle(&harness.state.analysis).await;
        get(&app, "/api/next-question", Some(&cookie)).await;

        let requests = harness.completion.requests();
        let question_request = requests.last().unwrap();
        assert!(question_request.messages.iter().any(|m| m.content.starts_with(SUMMARY_HEADING)));
        assert!(question_request
            .messages
            .iter()
            .all(|m| !m.content.contains("unique-answer-0")));
        assert!(question_request
            .messages
            .iter()
            .any(|m| m.content.contains("unique-answer-5")));
    }

    #[actix_web::test]
    async fn test_restart_replaces_session() {
        let harness = TestApp::new(ScriptedCompletion::always(r#"{"question": "Q?"}"#));
        let app = test::init_service(harness.app()).await;
        let first = harness.start(&app, &long_resume(), 10).await;

        let restart = post_json(
            &app,
            "/api/start",
            Some(&first),
            json!({"type": "Platform Engineer", "resume": "x", "duration": 5}),
        )
        .await;
        let second = session_cookie_from(&restart);
        assert_ne!(first.value(), second.value());

        let old = get(&app, "/api/transcript", Some(&first)).await;
        assert_eq!(read_json(old).await["error"]["type"], "not_started");
        assert_eq!(harness.state.sessions.count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_result_endpoint() {
        let completion = ScriptedCompletion::always(r#"{"question": "Q?"}"#)
            .then(r#"{"question": "Q?"}"#)
            .then("Could be more specific.");
        let harness = TestApp::new(completion);
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 10).await;

        let empty = get(&app, "/api/result", Some(&cookie)).await;
        assert_eq!(read_json(empty).await["error"]["type"], "no_data");

        get(&app, "/api/next-question", Some(&cookie)).await;
        post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "A"})).await;
        wait_for_idle(&harness.state.analysis).await;

        // Fallback reply is a question object, not a verdict: fail closed
        let result = read_json(get(&app, "/api/result", Some(&cookie)).await).await;
        assert_eq!(result["status"], "Fail");
        assert_eq!(result["confidence"], 0);
        assert_eq!(result["reason"], "");
        assert_eq!(result["history"][0]["weakness"], "Could be more specific.");
    }

    #[actix_web::test]
    async fn test_success_verdict_with_null_reason() {
        let completion = ScriptedCompletion::always(
            r#"{"status": "Success", "confidence": 85, "reason": null}"#,
        )
        .then(r#"{"question": "Q?"}"#)
        .then("None.");
        let harness = TestApp::new(completion);
        let app = test::init_service(harness.app()).await;
        let cookie = harness.start(&app, &long_resume(), 10).await;

        get(&app, "/api/next-question", Some(&cookie)).await;
        post_json(&app, "/api/submit-answer", Some(&cookie), json!({"answer": "A"})).await;
        wait_for_idle(&harness.state.analysis).await;

        let result = read_json(get(&app, "/api/result", Some(&cookie)).await).await;
        assert_eq!(result["status"], "Success");
        assert_eq!(result["confidence"], 85);
        assert_eq!(result["reason"], "");
    }
}
