//! # Interview Engine
//!
//! Orchestrates the completion calls behind an interview:
//! - **Question Generator**: next question, with older history summarized
//! - **Context Summarizer**: two-sentence synopsis of older history
//! - **Answer Analyzer**: one-sentence weakness of a single answer
//! - **Result Synthesizer**: final pass/fail verdict
//!
//! ## Failure policy:
//! - Question generation never fails: upstream and parse failures fall back
//!   to `DEFAULT_QUESTION`
//! - Summarization failures yield an empty synopsis
//! - Weakness analysis returns its error to the caller (the background queue
//!   logs and drops it)
//! - Verdict parse failures fail closed; upstream failures surface as 500

use super::parse::{parse_model_json, QuestionReply, Verdict};
use super::prompts::{self, QuestionStrategy, DEFAULT_QUESTION};
use super::session::{HistoryItem, InterviewSession};
use crate::error::{AppError, AppResult};
use crate::llm::{ChatMessage, CompletionClient, CompletionRequest};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{debug, warn};

const QUESTION_TEMPERATURE: f32 = 0.7;
const SUMMARY_TEMPERATURE: f32 = 0.2;
const WEAKNESS_TEMPERATURE: f32 = 0.3;
const VERDICT_TEMPERATURE: f32 = 0.0;

/// Result of a question request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuestion {
    pub text: String,
    pub strategy: QuestionStrategy,
    /// `DEFAULT_QUESTION` was substituted
    pub fallback: bool,
}

#[derive(Clone)]
pub struct InterviewEngine {
    completion: Arc<dyn CompletionClient>,
    chat_model: String,
    summary_model: String,
}

impl InterviewEngine {
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        chat_model: impl Into<String>,
        summary_model: impl Into<String>,
    ) -> Self {
        Self {
            completion,
            chat_model: chat_model.into(),
            summary_model: summary_model.into(),
        }
    }

    fn request(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        temperature: f32,
        json: bool,
    ) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages,
            temperature,
            json_response: json,
            max_tokens: None,
        }
    }

    /// Two-sentence synopsis of `items`. Empty input returns an empty string
    /// without calling the model.
    pub async fn summarize(&self, items: &[HistoryItem]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let request = self.request(
            &self.summary_model,
            prompts::summary_messages(items),
            SUMMARY_TEMPERATURE,
            false,
        );
        match self.completion.complete(request).await {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => {
                warn!(items = items.len(), "History summarization failed: {:#}", e);
                String::new()
            }
        }
    }

    /// Ask the model for the next question for `session`.
    pub async fn next_question(
        &self,
        session: &InterviewSession,
        remaining_secs: u64,
    ) -> GeneratedQuestion {
        let strategy = QuestionStrategy::choose(session, remaining_secs);
        let summary = self.summarize(prompts::older_history(&session.history)).await;
        let summary = (!summary.is_empty()).then_some(summary.as_str());

        let request = self.request(
            &self.chat_model,
            prompts::question_messages(session, remaining_secs, summary),
            QUESTION_TEMPERATURE,
            true,
        );

        let parsed = match self.completion.complete(request).await {
            Ok(raw) => parse_model_json::<QuestionReply>(&raw).map_err(|e| {
                warn!(session_id = %session.id, "Unusable question reply: {}", e);
            }),
            Err(e) => {
                warn!(session_id = %session.id, "Question generation failed: {:#}", e);
                Err(())
            }
        };

        match parsed {
            Ok(reply) => GeneratedQuestion {
                text: reply.question.trim().to_string(),
                strategy,
                fallback: false,
            },
            Err(()) => GeneratedQuestion {
                text: DEFAULT_QUESTION.to_string(),
                strategy,
                fallback: true,
            },
        }
    }

    /// One-sentence weakness of `answer` to `question`.
    pub async fn analyze_answer(&self, question: &str, answer: &str) -> Result<String> {
        let request = self.request(
            &self.chat_model,
            prompts::weakness_messages(question, answer),
            WEAKNESS_TEMPERATURE,
            false,
        );
        let weakness = self.completion.complete(request).await?;
        let weakness = weakness.trim();
        if weakness.is_empty() {
            return Err(anyhow!("empty weakness analysis"));
        }
        Ok(weakness.to_string())
    }

    /// Pass/fail verdict over the whole interview.
    pub async fn synthesize_verdict(&self, session: &InterviewSession) -> AppResult<Verdict> {
        if session.history.is_empty() {
            return Err(AppError::NoData);
        }

        let request = self.request(
            &self.chat_model,
            prompts::verdict_messages(session),
            VERDICT_TEMPERATURE,
            true,
        );
        let raw = self.completion.complete(request).await.map_err(|e| {
            warn!(session_id = %session.id, "Result synthesis failed: {:#}", e);
            AppError::Upstream("Result synthesis failed".to_string())
        })?;

        Ok(parse_model_json::<Verdict>(&raw).unwrap_or_else(|e| {
            debug!(session_id = %session.id, "Unusable verdict, failing closed: {}", e);
            Verdict::fail_closed()
        }))
    }
}
