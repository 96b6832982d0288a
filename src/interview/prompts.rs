//! # Prompt Construction
//!
//! Pure functions that turn session state into chat messages. Nothing here
//! talks to the network, which keeps the question policy testable.
//!
//! ## Question policy (first match wins):
//! 1. Sparse profile → clarifying question about the candidate's background
//! 2. Two minutes or less left → the single highest-priority clarifying question
//! 3. Last answer flagged weak → focused follow-up on that weakness
//! 4. Otherwise → a new role-relevant question

use super::session::{HistoryItem, InterviewSession};
use crate::llm::ChatMessage;
use serde_json::json;

/// Raw history entries included in the question prompt; older ones are summarized.
pub const HISTORY_WINDOW: usize = 5;

/// At or below this many seconds the interviewer wraps up.
pub const LOW_TIME_SECS: u64 = 120;

/// Asked whenever the model's question cannot be used.
pub const DEFAULT_QUESTION: &str = "Tell me about yourself.";

/// Heading of the context message carrying the summary of older history.
pub const SUMMARY_HEADING: &str = "Summary of earlier interview history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStrategy {
    ClarifyProfile,
    FinalPriority,
    FollowUp,
    NewTopic,
}

impl QuestionStrategy {
    pub fn choose(session: &InterviewSession, remaining_secs: u64) -> Self {
        if session.profile.is_sparse() {
            QuestionStrategy::ClarifyProfile
        } else if remaining_secs <= LOW_TIME_SECS {
            QuestionStrategy::FinalPriority
        } else if session.last_answer_flagged_weak() {
            QuestionStrategy::FollowUp
        } else {
            QuestionStrategy::NewTopic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStrategy::ClarifyProfile => "clarify_profile",
            QuestionStrategy::FinalPriority => "final_priority",
            QuestionStrategy::FollowUp => "follow_up",
            QuestionStrategy::NewTopic => "new_topic",
        }
    }

    /// Instruction line placed in the user message.
    pub fn hint(&self) -> &'static str {
        match self {
            QuestionStrategy::ClarifyProfile => {
                "The candidate profile is sparse: ask a clarifying question about their background, experience or target role."
            }
            QuestionStrategy::FinalPriority => {
                "Time is almost up: ask the single highest-priority clarifying question that remains."
            }
            QuestionStrategy::FollowUp => {
                "The last answer was flagged as weak: ask a focused follow-up that probes that weakness."
            }
            QuestionStrategy::NewTopic => {
                "Ask a new question relevant to the role that has not been covered yet."
            }
        }
    }
}

/// Older entries that fall outside the raw history window.
pub fn older_history(history: &[HistoryItem]) -> &[HistoryItem] {
    &history[..history.len().saturating_sub(HISTORY_WINDOW)]
}

/// The most recent entries sent verbatim.
pub fn recent_history(history: &[HistoryItem]) -> &[HistoryItem] {
    &history[history.len().saturating_sub(HISTORY_WINDOW)..]
}

fn format_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "(no questions answered yet)".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. Q: {}\n   A: {}\n   Weakness: {}",
                i + 1,
                item.question,
                item.answer,
                item.weakness
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Messages for the next interview question.
///
/// `summary` is the synopsis of `older_history`; it is injected as its own
/// context message and the older raw entries are left out.
pub fn question_messages(
    session: &InterviewSession,
    remaining_secs: u64,
    summary: Option<&str>,
) -> Vec<ChatMessage> {
    let strategy = QuestionStrategy::choose(session, remaining_secs);

    let system = format!(
        "You are a {personality} job interviewer ({tone}) conducting a timed, spoken {role} interview.\n\
         Decision policy:\n\
         - If the candidate profile is sparse (resume under 60 words or interview type under 2 words), prefer clarifying questions.\n\
         - If {low} seconds or less remain, ask only the single highest-priority clarifying question.\n\
         - If the last answer was flagged weak, prefer a focused follow-up.\n\
         - Otherwise ask a new question relevant to the role.\n\
         Ask exactly one question. Never ask multi-part questions. Keep it short enough to be spoken aloud.\n\
         Respond with a JSON object with exactly one field: {{\"question\": \"...\"}}",
        personality = session.personality,
        tone = session.personality.tone(),
        role = session.profile.role,
        low = LOW_TIME_SECS,
    );

    let mut messages = vec![ChatMessage::system(system)];

    if let Some(summary) = summary.map(str::trim).filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(format!("{}:\n{}", SUMMARY_HEADING, summary)));
    }

    let user = format!(
        "Interview type: {role}\n\
         Candidate resume:\n{resume}\n\n\
         Profile sparse: {sparse}\n\
         Remaining time: {remaining} seconds\n\
         Last answer flagged weak: {weak}\n\n\
         Recent history:\n{history}\n\n\
         Approach: {hint}",
        role = session.profile.role,
        resume = if session.profile.resume.trim().is_empty() {
            "(none provided)"
        } else {
            session.profile.resume.trim()
        },
        sparse = session.profile.is_sparse(),
        remaining = remaining_secs,
        weak = session.last_answer_flagged_weak(),
        history = format_history(recent_history(&session.history)),
        hint = strategy.hint(),
    );
    messages.push(ChatMessage::user(user));
    messages
}

/// Messages condensing older history into a two-sentence synopsis.
pub fn summary_messages(items: &[HistoryItem]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You summarize job interview transcripts. Reply with exactly two sentences describing \
             the candidate's overall strengths and weaknesses so far. Plain text only.",
        ),
        ChatMessage::user(format_history(items)),
    ]
}

/// Messages asking for a one-sentence weakness of a single answer.
pub fn weakness_messages(question: &str, answer: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You review job interview answers. Reply with a single sentence naming the most \
             important weakness of the answer. If there is no meaningful weakness reply \"None.\"",
        ),
        ChatMessage::user(format!("Question: {}\nAnswer: {}", question, answer)),
    ]
}

/// Messages asking for the final verdict over the whole interview.
pub fn verdict_messages(session: &InterviewSession) -> Vec<ChatMessage> {
    let questions: Vec<&str> = session.history.iter().map(|h| h.question.as_str()).collect();
    let answers: Vec<&str> = session.history.iter().map(|h| h.answer.as_str()).collect();
    let weaknesses: Vec<&str> = session.history.iter().map(|h| h.weakness.as_str()).collect();

    let transcript = json!({
        "interview_type": session.profile.role,
        "questions": questions,
        "answers": answers,
        "weaknesses": weaknesses,
    });

    vec![
        ChatMessage::system(
            "You are a hiring panel deciding whether a candidate passed a job interview. \
             Respond with a JSON object: {\"status\": \"Success\" or \"Fail\", \
             \"confidence\": integer from 0 to 100, \"reason\": string explaining a Fail \
             (empty string on Success)}.",
        ),
        ChatMessage::user(transcript.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::session::{sample_profile, AnswerSource, Personality, Profile};
    use chrono::{TimeZone, Utc};

    fn session_with(profile: Profile, answered: usize) -> InterviewSession {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let mut session =
            InterviewSession::start("s".into(), profile, 30.0, Personality::Challenging, now)
                .unwrap();
        for i in 0..answered {
            session.begin_question(format!("Question {}", i), now);
            session
                .record_answer(&format!("Answer {}", i), AnswerSource::Voice, now)
                .unwrap();
        }
        session
    }

    fn all_text(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_sparse_profile_gets_clarifying_hint() {
        let profile = Profile {
            role: "Backend Engineer".into(),
            resume: "Five years of Go and some Rust.".into(),
        };
        let session = session_with(profile, 0);
        assert_eq!(
            QuestionStrategy::choose(&session, 600),
            QuestionStrategy::ClarifyProfile
        );

        let text = all_text(&question_messages(&session, 600, None));
        assert!(text.contains("Profile sparse: true"));
        assert!(text.contains(QuestionStrategy::ClarifyProfile.hint()));
        assert!(text.contains("Ask exactly one question"));
    }

    #[test]
    fn test_low_time_and_follow_up_strategies() {
        let mut session = session_with(sample_profile(80), 1);
        assert_eq!(QuestionStrategy::choose(&session, 120), QuestionStrategy::FinalPriority);
        assert_eq!(QuestionStrategy::choose(&session, 600), QuestionStrategy::NewTopic);

        session.apply_weakness("Question 0", "Answer 0", "No concrete example given.");
        assert_eq!(QuestionStrategy::choose(&session, 600), QuestionStrategy::FollowUp);
        assert_eq!(QuestionStrategy::choose(&session, 90), QuestionStrategy::FinalPriority);
    }

    #[test]
    fn test_question_prompt_uses_summary_instead_of_old_items() {
        let session = session_with(sample_profile(80), 7);
        assert_eq!(older_history(&session.history).len(), 2);
        assert_eq!(recent_history(&session.history).len(), HISTORY_WINDOW);

        let messages = question_messages(&session, 900, Some("Strong on APIs. Weak on testing."));
        assert_eq!(messages.len(), 3);
        assert!(messages[1].content.starts_with(SUMMARY_HEADING));

        let text = all_text(&messages);
        assert!(!text.contains("Question 0"));
        assert!(!text.contains("Question 1"));
        for i in 2..7 {
            assert!(text.contains(&format!("Question {}", i)));
        }
    }

    #[test]
    fn test_short_history_has_no_summary_message() {
        let session = session_with(sample_profile(80), 3);
        assert!(older_history(&session.history).is_empty());
        let messages = question_messages(&session, 900, None);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("Question 0"));
    }

    #[test]
    fn test_verdict_prompt_carries_parallel_sequences() {
        let session = session_with(sample_profile(80), 2);
        let messages = verdict_messages(&session);
        let payload: serde_json::Value = serde_json::from_str(&messages[1].content).unwrap();
        assert_eq!(payload["questions"].as_array().unwrap().len(), 2);
        assert_eq!(payload["answers"][1], "Answer 1");
        assert_eq!(payload["weaknesses"][0], "pending");
    }
}
