//! # Interview Session State
//!
//! One `InterviewSession` per candidate. The session is a small state machine:
//!
//! ```text
//! NotStarted --start--> Active --(now >= start + duration)--> Expired
//! ```
//!
//! `Active -> Expired` is never scheduled. Every request recomputes the phase
//! from the fixed start timestamp, so expiry is observed lazily.
//!
//! ## Question / answer cycle:
//! - `begin_question` sets the pending question and stamps when it was asked
//! - `record_answer` appends a `HistoryItem` and clears the pending question
//!
//! A pending question can still be answered after expiry (grace submission).

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder weakness until background analysis completes.
pub const PENDING_WEAKNESS: &str = "pending";

/// Resumes shorter than this many words count as a sparse profile.
pub const SPARSE_RESUME_WORDS: usize = 60;

/// Interview types shorter than this many words count as a sparse profile.
pub const SPARSE_TYPE_WORDS: usize = 2;

/// Interviewer tone, chosen at random when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Friendly,
    Formal,
    Challenging,
}

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Friendly,
        Personality::Formal,
        Personality::Challenging,
    ];

    pub fn random() -> Self {
        Self::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(Personality::Formal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Friendly => "friendly",
            Personality::Formal => "formal",
            Personality::Challenging => "challenging",
        }
    }

    /// How the interviewer should sound in the question prompt.
    pub fn tone(&self) -> &'static str {
        match self {
            Personality::Friendly => "warm and encouraging, puts the candidate at ease",
            Personality::Formal => "polite, neutral and structured",
            Personality::Challenging => "direct and demanding, probes for depth and precision",
        }
    }

    /// Style instruction for the speech synthesizer.
    pub fn voice_instructions(&self) -> &'static str {
        match self {
            Personality::Friendly => {
                "Speak in a warm, friendly and encouraging tone at a relaxed pace."
            }
            Personality::Formal => "Speak in a calm, professional and neutral tone.",
            Personality::Challenging => {
                "Speak in a crisp, serious and direct tone, like a demanding senior interviewer."
            }
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate profile supplied at start. Never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Role or track being interviewed for, e.g. "Backend Engineer"
    #[serde(rename = "type")]
    pub role: String,
    /// Free-text candidate background
    pub resume: String,
}

impl Profile {
    /// Not enough detail to ask a substantive question yet.
    pub fn is_sparse(&self) -> bool {
        word_count(&self.resume) < SPARSE_RESUME_WORDS || word_count(&self.role) < SPARSE_TYPE_WORDS
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// How the candidate delivered an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    #[default]
    Voice,
    Text,
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub question: String,
    pub answer: String,
    /// One-sentence critique; `"pending"` until analysis finishes
    pub weakness: String,
    pub asked_at: DateTime<Utc>,
    pub answered_at: DateTime<Utc>,
    pub source: AnswerSource,
}

impl HistoryItem {
    /// Analysis finished and found something worth following up on.
    pub fn is_flagged_weak(&self) -> bool {
        let weakness = self.weakness.trim().trim_end_matches('.').to_ascii_lowercase();
        !(weakness.is_empty()
            || weakness == PENDING_WEAKNESS
            || weakness == "none"
            || weakness == "n/a")
    }
}

/// Lifecycle phase of a candidate's interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NotStarted,
    Active,
    Expired,
}

impl SessionPhase {
    pub fn of(session: Option<&InterviewSession>, now: DateTime<Utc>) -> Self {
        match session {
            None => SessionPhase::NotStarted,
            Some(session) if session.is_expired(now) => SessionPhase::Expired,
            Some(_) => SessionPhase::Active,
        }
    }
}

/// Violations of the session's own rules.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Duration was not a positive, finite number of minutes
    InvalidDuration(String),
    /// Interview type was blank
    InvalidProfile(String),
    /// An answer arrived without a pending question
    NoPendingQuestion,
    /// The answer was blank
    EmptyAnswer,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidDuration(msg) => write!(f, "Invalid duration: {}", msg),
            SessionError::InvalidProfile(msg) => write!(f, "Invalid profile: {}", msg),
            SessionError::NoPendingQuestion => write!(f, "No question is awaiting an answer"),
            SessionError::EmptyAnswer => write!(f, "Answer must not be empty"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Convert a requested duration in minutes into whole seconds.
///
/// Fractional minutes are allowed; anything that rounds below one second is
/// bumped to one second.
pub fn duration_seconds_from_minutes(minutes: f64) -> Result<u64, SessionError> {
    if !minutes.is_finite() {
        return Err(SessionError::InvalidDuration(
            "duration must be a number".to_string(),
        ));
    }
    if minutes <= 0.0 {
        return Err(SessionError::InvalidDuration(
            "duration must be greater than 0".to_string(),
        ));
    }
    let seconds = (minutes * 60.0).round();
    if seconds > u32::MAX as f64 {
        return Err(SessionError::InvalidDuration("duration is too long".to_string()));
    }
    Ok((seconds as u64).max(1))
}

/// Server-side state of one candidate's interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub profile: Profile,
    pub personality: Personality,
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub history: Vec<HistoryItem>,
    pub current_question: Option<String>,
    pub current_question_started_at: Option<DateTime<Utc>>,
}

impl InterviewSession {
    /// `NotStarted -> Active`.
    pub fn start(
        id: String,
        profile: Profile,
        duration_minutes: f64,
        personality: Personality,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if profile.role.trim().is_empty() {
            return Err(SessionError::InvalidProfile(
                "interview type must not be empty".to_string(),
            ));
        }
        let duration_seconds = duration_seconds_from_minutes(duration_minutes)?;

        Ok(Self {
            id,
            profile,
            personality,
            start_time: now,
            duration_seconds,
            history: Vec::new(),
            current_question: None,
            current_question_started_at: None,
        })
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::seconds(self.duration_seconds as i64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> SessionPhase {
        SessionPhase::of(Some(self), now)
    }

    /// Whole seconds left, rounded up and never negative.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        let remaining_ms = (self.end_time() - now).num_milliseconds().max(0) as u64;
        remaining_ms.div_ceil(1000)
    }

    /// Whole seconds since start, capped at the configured duration.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = (now - self.start_time).num_seconds().max(0) as u64;
        elapsed.min(self.duration_seconds)
    }

    pub fn has_pending_question(&self) -> bool {
        self.current_question.is_some()
    }

    /// Time is up, nothing is waiting for an answer and something was answered.
    pub fn should_end(&self, now: DateTime<Utc>) -> bool {
        self.is_expired(now) && !self.has_pending_question() && !self.history.is_empty()
    }

    pub fn last_answer_flagged_weak(&self) -> bool {
        self.history
            .last()
            .map(HistoryItem::is_flagged_weak)
            .unwrap_or(false)
    }

    /// Make `question` the pending question.
    pub fn begin_question(&mut self, question: String, now: DateTime<Utc>) {
        self.current_question = Some(question);
        self.current_question_started_at = Some(now);
    }

    /// Close the pending question with the candidate's answer.
    ///
    /// The pending question is cleared on success. Returns the appended item.
    pub fn record_answer(
        &mut self,
        answer: &str,
        source: AnswerSource,
        now: DateTime<Utc>,
    ) -> Result<&HistoryItem, SessionError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        let question = self
            .current_question
            .take()
            .ok_or(SessionError::NoPendingQuestion)?;
        let asked_at = self.current_question_started_at.take().unwrap_or(now);

        self.history.push(HistoryItem {
            question,
            answer: answer.to_string(),
            weakness: PENDING_WEAKNESS.to_string(),
            asked_at,
            answered_at: now,
            source,
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Attach an analysis result to the first entry matching `question` and
    /// `answer` by content. With duplicate pairs only the earliest is updated.
    pub fn apply_weakness(&mut self, question: &str, answer: &str, weakness: &str) -> bool {
        match self
            .history
            .iter_mut()
            .find(|item| item.question == question && item.answer == answer)
        {
            Some(item) => {
                item.weakness = weakness.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(resume_words: usize) -> Profile {
    Profile {
        role: "Senior Backend Engineer".to_string(),
        resume: vec!["rust"; resume_words].join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn started(minutes: f64) -> InterviewSession {
        InterviewSession::start(
            "s1".into(),
            sample_profile(80),
            minutes,
            Personality::Formal,
            t0(),
        )
        .unwrap()
    }

    #[test]
    fn test_duration_validation() {
        assert_eq!(duration_seconds_from_minutes(10.0), Ok(600));
        assert_eq!(duration_seconds_from_minutes(0.5), Ok(30));
        assert_eq!(duration_seconds_from_minutes(0.001), Ok(1));
        assert!(duration_seconds_from_minutes(0.0).is_err());
        assert!(duration_seconds_from_minutes(-3.0).is_err());
        assert!(duration_seconds_from_minutes(f64::NAN).is_err());
        assert!(duration_seconds_from_minutes(f64::INFINITY).is_err());
    }

    #[test]
    fn test_start_rejects_blank_type() {
        let profile = Profile {
            role: "  ".into(),
            resume: "anything".into(),
        };
        let result = InterviewSession::start("s".into(), profile, 5.0, Personality::Friendly, t0());
        assert!(matches!(result, Err(SessionError::InvalidProfile(_))));
    }

    #[test]
    fn test_sparse_profile_heuristic() {
        assert!(sample_profile(59).is_sparse());
        assert!(!sample_profile(60).is_sparse());

        let one_word_role = Profile {
            role: "Engineer".into(),
            resume: vec!["word"; 100].join(" "),
        };
        assert!(one_word_role.is_sparse());
    }

    #[test]
    fn test_remaining_time_never_negative_and_non_increasing() {
        let session = started(1.0);
        let mut previous = u64::MAX;
        for offset in [0, 1, 30, 59, 60, 61, 3600] {
            let remaining = session.remaining_seconds(t0() + Duration::seconds(offset));
            assert!(remaining <= previous);
            previous = remaining;
        }
        assert_eq!(session.remaining_seconds(t0()), 60);
        assert_eq!(session.remaining_seconds(t0() + Duration::seconds(61)), 0);
        assert_eq!(session.remaining_seconds(t0() + Duration::milliseconds(59_500)), 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let session = started(1.0);
        assert_eq!(session.phase(t0() + Duration::seconds(59)), SessionPhase::Active);
        assert_eq!(session.phase(t0() + Duration::seconds(60)), SessionPhase::Expired);
        assert_eq!(SessionPhase::of(None, t0()), SessionPhase::NotStarted);
    }

    #[test]
    fn test_answer_clears_pending_question() {
        let mut session = started(10.0);
        session.begin_question("Why Rust?".into(), t0());
        assert!(session.has_pending_question());

        let item = session
            .record_answer(" Memory safety. ", AnswerSource::Voice, t0() + Duration::seconds(20))
            .unwrap();
        assert_eq!(item.answer, "Memory safety.");
        assert_eq!(item.weakness, PENDING_WEAKNESS);
        assert_eq!(item.asked_at, t0());

        assert!(!session.has_pending_question());
        assert!(session.current_question_started_at.is_none());
        assert_eq!(session.history.len(), 1);

        // A second answer without a new question is out of sequence
        let again = session.record_answer("More", AnswerSource::Voice, t0());
        assert_eq!(again.unwrap_err(), SessionError::NoPendingQuestion);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_empty_answer_keeps_question_pending() {
        let mut session = started(10.0);
        session.begin_question("Q".into(), t0());
        let result = session.record_answer("   ", AnswerSource::Text, t0());
        assert_eq!(result.unwrap_err(), SessionError::EmptyAnswer);
        assert!(session.has_pending_question());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_should_end_requires_history_and_no_pending() {
        let mut session = started(1.0);
        let late = t0() + Duration::seconds(61);
        assert!(!session.should_end(late)); // empty history

        session.begin_question("Q".into(), t0());
        session.record_answer("A", AnswerSource::Voice, t0()).unwrap();
        assert!(session.should_end(late));
        assert!(!session.should_end(t0() + Duration::seconds(30)));

        session.begin_question("Q2".into(), t0());
        assert!(!session.should_end(late)); // grace: pending question
        session.record_answer("A2", AnswerSource::Voice, late).unwrap();
        assert!(session.should_end(late));
    }

    #[test]
    fn test_apply_weakness_updates_first_match() {
        let mut session = started(10.0);
        for _ in 0..2 {
            session.begin_question("Same?".into(), t0());
            session.record_answer("Same.", AnswerSource::Voice, t0()).unwrap();
        }
        assert!(session.apply_weakness("Same?", "Same.", "Too vague."));
        assert_eq!(session.history[0].weakness, "Too vague.");
        assert_eq!(session.history[1].weakness, PENDING_WEAKNESS);
        assert!(!session.apply_weakness("Other?", "Same.", "x"));
    }

    #[test]
    fn test_weak_flag() {
        let mut session = started(10.0);
        assert!(!session.last_answer_flagged_weak());
        session.begin_question("Q".into(), t0());
        session.record_answer("A", AnswerSource::Voice, t0()).unwrap();
        assert!(!session.last_answer_flagged_weak()); // still pending

        session.apply_weakness("Q", "A", "None.");
        assert!(!session.last_answer_flagged_weak());

        session.apply_weakness("Q", "A", "Did not quantify the impact.");
        assert!(session.last_answer_flagged_weak());
    }

    #[test]
    fn test_personality_round_trip_names() {
        for personality in Personality::ALL {
            let json = serde_json::to_string(&personality).unwrap();
            assert_eq!(json, format!("\"{}\"", personality.as_str()));
        }
        assert!(Personality::ALL.contains(&Personality::random()));
    }
}
