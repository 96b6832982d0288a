//! # Interview Module
//!
//! Everything about one candidate's timed interview, independent of HTTP.
//!
//! ## Key Components:
//! - **Session**: state machine, timing and history (`session`)
//! - **Session Store**: pluggable storage with lazy expiry (`store`)
//! - **Clock**: injectable time source (`clock`)
//! - **Prompts**: question policy and prompt construction (`prompts`)
//! - **Parse**: typed boundary for model output (`parse`)
//! - **Engine**: question, summary, weakness and verdict calls (`engine`)
//! - **Analysis**: background weakness queue (`analysis`)
//! - **Speech**: text-to-speech request shaping (`speech`)

pub mod analysis;
pub mod clock;
pub mod engine;
pub mod parse;
pub mod prompts;
pub mod session;
pub mod speech;
pub mod store;

pub use analysis::{AnalysisJob, AnalysisQueue, StoreWeaknessWriter};
pub use clock::{Clock, SystemClock};
pub use engine::InterviewEngine;
pub use session::{AnswerSource, InterviewSession, Personality, Profile, SessionPhase};
pub use speech::SpeechAdapter;
pub use store::{InMemorySessionStore, SessionStore};
