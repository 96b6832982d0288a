//! # Model Output Parsing
//!
//! The single boundary where free-text model replies become typed values.
//! Every reply is expected to be one JSON object. Markdown code fences and
//! prose around the object are tolerated; anything else is a `ParseFailure`
//! and callers substitute their own fallback.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a model reply could not be turned into the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseFailure {
    /// No `{ ... }` object found in the reply
    NoJsonObject,
    /// An object was found but did not match the schema
    Schema(String),
    /// The object matched the schema but a value was unusable
    Invalid(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::NoJsonObject => write!(f, "no JSON object in model reply"),
            ParseFailure::Schema(msg) => write!(f, "reply does not match schema: {}", msg),
            ParseFailure::Invalid(msg) => write!(f, "invalid value in reply: {}", msg),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Types that can check their own values after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ParseFailure>;
}

/// Locate the outermost JSON object in `raw`.
fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse a model reply into `T` and validate it.
pub fn parse_model_json<T>(raw: &str) -> Result<T, ParseFailure>
where
    T: DeserializeOwned + Validate,
{
    let object = extract_object(raw).ok_or(ParseFailure::NoJsonObject)?;
    let value: T =
        serde_json::from_str(object).map_err(|e| ParseFailure::Schema(e.to_string()))?;
    value.validate()?;
    Ok(value)
}

/// `{"question": "..."}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionReply {
    pub question: String,
}

impl Validate for QuestionReply {
    fn validate(&self) -> Result<(), ParseFailure> {
        if self.question.trim().is_empty() {
            return Err(ParseFailure::Invalid("question is blank".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    Success,
    Fail,
}

/// Final pass/fail assessment of an interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub confidence: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
}

/// Models send `null` for "no reason"; treat it like an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Verdict {
    /// Used whenever the model's verdict cannot be trusted.
    pub fn fail_closed() -> Self {
        Self {
            status: VerdictStatus::Fail,
            confidence: 0,
            reason: String::new(),
        }
    }
}

impl Validate for Verdict {
    fn validate(&self) -> Result<(), ParseFailure> {
        if !(0..=100).contains(&self.confidence) {
            return Err(ParseFailure::Invalid(format!(
                "confidence {} outside 0..=100",
                self.confidence
            )));
        }
        Ok(())
    }
}
