use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Speaker label used when a turn is rendered into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single message of the follow-up chat about a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role.label(), self.content)
    }
}

/// The journal entry a chat session is grounded in. Fixed for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalContext {
    /// Full text of the entry as the user wrote it.
    pub content: String,
    /// Summary previously generated for the entry.
    pub summary: String,
    /// Mood score of the entry, usually on a 0-10 scale.
    pub mood: f64,
}

/// A mood score in `0..=10`, or the marker for a scoring call that failed.
///
/// The only way to build an available score is [`MoodScore::clamped`], so an
/// out-of-range value can never be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<u8>")]
pub struct MoodScore(Option<u8>);

impl MoodScore {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// The scoring call failed (service error or unparseable answer).
    pub const UNAVAILABLE: MoodScore = MoodScore(None);

    /// Clamps any integer into `0..=10`.
    pub fn clamped(raw: i64) -> Self {
        let bounded = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        MoodScore(Some(bounded as u8))
    }

    pub fn value(self) -> Option<u8> {
        self.0
    }

    pub fn is_available(self) -> bool {
        self.0.is_some()
    }

    /// Integer form used by older clients, where `-1` meant "no score".
    pub fn legacy_value(self) -> i32 {
        self.0.map(i32::from).unwrap_or(-1)
    }
}

impl From<Option<i64>> for MoodScore {
    fn from(raw: Option<i64>) -> Self {
        raw.map(MoodScore::clamped).unwrap_or(MoodScore::UNAVAILABLE)
    }
}

impl From<MoodScore> for Option<u8> {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

impl fmt::Display for MoodScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("unavailable"),
        }
    }
}

/// Prefix older clients matched on to detect a failed summary.
pub const LEGACY_SUMMARY_ERROR_PREFIX: &str = "Error analyzing mood: ";

/// Result of asking the model for a summary. Failure is a value, not an error.
///
/// Serializes as the legacy string form, see [`SummaryOutcome::legacy_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum SummaryOutcome {
    Generated(String),
    Failed { cause: String },
}

impl SummaryOutcome {
    pub fn summary(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Generated(text) => Some(text),
            SummaryOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SummaryOutcome::Failed { .. })
    }

    /// The summary text, or `"Error analyzing mood: <cause>"` on failure.
    pub fn legacy_text(&self) -> String {
        match self {
            SummaryOutcome::Generated(text) => text.clone(),
            SummaryOutcome::Failed { cause } => format!("{}{}", LEGACY_SUMMARY_ERROR_PREFIX, cause),
        }
    }
}

impl From<SummaryOutcome> for String {
    fn from(outcome: SummaryOutcome) -> Self {
        match outcome {
            SummaryOutcome::Generated(text) => text,
            failed => failed.legacy_text(),
        }
    }
}

/// Combined output of summarizing and scoring one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodAnalysis {
    pub mood_score: MoodScore,
    pub summary: SummaryOutcome,
}

/// Payload of a follow-up chat message about a saved entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1))]
    pub entry_id: String,
    pub entry_content: String,
    pub entry_summary: String,
    /// Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "number_or_numeric_string")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub entry_mood: f64,
    pub conversation_history: Vec<ConversationTurn>,
}

impl ChatRequest {
    /// Validates the request and splits it into what the chat orchestrator needs.
    pub fn into_parts(self) -> Result<(String, JournalContext, Vec<ConversationTurn>), AppError> {
        self.validate()?;
        if !self.entry_mood.is_finite() {
            return Err(AppError::Validation(format!(
                "entry_mood must be a finite number, got {}",
                self.entry_mood
            )));
        }
        let context = JournalContext {
            content: self.entry_content,
            summary: self.entry_summary,
            mood: self.entry_mood,
        };
        Ok((self.message, context, self.conversation_history))
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => value,
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("entry_mood is not a number: {}", e)))?,
    };

    // NaN slips past range checks, and infinities are never a mood.
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "entry_mood must be a finite number, got {}",
            value
        )));
    }
    Ok(value)
}

/// The document handed to the persistence layer once an entry is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub text: String,
    pub mood_score: u8,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Builds a record from a finished analysis.
    ///
    /// Entries without text, with a failed summary, or without a score are
    /// rejected rather than stored half-empty.
    pub fn from_analysis(text: impl Into<String>, analysis: &MoodAnalysis) -> Result<Self, AppError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Validation("journal text is empty".to_string()));
        }
        let summary = analysis
            .summary
            .summary()
            .ok_or_else(|| AppError::Validation("summary generation failed".to_string()))?;
        let mood_score = analysis
            .mood_score
            .value()
            .ok_or_else(|| AppError::Validation("mood score is unavailable".to_string()))?;

        Ok(Self {
            text,
            mood_score,
            summary: summary.to_string(),
            created_at: Utc::now(),
        })
    }
}
