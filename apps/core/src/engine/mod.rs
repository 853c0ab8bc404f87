//! # Engine
//!
//! The mood-aware response engine: scoring, summarizing, and the grounded
//! follow-up chat, all on top of one injected [`GenerativeModel`].
//!
//! - `score`: bare-integer mood score extraction with clamping
//! - `summary`: empathetic entry summaries, optionally scored
//! - `chat`: history windowing, grounding prompt, offline fallback
//! - `prompts`: the prompt text itself

pub mod chat;
pub mod prompts;
pub mod score;
pub mod summary;

use crate::llm::GenerativeModel;
use crate::models::{ConversationTurn, JournalContext, MoodAnalysis, MoodScore, SummaryOutcome};
use std::sync::Arc;

pub use chat::{ChatReply, ReplySource, HISTORY_WINDOW};

/// Entry point for the HTTP layer.
///
/// Holds nothing but the shared model client, so it is cheap to clone and safe
/// to call from any number of tasks at once.
pub struct MoodEngine<M>
where
    M: GenerativeModel + ?Sized,
{
    model: Arc<M>,
}

impl<M> Clone for MoodEngine<M>
where
    M: GenerativeModel + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

impl<M> MoodEngine<M>
where
    M: GenerativeModel + ?Sized,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Mood score of a summary, or `MoodScore::UNAVAILABLE` if scoring failed.
    pub async fn extract_score(&self, summary: &str) -> MoodScore {
        score::extract_score(self.model.as_ref(), summary).await
    }

    pub async fn summarize(&self, username: &str, journal: &str) -> SummaryOutcome {
        summary::summarize(self.model.as_ref(), username, journal).await
    }

    pub async fn summarize_with_score(&self, username: &str, journal: &str) -> MoodAnalysis {
        summary::summarize_with_score(self.model.as_ref(), username, journal).await
    }

    /// Reply to a chat message together with how it was produced.
    pub async fn reply(
        &self,
        message: &str,
        context: &JournalContext,
        history: &[ConversationTurn],
    ) -> ChatReply {
        chat::reply(self.model.as_ref(), message, context, history).await
    }

    /// Reply text for a chat message. Always non-empty.
    pub async fn respond(
        &self,
        message: &str,
        context: &JournalContext,
        history: &[ConversationTurn],
    ) -> String {
        self.reply(message, context, history).await.text
    }
}
