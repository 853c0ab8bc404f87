//! Mood journal core: empathetic summaries, mood scores, and a follow-up chat
//! that stays grounded in the journal entry.
//!
//! The generative model is injected as a [`GenerativeModel`]; when it is down,
//! scoring and summarizing degrade to explicit "unavailable"/"failed" values and
//! the chat falls back to deterministic replies from [`brain`].

pub mod brain;
pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod logging;
pub mod models;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use engine::{ChatReply, MoodEngine, ReplySource};
pub use error::AppError;
pub use llm::{GeminiClient, GenerativeModel};
pub use models::{
    ChatRequest, ConversationTurn, JournalContext, JournalEntry, MoodAnalysis, MoodScore, Role,
    SummaryOutcome,
};
