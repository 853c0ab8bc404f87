//! # Brain Module
//!
//! Fast, deterministic, non-LLM reply path for the follow-up chat.
//! Runs only when the generative model cannot answer.
//!
//! ## Components
//! - `intent`: keyword classification of the incoming message and question detection
//! - `reply`: mood tiers, response style, and the fixed reply templates

pub mod intent;
pub mod reply;

pub use intent::{classify, classify_message, is_question, Category, Classification};
pub use reply::{select_reply, MoodTier, ResponseStyle};

use tracing::debug;

/// Full offline reply for a message, given the entry's mood.
pub fn fallback_reply(message: &str, mood: f64) -> &'static str {
    let classification = classify_message(message);
    debug!(
        category = %classification.category,
        is_question = classification.is_question,
        matched_keyword = classification.matched_keyword.as_deref().unwrap_or("none"),
        "Message classified for fallback reply"
    );
    select_reply(classification.category, classification.is_question, mood)
}
