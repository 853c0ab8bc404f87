use crate::brain;
use crate::engine::prompts;
use crate::llm::GenerativeModel;
use crate::models::{ConversationTurn, JournalContext};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Number of most recent turns that reach the prompt. Older turns are dropped.
pub const HISTORY_WINDOW: usize = 5;

/// What produced a chat reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

/// The last [`HISTORY_WINDOW`] turns, in their original order.
pub fn recent_history(history: &[ConversationTurn]) -> &[ConversationTurn] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

/// Answers a follow-up message about a journal entry.
///
/// One model call at most. The model's text is returned untouched; if the call
/// fails or comes back blank, the deterministic offline reply is used instead.
#[instrument(skip_all, fields(history_len = history.len(), mood = context.mood))]
pub async fn reply<M>(
    model: &M,
    message: &str,
    context: &JournalContext,
    history: &[ConversationTurn],
) -> ChatReply
where
    M: GenerativeModel + ?Sized,
{
    let window = recent_history(history);
    let prompt = prompts::chat_prompt(message, context, window, brain::is_question(message));

    match model.generate(prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            info!("Chat reply generated by model");
            return ChatReply {
                text,
                source: ReplySource::Model,
            };
        }
        Ok(_) => warn!("Model returned an empty chat reply, using fallback"),
        Err(e) => warn!(kind = %e.kind(), "Error generating chat response: {}", e),
    }

    let text = brain::fallback_reply(message, context.mood);
    info!("Chat reply generated by fallback");
    ChatReply {
        text: text.to_string(),
        source: ReplySource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_history_keeps_last_five() {
        let history: Vec<ConversationTurn> = (0..8).map(|i| ConversationTurn::user(format!("m{}", i))).collect();
        let window = recent_history(&history);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].content, "m3");
        assert_eq!(window[4].content, "m7");
    }

    #[test]
    fn test_recent_history_short_input() {
        let history = vec![ConversationTurn::user("only")];
        assert_eq!(recent_history(&history).len(), 1);
        assert!(recent_history(&[]).is_empty());
    }
}
