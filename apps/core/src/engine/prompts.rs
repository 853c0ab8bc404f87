//! Prompt text sent to the generative model.

use crate::models::{ConversationTurn, JournalContext};

/// Sentence the summarizer appends for gibberish entries when a score follows.
/// The score prompt maps it to 0.
pub const UNINTERPRETABLE_ENTRY_NOTE: &str = "This entry could not be interpreted, so its mood score is 0.";

pub fn score_prompt(summary: &str) -> String {
    format!(
        r#"You will be given a summary of a person's emotional state.
Rate the overall mood it describes on a scale from 0 to 10, where:
- 0 means extremely negative,
- 5 means neutral,
- 10 means extremely positive.
If the summary contains the sentence "{UNINTERPRETABLE_ENTRY_NOTE}", respond with 0.
Respond with a single integer only: no words, no punctuation, just the number.

Mood summary:
"""
{summary}
"""
"#
    )
}

/// `with_score` adds the scoring rule for nonsensical entries, used when the
/// summary is about to be scored.
pub fn summary_prompt(username: &str, journal: &str, with_score: bool) -> String {
    let nonsense_rule = if with_score {
        format!(
            "reply only with a brief, positive and supportive message that ends with the exact sentence \"{}\"",
            UNINTERPRETABLE_ENTRY_NOTE
        )
    } else {
        "reply only with a brief, positive and supportive message".to_string()
    };

    format!(
        r#"You are a caring emotional wellness assistant. {username} wrote the daily journal entry below.

"""
{journal}
"""

Greet {username} by name, then:
1. Summarize the key events and feelings expressed in the entry.
2. Gently point out anything that may deserve attention for their well-being. Describe possible areas of concern; do not diagnose or give medical advice.
3. Avoid alarming or clinical vocabulary. Never use words such as "suicidal" or "self harm".
4. Be empathetic and understanding: the entry is {username}'s personal experience.
5. Keep it concise, focused on what matters most for their well-being.
6. If the entry is gibberish or nonsensical, {nonsense_rule}.
7. If the entry is very short or lacks detail, offer a brief positive affirmation or a fitting supportive quote, and still follow the other instructions.

End with a kind, encouraging message. Write everything as one paragraph with no headings, lists or other formatting."#
    )
}

/// Renders turns as `User: ...` / `Assistant: ...` lines, oldest first.
pub fn render_history(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(ConversationTurn::to_string)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Whole moods keep one decimal ("9.0"), others print as-is ("8.25").
fn format_mood(mood: f64) -> String {
    if mood.fract() == 0.0 {
        format!("{:.1}", mood)
    } else {
        mood.to_string()
    }
}

/// `history` must already be cut down to the context window.
pub fn chat_prompt(
    message: &str,
    context: &JournalContext,
    history: &[ConversationTurn],
    message_is_question: bool,
) -> String {
    let rendered_history = if history.is_empty() {
        "(no previous messages)".to_string()
    } else {
        render_history(history)
    };
    let posture = if message_is_question {
        "The new message is phrased as a question."
    } else {
        "The new message is phrased as a statement."
    };

    format!(
        r#"You are a supportive assistant helping the user reflect on one of their journal entries.
Summary of the entry: {summary}
Mood score of the entry: {mood}/10
Full entry: {content}

Previous conversation:
{rendered_history}

User's new message: {message}
{posture}

Write a supportive reply of three to four sentences that:
1. Acknowledges their feelings and thoughts without quoting the journal word for word.
2. Refers to specific themes or emotions from the entry.
3. Ends with exactly ONE follow-up question OR one supportive statement, never both.
4. Keeps a warm, therapeutic tone.

Choose between a question and a statement like this:
- If the user just asked a question, end with a statement.
- If the user made a statement, end with a question.
- If the user seems to need validation, end with a statement.
- If the user seems open to reflection, end with a question.

Personalize the reply using the entry and the conversation so far.
Do not open with phrases like "Based on your journal" or "I see from your entry."

Reply:"#,
        summary = context.summary,
        mood = format_mood(context.mood),
        content = context.content,
    )
}
