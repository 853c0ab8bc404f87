//! Fixed fallback replies.
//!
//! Every reply is one of a finite set of static templates. User text is never
//! spliced in, so an offline reply cannot echo anything back.

use super::intent::Category;
use serde::{Deserialize, Serialize};

/// How a reply ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    /// Ends with a supportive statement, no question mark anywhere.
    Statement,
    /// Ends with a single follow-up question.
    Question,
}

impl ResponseStyle {
    /// Mirror the user's posture: answer a question with a statement and a
    /// statement with a question.
    pub fn for_message(is_question: bool) -> Self {
        if is_question {
            ResponseStyle::Statement
        } else {
            ResponseStyle::Question
        }
    }
}

/// Coarse band of an entry's mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTier {
    Positive,
    Neutral,
    Negative,
}

impl MoodTier {
    /// `>= 7` positive, `>= 4` neutral, anything else (including NaN) negative.
    pub fn from_mood(mood: f64) -> Self {
        if mood >= 7.0 {
            MoodTier::Positive
        } else if mood >= 4.0 {
            MoodTier::Neutral
        } else {
            MoodTier::Negative
        }
    }
}

struct ReplyPair {
    statement: &'static str,
    question: &'static str,
}

impl ReplyPair {
    fn pick(&self, style: ResponseStyle) -> &'static str {
        match style {
            ResponseStyle::Statement => self.statement,
            ResponseStyle::Question => self.question,
        }
    }
}

const POSITIVE_MOOD: ReplyPair = ReplyPair {
    statement: "Your positive mood is wonderful! It's clear you're experiencing genuine joy in your life right now. These moments of happiness are valuable and worth celebrating.",
    question: "Your positive mood is wonderful! It's clear you're experiencing genuine joy in your life right now. What specific moment or interaction contributed most to these good feelings?",
};

const NEUTRAL_MOOD: ReplyPair = ReplyPair {
    statement: "I sense you're feeling somewhat neutral about things. Life has its ups and downs, and it's okay to feel balanced rather than extremely positive or negative. A neutral mood can be a sign of emotional stability.",
    question: "I sense you're feeling somewhat neutral about things. Life has its ups and downs, and it's okay to feel balanced. Is there a particular area of your life you'd like to explore or improve?",
};

const NEGATIVE_MOOD: ReplyPair = ReplyPair {
    statement: "I hear that you're feeling down, and I want you to know that's completely valid. Everyone experiences difficult emotions, and it's okay to not be okay. Your feelings are important and deserve to be acknowledged.",
    question: "I hear that you're feeling down, and I want you to know that's completely valid. Everyone experiences difficult emotions, and it's okay to not be okay. Would you like to talk about what's weighing on you?",
};

const REFLECTIVE: ReplyPair = ReplyPair {
    statement: "That's a thoughtful question that shows you're engaging in self-reflection. Your journal reveals someone who's processing their experiences thoughtfully. This kind of self-awareness is a valuable skill for personal growth.",
    question: "That's a thoughtful question that shows you're engaging in self-reflection. Your journal reveals someone who's processing their experiences thoughtfully. What insights are you hoping to gain from exploring this further?",
};

const ADVICE: ReplyPair = ReplyPair {
    statement: "I'm here to listen and support you as you navigate your thoughts and feelings. Your journal shows someone who's thoughtful about their experiences and open to growth. Remember, your feelings are valid, and there's no right or wrong way to process them.",
    question: "I'm here to listen and support you as you navigate your thoughts and feelings. Your journal shows someone who's thoughtful about their experiences and open to growth. What specific aspect would you like to discuss?",
};

const GRATITUDE: ReplyPair = ReplyPair {
    statement: "Practicing gratitude is a powerful way to shift your perspective and enhance your well-being. It's wonderful that you're recognizing the positive aspects of your life, even during challenging times. This practice can significantly improve your overall mood and outlook.",
    question: "Practicing gratitude is a powerful way to shift your perspective and enhance your well-being. It's wonderful that you're recognizing the positive aspects of your life. What's one thing you're feeling particularly thankful for today?",
};

const NEUTRAL: ReplyPair = ReplyPair {
    statement: "I'm listening and here to support you as you process your thoughts and feelings. Your journal shows someone who's thoughtful and reflective about their experiences. Sometimes simply being heard and understood can bring clarity and new perspectives.",
    question: "I'm listening and here to support you as you process your thoughts and feelings. Your journal shows someone who's thoughtful and reflective about their experiences. What aspect of your current situation would you like to explore further?",
};

fn templates_for(category: Category, mood: f64) -> &'static ReplyPair {
    match category {
        Category::MoodOrFeeling => match MoodTier::from_mood(mood) {
            MoodTier::Positive => &POSITIVE_MOOD,
            MoodTier::Neutral => &NEUTRAL_MOOD,
            MoodTier::Negative => &NEGATIVE_MOOD,
        },
        Category::ReflectiveInquiry => &REFLECTIVE,
        Category::AdviceSeeking => &ADVICE,
        Category::Gratitude => &GRATITUDE,
        Category::Neutral => &NEUTRAL,
    }
}

/// Picks the fallback reply for a classified message.
///
/// `mood` only matters for `MoodOrFeeling`.
pub fn select_reply(category: Category, is_question: bool, mood: f64) -> &'static str {
    templates_for(category, mood).pick(ResponseStyle::for_message(is_question))
}
