//! Keyword-based classification of chat messages.
//!
//! Used only on the offline path, when the generative model cannot answer.
//! Matching is plain substring containment on the lower-cased message, so
//! "feeling" matches `feel` and "whatever" matches `what`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a chat message is mostly about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Talks about mood or emotions (feel, sad, anxious, ...)
    MoodOrFeeling,
    /// Reflective or "why/what/how" inquiry
    ReflectiveInquiry,
    /// Asks for help or advice
    AdviceSeeking,
    /// Expresses thanks or gratitude
    Gratitude,
    /// Nothing matched
    Neutral,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    /// Returns a human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::MoodOrFeeling => "mood_or_feeling",
            Category::ReflectiveInquiry => "reflective_inquiry",
            Category::AdviceSeeking => "advice_seeking",
            Category::Gratitude => "gratitude",
            Category::Neutral => "neutral",
        }
    }
}

/// Keyword group for one category.
struct CategoryKeywords {
    category: Category,
    keywords: &'static [&'static str],
}

/// Checked top to bottom; the first group with a hit wins.
/// `why`/`what`/`how` also appear in messages about feelings, which is why
/// mood keywords come first.
const CATEGORY_KEYWORDS: [CategoryKeywords; 4] = [
    CategoryKeywords {
        category: Category::MoodOrFeeling,
        keywords: &["mood", "feel", "emotion", "happy", "sad", "angry", "anxious"],
    },
    CategoryKeywords {
        category: Category::ReflectiveInquiry,
        keywords: &["why", "what", "how", "think", "believe", "understand"],
    },
    CategoryKeywords {
        category: Category::AdviceSeeking,
        keywords: &["help", "advice", "suggestion", "should", "could", "would"],
    },
    CategoryKeywords {
        category: Category::Gratitude,
        keywords: &["thank", "grateful", "appreciate", "blessed", "fortunate"],
    },
];

const QUESTION_MARKERS: [&str; 7] = ["what", "why", "how", "when", "where", "who", "?"];

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    /// Whether the message reads as a question. Independent of `category`.
    pub is_question: bool,
    /// The keyword that decided the category (`None` for `Neutral`).
    pub matched_keyword: Option<String>,
}

/// Classifies a message into exactly one category. Never fails.
pub fn classify(message: &str) -> Category {
    classify_message(message).category
}

/// True when the message contains a question word or a question mark.
pub fn is_question(message: &str) -> bool {
    let lowered = message.to_lowercase();
    QUESTION_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Classifies a message and records why.
pub fn classify_message(message: &str) -> Classification {
    let lowered = message.to_lowercase();

    let hit = CATEGORY_KEYWORDS.iter().find_map(|group| {
        group
            .keywords
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .map(|keyword| (group.category, *keyword))
    });

    let (category, matched_keyword) = match hit {
        Some((category, keyword)) => (category, Some(keyword.to_string())),
        None => (Category::Neutral, None),
    };

    Classification {
        category,
        is_question: is_question(message),
        matched_keyword,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_keywords_take_priority() {
        assert_eq!(classify("why do I feel so anxious?"), Category::MoodOrFeeling);
        assert_eq!(classify("What is this emotion?"), Category::MoodOrFeeling);
    }

    #[test]
    fn test_each_category() {
        assert_eq!(classify("I'm so HAPPY"), Category::MoodOrFeeling);
        assert_eq!(classify("I believe it went fine"), Category::ReflectiveInquiry);
        assert_eq!(classify("Any advice for tomorrow"), Category::AdviceSeeking);
        assert_eq!(classify("Thanks a lot"), Category::Gratitude);
        assert_eq!(classify("ok"), Category::Neutral);
    }

    #[test]
    fn test_empty_and_gibberish_are_neutral() {
        assert_eq!(classify(""), Category::Neutral);
        assert_eq!(classify("   "), Category::Neutral);
        assert_eq!(classify("zxqv plmk"), Category::Neutral);
    }

    #[test]
    fn test_substring_matching() {
        // "feeling" contains "feel"
        assert_eq!(classify("feeling off"), Category::MoodOrFeeling);
        // "thankful" contains "thank"
        assert_eq!(classify("so thankful today"), Category::Gratitude);
    }

    #[test]
    fn test_is_question() {
        assert!(!is_question("I feel happy today"));
        assert!(is_question("why do I feel this way?"));
        assert!(is_question("Where to start"));
        assert!(is_question("really?"));
        assert!(!is_question(""));
    }

    #[test]
    fn test_classify_message_records_keyword() {
        let result = classify_message("Could you give me a suggestion");
        assert_eq!(result.category, Category::AdviceSeeking);
        assert_eq!(result.matched_keyword.as_deref(), Some("suggestion"));
        assert!(!result.is_question);

        let neutral = classify_message("Went for a walk.");
        assert_eq!(neutral.category, Category::Neutral);
        assert!(neutral.matched_keyword.is_none());
    }
}
