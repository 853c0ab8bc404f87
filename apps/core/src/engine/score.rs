use crate::engine::prompts;
use crate::error::AppError;
use crate::llm::GenerativeModel;
use crate::models::MoodScore;
use std::num::IntErrorKind;
use tracing::{debug, error, instrument};

/// Asks the model to rate `summary` and returns the clamped score.
///
/// Never fails: any service error or non-integer answer becomes
/// [`MoodScore::UNAVAILABLE`] after the cause is logged. No retries.
#[instrument(skip_all, fields(summary_len = summary.len()))]
pub async fn extract_score<M>(model: &M, summary: &str) -> MoodScore
where
    M: GenerativeModel + ?Sized,
{
    let result = model
        .generate(prompts::score_prompt(summary))
        .await
        .and_then(|raw| parse_score(&raw));

    match result {
        Ok(score) => {
            debug!(%score, "Mood score extracted");
            score
        }
        Err(e) => {
            error!(kind = %e.kind(), "Error extracting score: {}", e);
            MoodScore::UNAVAILABLE
        }
    }
}

/// Parses a bare integer answer and clamps it into `0..=10`.
///
/// Surrounding whitespace and a leading sign are accepted. Integers too large
/// for `i64` still clamp to the nearest bound instead of failing.
pub fn parse_score(raw: &str) -> Result<MoodScore, AppError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(MoodScore::clamped(value)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(MoodScore::clamped(i64::MAX)),
            IntErrorKind::NegOverflow => Ok(MoodScore::clamped(i64::MIN)),
            _ => Err(e.into()),
        },
    }
}
