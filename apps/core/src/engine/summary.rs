use crate::engine::{prompts, score};
use crate::llm::GenerativeModel;
use crate::models::{MoodAnalysis, MoodScore, SummaryOutcome};
use tracing::{error, info, instrument};

/// Generates the empathetic summary of a journal entry.
///
/// A failed model call is reported as [`SummaryOutcome::Failed`], never as an error.
#[instrument(skip(model, journal), fields(journal_len = journal.len()))]
pub async fn summarize<M>(model: &M, username: &str, journal: &str) -> SummaryOutcome
where
    M: GenerativeModel + ?Sized,
{
    generate_summary(model, username, journal, false).await
}

/// Summarizes the entry, then scores the summary.
///
/// The score call is skipped when the summary failed, so this makes at most
/// two model calls, one after the other.
#[instrument(skip(model, journal), fields(journal_len = journal.len()))]
pub async fn summarize_with_score<M>(model: &M, username: &str, journal: &str) -> MoodAnalysis
where
    M: GenerativeModel + ?Sized,
{
    let summary = generate_summary(model, username, journal, true).await;

    let mood_score = match summary.summary() {
        Some(text) => score::extract_score(model, text).await,
        None => MoodScore::UNAVAILABLE,
    };

    info!(%mood_score, summary_failed = summary.is_failed(), "Journal analysis complete");
    MoodAnalysis { mood_score, summary }
}

async fn generate_summary<M>(model: &M, username: &str, journal: &str, with_score: bool) -> SummaryOutcome
where
    M: GenerativeModel + ?Sized,
{
    let prompt = prompts::summary_prompt(username, journal, with_score);

    match model.generate(prompt).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                error!("Error analyzing mood: model returned an empty summary");
                SummaryOutcome::Failed {
                    cause: "model returned an empty summary".to_string(),
                }
            } else {
                SummaryOutcome::Generated(text.to_string())
            }
        }
        Err(e) => {
            error!(kind = %e.kind(), "Error analyzing mood: {}", e);
            SummaryOutcome::Failed { cause: e.to_string() }
        }
    }
}
