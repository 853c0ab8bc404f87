// Mood journal composition root.
// Wires config, logging and the Gemini client into a MoodEngine, then analyzes
// one journal entry read from stdin.

use anyhow::Context;
use moodjournal_core::logging::{self, LogFormat};
use moodjournal_core::{EngineConfig, GeminiClient, MoodEngine};
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_USERNAME: &str = "friend";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("moodjournal", LogFormat::from_env()).context("failed to install tracing subscriber")?;

    let config = EngineConfig::from_env().context("invalid engine configuration")?;
    info!(model = %config.model_id, "Configuration loaded");

    let client = Arc::new(GeminiClient::new(&config)?);
    let engine = MoodEngine::new(client);

    let username = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let mut journal = String::new();
    std::io::stdin()
        .read_to_string(&mut journal)
        .context("failed to read journal entry from stdin")?;

    let analysis = engine.summarize_with_score(&username, &journal).await;
    if analysis.summary.is_failed() || !analysis.mood_score.is_available() {
        warn!("Analysis finished with degraded results");
    }

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
