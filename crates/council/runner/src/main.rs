#![deny(unsafe_code)]
//! Water Council episode runner
//!
//! Drives one seeded negotiation episode with templated rationale text,
//! stores the result, and writes it as a pretty-printed JSON artifact.

use anyhow::Context;
use clap::Parser;
use council_episodes::EpisodeStore;
use council_messages::TemplateMessenger;
use council_runner::run_episode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "water-council")]
#[command(about = "Run a seeded Water Council negotiation episode", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for scenario sampling and offer jitter
    #[arg(short, long, default_value_t = 42)]
    seed: u32,

    /// Turn budget before falling back to the outside option
    #[arg(short, long, default_value_t = council_engine::DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Output path for the episode JSON
    #[arg(short, long, default_value = "water-council.latest.json")]
    output: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let episode = run_episode(cli.seed, cli.max_turns, &TemplateMessenger)
        .await
        .context("episode run failed")?;

    let mut store = EpisodeStore::new();
    store.create(episode.clone());

    let json = serde_json::to_string_pretty(&episode).context("episode serialization failed")?;
    std::fs::write(&cli.output, json)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        episode = %episode.id,
        success = episode.success,
        turns = episode.turns.len(),
        output = %cli.output.display(),
        "episode saved"
    );
    println!(
        "Water Council episode {} saved to {} (success: {})",
        episode.id,
        cli.output.display(),
        episode.success
    );
    Ok(())
}
