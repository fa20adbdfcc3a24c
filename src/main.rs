use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};

use genesis_lib::{persistence, GenesisConfig, GenesisProtocol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Staged four-act console demonstration.
    Demo,
    /// Evolution cycles without console staging; logs only.
    Headless,
}

/// Digital life protocol engine.
#[derive(Parser, Debug)]
#[command(name = "genesis", version, about)]
struct Cli {
    /// Run mode.
    #[arg(long, value_enum, default_value_t = Mode::Demo)]
    mode: Mode,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable pacing sleeps between demo steps.
    #[arg(long)]
    no_pacing: bool,

    /// Override the organism count.
    #[arg(long)]
    organisms: Option<usize>,

    /// Override the generation count.
    #[arg(long)]
    generations: Option<u64>,

    /// Override the RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a state snapshot here after a headless run.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    genesis_lib::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GenesisConfig::from_toml(&content)?
        }
        None => GenesisConfig::default(),
    };

    if cli.no_pacing {
        config.demo.pacing = false;
    }
    if let Some(organisms) = cli.organisms {
        config.demo.organisms = organisms;
    }
    if let Some(generations) = cli.generations {
        config.demo.generations = generations;
    }
    if let Some(seed) = cli.seed {
        config.protocol.seed = Some(seed);
    }
    // Overrides can invalidate a config that parsed cleanly.
    config.validate()?;

    match cli.mode {
        Mode::Demo => {
            let report = genesis_lib::demo::run(config).await?;
            tracing::info!(
                duration_secs = report.duration_secs,
                organisms = report.organisms_created,
                messages = report.messages_exchanged,
                "demo complete"
            );
        }
        Mode::Headless => run_headless(config, cli.snapshot.as_deref()).await?,
    }

    Ok(())
}

async fn run_headless(config: GenesisConfig, snapshot_path: Option<&Path>) -> anyhow::Result<()> {
    let organism_count = config.demo.organisms;
    let generations = config.demo.generations;
    let mut protocol = GenesisProtocol::new(config)?;

    for _ in 0..organism_count {
        protocol.create_organism(None)?;
    }

    for generation in 0..generations {
        let ids: Vec<String> = protocol.organisms.keys().cloned().collect();
        let mut evolved = 0usize;
        for id in &ids {
            if protocol.evolve_organism(id).is_ok() {
                evolved += 1;
            }
        }
        let eliminated = protocol.apply_selection();
        protocol.tick();

        tracing::info!(
            generation = generation + 1,
            evolved,
            eliminated = eliminated.len(),
            population = protocol.organisms.len(),
            "generation complete"
        );
    }

    let stats = protocol.network_stats();
    tracing::info!(
        organisms = stats.total_organisms,
        average_fitness = stats.average_fitness,
        network_health = stats.network_health,
        "headless run complete"
    );

    if let Some(path) = snapshot_path {
        persistence::save(&protocol, path)?;
    }
    protocol.metrics.report();
    Ok(())
}
