//! Ant Cluster - Entry Point
//!
//! Runs every replicate of one configuration and prints the measurements.

use std::path::PathBuf;

use ant_cluster::core::config::SimulationConfig;
use ant_cluster::core::error::Result;
use ant_cluster::simulation::run_replicates;
use clap::Parser;

/// Ant Cluster - ants sorting Food, Waste and Eggs into clusters
#[derive(Parser, Debug)]
#[command(name = "ant-cluster")]
#[command(about = "Run replicates of one ant clustering configuration")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base random seed (replicate i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent replicates
    #[arg(long)]
    runs: Option<usize>,

    /// Steps per replicate
    #[arg(long)]
    iterations: Option<u64>,

    /// Similarity threshold for interactions
    #[arg(long)]
    threshold: Option<u32>,

    /// Interaction cooldown in steps
    #[arg(long)]
    cooldown: Option<u32>,

    /// Number of ants
    #[arg(long)]
    ants: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid length in cells
    #[arg(long)]
    length: Option<i32>,

    /// Categories each ant remembers
    #[arg(long)]
    memory_size: Option<usize>,

    /// Density where the pick/drop ramp starts
    #[arg(long)]
    pick_low: Option<f64>,

    /// Density where the pick/drop ramp reaches 1
    #[arg(long)]
    pick_high: Option<f64>,

    /// Print the full output as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<(SimulationConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(threshold) = self.threshold {
            config.similarity_threshold = threshold;
        }
        if let Some(cooldown) = self.cooldown {
            config.cooldown_duration = cooldown;
        }
        if let Some(ants) = self.ants {
            config.ant_count = ants;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        if let Some(memory_size) = self.memory_size {
            config.memory_size = memory_size;
        }
        if let Some(low) = self.pick_low {
            config.pick_drop_range[0] = low;
        }
        if let Some(high) = self.pick_high {
            config.pick_drop_range[1] = high;
        }

        config.validate()?;
        Ok((config, self.json))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ant_cluster=info")),
        )
        .init();

    let (config, json) = Args::parse().into_config()?;

    tracing::info!(
        "Grid {}x{}, {} ants, memory {}, {} steps, threshold {}, cooldown {}, ramp [{}, {}]",
        config.width,
        config.length,
        config.ant_count,
        config.memory_size,
        config.iterations,
        config.similarity_threshold,
        config.cooldown_duration,
        config.pick_drop_range[0],
        config.pick_drop_range[1],
    );

    let output = run_replicates(&config)?;

    if json {
        println!("{}", output.to_json()?);
    } else {
        println!("{}", output.summary());
        for run in &output.runs {
            for sample in &run.samples {
                println!(
                    "run {:>2}  iter {:>7}  cluster {:>8.4}  interactions {}",
                    run.run + 1,
                    sample.iteration,
                    sample.average_cluster_size,
                    sample.interaction_count
                );
            }
        }
    }

    Ok(())
}
