//! Career Lifecycle CLI
//!
//! 합성 리그로 시즌을 돌리고 스냅샷을 저장/조회한다.

use anyhow::Result;
use career_cli::{build_league, inspect, load_config, load_snapshot, save_snapshot, simulate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "career_cli")]
#[command(about = "Run franchise staff careers season by season", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a seeded league and run season ticks
    Simulate {
        /// Master seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of seasons to run
        #[arg(long, default_value = "10")]
        seasons: u16,

        /// Number of teams
        #[arg(long, default_value = "8")]
        teams: u32,

        /// First season year
        #[arg(long, default_value = "2030")]
        start: u16,

        /// Lifecycle config JSON (realistic preset when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write a snapshot after the last season
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the market summary or one profile from a snapshot
    Inspect {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Profile id to show instead of the market summary
        #[arg(long)]
        profile: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, seasons, teams, start, config, out } => {
            let config = load_config(config.as_deref())?;
            let mut orch = build_league(config, teams, seed, start)?;
            println!("League: {} teams, {} profiles, seed {}", teams, orch.registry().len(), seed);

            let summaries = simulate(&mut orch, teams, seasons, seed)?;
            println!("{:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}", "year", "hired", "fired", "retire", "promo", "open", "skip");
            for s in &summaries {
                println!(
                    "{:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
                    s.year, s.hires, s.firings, s.retirements, s.promotions, s.open_positions, s.skipped
                );
            }

            if let Some(path) = out {
                save_snapshot(&orch, &path)?;
                println!("Snapshot saved to: {}", path.display());
            }
        }

        Commands::Inspect { snapshot, profile } => {
            let orch = load_snapshot(&snapshot)?;
            println!("{}", inspect(&orch, profile)?);
        }
    }

    Ok(())
}
