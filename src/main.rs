//! Bastion - battle resolver CLI
//!
//! Resolves a battle request from JSON and prints the result (or one side's
//! report) as JSON. Useful for replaying disputed battles: with `--seed` the
//! same request always produces the same outcome.

use std::fs;
use std::path::PathBuf;

use bastion::battle::{BattleRequest, BattleResolver};
use bastion::combat::RngLuck;
use bastion::core::error::{BattleError, Result};
use bastion::core::WorldConfig;
use bastion::units::UnitCatalog;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bastion")]
#[command(about = "Deterministic battle resolution for persistent strategy worlds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single battle request
    Resolve {
        /// Battle request JSON file
        #[arg(long)]
        request: PathBuf,

        /// World config TOML (defaults apply when omitted)
        #[arg(long)]
        world: Option<PathBuf>,

        /// Unit catalog TOML (bundled standard catalog when omitted)
        #[arg(long)]
        units: Option<PathBuf>,

        /// Luck seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,

        /// Which view to print
        #[arg(long, value_enum, default_value_t = Perspective::Full)]
        perspective: Perspective,
    },

    /// Print the effective world config as TOML
    Config {
        #[arg(long)]
        world: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Perspective {
    Full,
    Attacker,
    Defender,
}

fn load_world(path: Option<&PathBuf>) -> Result<WorldConfig> {
    let config = match path {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    config.validate().map_err(BattleError::Config)?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bastion=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve {
            request,
            world,
            units,
            seed,
            perspective,
        } => {
            let config = load_world(world.as_ref())?;
            let catalog = match units {
                Some(path) => UnitCatalog::load(&path)?,
                None => UnitCatalog::standard(),
            };
            let request: BattleRequest = serde_json::from_str(&fs::read_to_string(&request)?)?;

            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "Resolving battle");
            let mut luck = RngLuck::seeded(seed);

            let resolver = BattleResolver::new(&catalog, &config);
            let resolution = resolver.resolve(&request, &mut luck)?;

            let json = match perspective {
                Perspective::Full => serde_json::to_string_pretty(&resolution.result)?,
                Perspective::Attacker => serde_json::to_string_pretty(&resolution.attacker_report)?,
                Perspective::Defender => serde_json::to_string_pretty(&resolution.defender_report)?,
            };
            println!("{}", json);
        }
        Command::Config { world } => {
            let config = load_world(world.as_ref())?;
            let toml = toml::to_string_pretty(&config)
                .map_err(|e| BattleError::Config(format!("Failed to render config: {}", e)))?;
            println!("{}", toml);
        }
    }

    Ok(())
}
