//! Rift Rewards CLI
//!
//! Command-line reward calculator for rift runs.

mod config;
mod render;
mod roster;

use clap::{Parser, Subcommand};
use config::{OutputFormat, RiftConfig};
use rift_core::{Currency, RewardPool};
use rift_economics::{Allocator, Session};
use roster::Roster;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rift")]
#[command(version)]
#[command(about = "Rift Rewards - split rift run rewards by damage dealt", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "rift.toml", env = "RIFT_CONFIG")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate the rewards of a roster file
    Allocate {
        /// Roster file (TOML)
        #[arg(short, long)]
        roster: PathBuf,

        /// Output format, defaults to the configured one
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the minimum rewards for a pool
    Thresholds {
        #[arg(long, default_value_t = 0.0)]
        token: f64,

        #[arg(long, default_value_t = 0.0)]
        dust: f64,

        #[arg(long, default_value_t = 0.0)]
        contract: f64,

        #[arg(long, default_value_t = 0.0)]
        tome: f64,
    },

    /// Write an example roster
    Template {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool, level: &str) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RiftConfig::load_or_default(&cli.config)?;
    init_logging(cli.verbose, &config.logging.level);

    tracing::debug!("Config: {:?}", cli.config);

    match cli.command {
        Commands::Allocate { roster, format } => {
            let format = format.unwrap_or(config.output.format);

            tracing::info!("Loading roster {:?}", roster);
            let roster = Roster::load(&roster)?;

            let session = Session::new(Allocator::new(config.allocation));
            let session = roster.into_session(&session)?;

            for currency in session.over_allocated() {
                tracing::warn!(
                    "{} rewarded ({}) exceeds the pool ({})",
                    currency,
                    session.result().total_rewarded[currency],
                    session.pool()[currency]
                );
            }

            println!("{}", render::render(session.result(), session.pool(), format)?);
        }

        Commands::Thresholds {
            token,
            dust,
            contract,
            tome,
        } => {
            let pool = RewardPool::new(token, dust, contract, tome);
            for currency in Currency::ALL {
                RewardPool::check_amount(currency, pool[currency])?;
            }

            let thresholds = Allocator::new(config.allocation).thresholds(&pool);
            for (currency, floor) in thresholds.iter() {
                println!("{:<10}{:>10}", currency.name(), floor);
            }
        }

        Commands::Template { output } => {
            let text = toml::to_string_pretty(&Roster::template())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("Roster template written to {:?}", path);
                }
                None => print!("{}", text),
            }
        }
    }

    Ok(())
}
