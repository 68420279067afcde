//! # Dense Deck CLI Library
//!
//! Command-line interface for the Dense Deck poker engine. Exposes
//! subcommands for dealing, simulating, replaying, and evaluating hands.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single weighted hand for inspection
//! - `sim`: Auto-play hands with policies and write JSONL hand histories
//! - `replay`: Replay recorded hands and verify deterministic reproduction
//! - `eval`: Evaluate 5-7 cards given in wire form

use std::io::Write;

use clap::Parser;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod formatters;

use cli::{Commands, DenseDeckCli};
use commands::{
    handle_deal_command, handle_eval_command, handle_replay_command, handle_sim_command,
};
use config::CliConfig;
pub use error::CliError;

/// Parse arguments and dispatch to the matching subcommand handler.
///
/// Returns the process exit code: `0` for success, `2` for any error.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    init_tracing();

    let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    let cli = match DenseDeckCli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders its own help/usage text
            let _ = write!(err, "{}", e);
            return if e.use_stderr() { 2 } else { 0 };
        }
    };

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Deal { seed, mode } => handle_deal_command(seed, mode.into(), &config, out),
        Commands::Sim {
            hands,
            seed,
            output,
            policy,
            mode,
        } => handle_sim_command(hands, seed, output, &policy, mode.into(), &config, out),
        Commands::Replay { input } => handle_replay_command(&input, out, err),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            2
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Convenience default seed for entry points when the user passes none.
/// Engine internals never fall back to the clock; only the CLI does.
pub(crate) fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
