//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use densedeck_engine::weights::GameMode;

#[derive(Debug, Parser)]
#[command(name = "densedeck", version, about = "Dense Deck poker engine CLI")]
pub struct DenseDeckCli {
    /// Optional TOML config file overriding table defaults.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deal a single weighted hand for inspection.
    Deal {
        /// RNG seed; defaults to a time-derived seed.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value = "super-dense")]
        mode: ModeArg,
    },
    /// Auto-play hands with policies and write JSONL hand histories.
    Sim {
        #[arg(long, default_value_t = 10)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL output path; omit to skip writing records.
        #[arg(long)]
        output: Option<String>,
        #[arg(long, default_value = "dense")]
        policy: String,
        #[arg(long, value_enum, default_value = "super-dense")]
        mode: ModeArg,
    },
    /// Replay JSONL hand histories and verify they reproduce exactly.
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Evaluate 5-7 cards given in wire form (e.g. As Kd Qh Jc Ts).
    Eval {
        #[arg(required = true, num_args = 5..=7)]
        cards: Vec<String>,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    Dense,
    SuperDense,
}

impl From<ModeArg> for GameMode {
    fn from(m: ModeArg) -> GameMode {
        match m {
            ModeArg::Dense => GameMode::Dense,
            ModeArg::SuperDense => GameMode::SuperDense,
        }
    }
}
