//! CLI argument definitions for the duckmix command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand};

use crate::overrides::MixOverrides;

/// duckmix - Duck a music bed under narration and master the result
#[derive(Parser)]
#[command(name = "duckmix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mix a voice stem over a music stem and write 16-bit PCM WAV
    Mix {
        /// Path to the narration WAV
        #[arg(long)]
        voice: String,

        /// Path to the music WAV
        #[arg(long)]
        music: String,

        /// Output WAV path (parent directories are created)
        #[arg(short, long)]
        out: String,

        /// JSON mix config; flags below override its values
        #[arg(short, long)]
        config: Option<String>,

        #[command(flatten)]
        overrides: MixOverrides,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report the spectral band balance of a music bed
    Analyze {
        /// Path to the WAV to analyze
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Inspect and validate mix configs
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the default mix config as pretty JSON
    Defaults,

    /// Validate a mix config without mixing anything
    Validate {
        /// Path to the JSON config
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
