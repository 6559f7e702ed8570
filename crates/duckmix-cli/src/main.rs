//! duckmix CLI - Duck a music bed under narration and master the result
//!
//! This binary mixes voice and music stems, analyzes music beds, and manages
//! mix configs.

use clap::Parser;
use std::process::ExitCode;

use duckmix_cli::cli_args::{Cli, Commands, ConfigCommands};
use duckmix_cli::commands::{self, mix::MixPaths};
use duckmix_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Mix {
            voice,
            music,
            out,
            config,
            overrides,
            json,
        } => commands::mix::run(
            MixPaths {
                voice: &voice,
                music: &music,
                out: &out,
                config: config.as_deref(),
            },
            &overrides,
            json,
        ),
        Commands::Analyze { input, json } => commands::analyze::run(&input, json),
        Commands::Config { command } => match command {
            ConfigCommands::Defaults => commands::config::defaults(),
            ConfigCommands::Validate { config, json } => commands::config::validate(&config, json),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
