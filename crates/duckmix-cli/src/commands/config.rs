//! Config command implementations
//!
//! `config defaults` prints the built-in config; `config validate` checks a
//! config file without touching any audio.

use anyhow::{Context, Result};
use colored::Colorize;
use duckmix_spec::{validate_config, MixConfig, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use crate::input::{load_config, LoadResult};

/// Prints the default config as pretty JSON.
pub fn defaults() -> Result<ExitCode> {
    let json = MixConfig::default()
        .to_json_pretty()
        .context("Failed to serialize default config")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Run config validation
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn validate(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        validate_json(config_path)
    } else {
        validate_human(config_path)
    }
}

fn validate_human(config_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let LoadResult {
        config,
        source_hash,
    } = load_config(Some(Path::new(config_path)))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    if let Some(hash) = &source_hash {
        println!("{} {}", "Hash:".dimmed(), &hash[..16]);
    }

    let result = validate_config(&config);
    print_result(&result);

    if result.is_ok() {
        println!("{}", "Config is valid".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} error(s)",
            "Config is invalid:".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn print_result(result: &ValidationResult) {
    for error in &result.errors {
        let location = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code,
            location.dimmed(),
            error.message
        );
    }
    for warning in &result.warnings {
        let location = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            location.dimmed(),
            warning.message
        );
    }
}

fn validate_to_json(config_path: &str) -> ValidateOutput {
    let LoadResult {
        config,
        source_hash,
    } = match load_config(Some(Path::new(config_path))) {
        Ok(loaded) => loaded,
        Err(e) => {
            return ValidateOutput {
                success: false,
                errors: vec![input_error_to_json(&e)],
                warnings: Vec::new(),
                config_hash: None,
            }
        }
    };

    let result = validate_config(&config);
    ValidateOutput {
        success: result.is_ok(),
        errors: result.errors.iter().map(validation_error_to_json).collect(),
        warnings: result
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect(),
        config_hash: source_hash,
    }
}

fn validate_json(config_path: &str) -> Result<ExitCode> {
    let output = validate_to_json(config_path);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
