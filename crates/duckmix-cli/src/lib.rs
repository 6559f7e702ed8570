//! duckmix CLI library.
//!
//! This crate provides the core functionality for the `duckmix` binary:
//! argument definitions, config loading with flag overrides, log set-up, and
//! the command implementations.

pub mod cli_args;
pub mod commands;
pub mod input;
pub mod logging;
pub mod overrides;
