//! CLI command implementations

pub mod analyze;
pub mod config;
pub mod json_output;
pub mod mix;
