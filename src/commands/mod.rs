//! Subcommand handlers

pub mod analyze;
pub mod completions;
pub mod config;
