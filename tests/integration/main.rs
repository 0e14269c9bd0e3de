//! Integration tests for the slotdelta binary

mod analyze_test;
mod cli_test;
mod config_test;
mod helpers;
