//! slotdelta - per-slot touch delta analyzer
//!
//! Replays `libinput record` traces and shows, frame by frame, how every
//! touch slot moved.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod evdev;
pub mod recording;

pub use analysis::{AnalysisOptions, Analyzer};
pub use config::Config;
pub use recording::Recording;
