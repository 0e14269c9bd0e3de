//! Analysis errors.

/// Errors detected while resolving device capabilities, before any event
/// is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("device doesn't have a resolution, cannot use mm (x: {x}, y: {y})")]
    MissingResolution { x: i32, y: i32 },
}

/// Errors that abort a replay.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("slot {slot} out of range (device has {count} slot(s))")]
    SlotOutOfRange { slot: i32, count: usize },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
