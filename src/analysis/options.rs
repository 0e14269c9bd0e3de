//! Analysis options.

/// Unit used for deltas and distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Units {
    /// Raw device units
    #[default]
    Device,
    /// Millimeters, using the axis resolution
    Millimeters,
}

/// Which axes carry contact positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactSource {
    /// ABS_MT_POSITION_X/Y, one slot per contact
    #[default]
    MultiTouch,
    /// ABS_X/ABS_Y with tool bits driving the contact lifecycle
    SingleTouch,
}

/// What a motion column shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateMode {
    /// Per-frame deltas
    #[default]
    Relative,
    /// Absolute positions
    Absolute,
}

/// Everything that changes how a recording is analyzed and rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    pub units: Units,
    pub source: ContactSource,
    pub coordinates: CoordinateMode,
    /// Append the distance from the contact origin to each motion column
    pub show_distance: bool,
    /// Highlight deltas at or above this distance
    pub threshold: Option<f64>,
    /// Hide deltas below this distance
    pub ignore_below: Option<f64>,
    /// Low pressure tier
    pub pressure_min: Option<i32>,
    /// High pressure tier, wins over the low tier
    pub pressure_max: Option<i32>,
    /// Emit ANSI colors
    pub color: bool,
}
