//! Device capability resolution.
//!
//! Decides how many slots to track and whether positions come from the
//! multitouch or the legacy single-touch axes.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::error::ConfigError;
use super::options::{ContactSource, Units};
use crate::evdev::{Abs, AbsInfo};

/// Warning surfaced whenever single-touch emulation is in use.
pub const SINGLE_TOUCH_WARNING: &str =
    "slot coordinates on FINGER/DOUBLETAP change may be incorrect";

/// Contact-tracking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    MultiTouch,
    SingleTouch,
}

/// Axis resolution in units per millimeter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

/// Result of resolving a device's capabilities against the requested options.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    /// Number of slots to allocate, at least 1
    pub slot_count: usize,
    pub mode: TrackingMode,
    /// Set only when millimeter units were requested
    pub resolution: Option<Resolution>,
    /// Single-touch was forced because the device has no ABS_MT_SLOT
    pub forced_single_touch: bool,
}

impl Capabilities {
    /// Resolve capabilities from absinfo metadata.
    ///
    /// Missing ABS_MT_SLOT forces single-touch mode with one slot. Millimeter
    /// units need a non-zero resolution on both ABS_X and ABS_Y.
    pub fn resolve(
        absinfo: &BTreeMap<u16, AbsInfo>,
        units: Units,
        source: ContactSource,
    ) -> Result<Self, ConfigError> {
        let mt_slots = absinfo
            .get(&Abs::MtSlot.code())
            .map(|info| (info.maximum.max(0) as usize) + 1);

        let forced_single_touch = mt_slots.is_none();
        let (mode, slot_count) = match (source, mt_slots) {
            (ContactSource::MultiTouch, Some(count)) => (TrackingMode::MultiTouch, count),
            _ => (TrackingMode::SingleTouch, 1),
        };

        let resolution = match units {
            Units::Device => None,
            Units::Millimeters => {
                let xres = absinfo.get(&Abs::X.code()).map_or(0, |i| i.resolution);
                let yres = absinfo.get(&Abs::Y.code()).map_or(0, |i| i.resolution);
                if xres == 0 || yres == 0 {
                    return Err(ConfigError::MissingResolution { x: xres, y: yres });
                }
                Some(Resolution {
                    x: xres as f64,
                    y: yres as f64,
                })
            }
        };

        if mode == TrackingMode::SingleTouch {
            warn!("{}", SINGLE_TOUCH_WARNING);
        }
        debug!(slot_count, ?mode, ?resolution, "resolved device capabilities");

        Ok(Self {
            slot_count,
            mode,
            resolution,
            forced_single_touch,
        })
    }
}
