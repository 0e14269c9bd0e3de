//! Delta and direction classification.
//!
//! Turns the state of one slot at a frame boundary into a [`Cell`]: a
//! lifecycle marker, a placeholder, or a motion sample with its direction
//! and highlight tier.

use std::f64::consts::PI;

use super::capability::Resolution;
use super::options::{AnalysisOptions, CoordinateMode};
use super::slot::{Point, Slot, SlotState};

/// Coarse direction of a delta, named by compass point.
///
/// Screen coordinates: y grows downwards, so North is "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthNorthWest,
    WestNorthWest,
    WestSouthWest,
    SouthSouthWest,
    SouthSouthEast,
    EastSouthEast,
    EastNorthEast,
    NorthNorthEast,
}

/// 45 degree sectors of `atan2(dx, dy) + pi`, starting at "up, slightly left".
const SECTORS: [Direction; 8] = [
    Direction::NorthNorthWest,
    Direction::WestNorthWest,
    Direction::WestSouthWest,
    Direction::SouthSouthWest,
    Direction::SouthSouthEast,
    Direction::EastSouthEast,
    Direction::EastNorthEast,
    Direction::NorthNorthEast,
];

impl Direction {
    /// Classify a non-zero delta.
    ///
    /// Purely horizontal and purely vertical deltas bypass the angle
    /// computation.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        if dx != 0.0 && dy != 0.0 {
            let degrees = (dx.atan2(dy) + PI).to_degrees();
            let sector = ((degrees / 45.0) as usize).min(SECTORS.len() - 1);
            SECTORS[sector]
        } else if dy == 0.0 {
            if dx < 0.0 {
                Direction::West
            } else {
                Direction::East
            }
        } else if dy < 0.0 {
            Direction::North
        } else {
            Direction::South
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Direction::North => "↑↑",
            Direction::South => "↓↓",
            Direction::East => "→→",
            Direction::West => "←←",
            Direction::NorthNorthWest => "↖↑",
            Direction::WestNorthWest => "↖←",
            Direction::WestSouthWest => "↙←",
            Direction::SouthSouthWest => "↙↓",
            Direction::SouthSouthEast => "↓↘",
            Direction::EastSouthEast => "→↘",
            Direction::EastNorthEast => "→↗",
            Direction::NorthNorthEast => "↑↗",
        }
    }
}

/// Two-component value in device units or millimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn hypot(&self) -> f64 {
        self.x.hypot(self.y)
    }

    fn scaled(point: Point, resolution: Option<Resolution>) -> Self {
        match resolution {
            Some(res) => Self {
                x: point.x as f64 / res.x,
                y: point.y as f64 / res.y,
            },
            None => Self {
                x: point.x as f64,
                y: point.y as f64,
            },
        }
    }
}

/// Color tier of a motion column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Plain,
    /// Pressure above the low threshold
    PressureLow,
    /// Pressure above the high threshold
    PressureHigh,
    /// Delta at or above the motion threshold
    Alert,
}

/// A relative motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub direction: Direction,
    pub delta: Vector,
    /// Per-axis distance from the contact origin
    pub distance: Vector,
    pub highlight: Highlight,
}

/// What one slot column shows in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Contact started
    Begin,
    /// Contact lifted
    End,
    /// No contact in this slot
    Idle,
    /// Contact held without motion
    Unchanged,
    /// Motion below the minimum threshold
    Filtered,
    Motion(Motion),
    /// Absolute coordinates mode
    Position { direction: Direction, position: Point },
}

impl Cell {
    /// Whether this cell alone justifies printing the frame.
    pub fn has_data(&self) -> bool {
        matches!(
            self,
            Cell::Begin | Cell::End | Cell::Motion(_) | Cell::Position { .. }
        )
    }
}

/// Classifies slots according to the analysis options.
#[derive(Debug, Clone)]
pub struct Classifier {
    coordinates: CoordinateMode,
    resolution: Option<Resolution>,
    threshold: Option<f64>,
    ignore_below: Option<f64>,
    pressure_low: Option<i32>,
    pressure_high: Option<i32>,
}

impl Classifier {
    pub fn new(options: &AnalysisOptions, resolution: Option<Resolution>) -> Self {
        Self {
            coordinates: options.coordinates,
            resolution,
            threshold: options.threshold,
            ignore_below: options.ignore_below,
            pressure_low: options.pressure_min.filter(|&p| p > 0),
            pressure_high: options.pressure_max.filter(|&p| p > 0),
        }
    }

    pub fn classify(&self, slot: &Slot) -> Cell {
        match slot.state {
            SlotState::Begin => Cell::Begin,
            SlotState::End => Cell::End,
            SlotState::None => Cell::Idle,
            SlotState::Active if !slot.dirty => Cell::Unchanged,
            SlotState::Active => self.classify_motion(slot),
        }
    }

    fn classify_motion(&self, slot: &Slot) -> Cell {
        let delta = Vector::scaled(slot.delta, self.resolution);
        let direction = Direction::from_delta(delta.x, delta.y);

        // Filtering and pressure tiers make no sense for absolute coordinates
        if self.coordinates == CoordinateMode::Absolute {
            return Cell::Position {
                direction,
                position: slot.position,
            };
        }

        let offset = Point::new(
            (slot.position.x - slot.origin.x).abs(),
            (slot.position.y - slot.origin.y).abs(),
        );
        let distance = Vector::scaled(offset, self.resolution);

        let mut highlight = self.pressure_tier(slot.pressure);
        let magnitude = delta.hypot();
        if self.ignore_below.is_some_and(|min| magnitude < min) {
            return Cell::Filtered;
        }
        if self.threshold.is_some_and(|max| magnitude >= max) {
            highlight = Highlight::Alert;
        }

        Cell::Motion(Motion {
            direction,
            delta,
            distance,
            highlight,
        })
    }

    fn pressure_tier(&self, pressure: i32) -> Highlight {
        if self.pressure_high.is_some_and(|high| pressure > high) {
            Highlight::PressureHigh
        } else if self.pressure_low.is_some_and(|low| pressure > low) {
            Highlight::PressureLow
        } else {
            Highlight::Plain
        }
    }
}
