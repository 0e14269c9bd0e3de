//! Frame rendering.
//!
//! One line per frame: a timestamp/tool/button prefix followed by one
//! fixed-width column per used slot. Frames where every moving slot was
//! filtered collapse into a single status line that is overwritten in
//! place until real output resumes.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use super::classify::{Cell, Highlight, Motion};
use super::frame::FrameHeader;
use super::options::{AnalysisOptions, Units};
use super::slot::Point;

/// Column width with `--show-distance`
pub const WIDE_COLUMN: usize = 35;
/// Default column width
pub const NARROW_COLUMN: usize = 16;

const COLUMN_SEPARATOR: &str = " | ";
const BEGIN_MARKER: &str = "+++++++";
const END_MARKER: &str = "-------";

/// ANSI color codes used for highlighting
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[6;31m";
    pub const BLUE: &str = "\x1b[6;34m";
    pub const GREEN: &str = "\x1b[6;32m";
}

/// Maps highlight tiers to escape sequences, or to nothing when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn color(&self, highlight: Highlight) -> &'static str {
        if !self.enabled {
            return "";
        }
        match highlight {
            // Plain is an explicit reset, not an empty escape
            Highlight::Plain => ansi::RESET,
            Highlight::PressureLow => ansi::BLUE,
            Highlight::PressureHigh => ansi::GREEN,
            Highlight::Alert => ansi::RED,
        }
    }

    fn reset(&self) -> &'static str {
        if self.enabled {
            ansi::RESET
        } else {
            ""
        }
    }
}

/// Counter behind the overwritten "below threshold" line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStatus {
    skipped: usize,
}

impl FilterStatus {
    /// Count one more filtered frame.
    pub fn skip(&mut self) -> usize {
        self.skipped += 1;
        self.skipped
    }

    /// Leave the status line. Returns true if one was showing.
    pub fn resume(&mut self) -> bool {
        std::mem::take(&mut self.skipped) > 0
    }
}

/// Result of rendering one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// A frame line; `resume` terminates a pending status line first
    Line { resume: bool, text: String },
    /// All motion in the frame was filtered
    Skipped { count: usize },
    /// Nothing changed that is worth showing
    Nothing,
}

impl Emit {
    /// Write this output. Only the status line uses carriage-return tricks.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Emit::Line { resume, text } => {
                if *resume {
                    writeln!(out)?;
                }
                writeln!(out, "{}", text)
            }
            Emit::Skipped { count } => {
                write!(out, "\r{:23}... {} below threshold", "", count)?;
                out.flush()
            }
            Emit::Nothing => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameRenderer {
    width: usize,
    show_distance: bool,
    units: Units,
    palette: Palette,
    status: FilterStatus,
}

impl FrameRenderer {
    pub fn new(options: &AnalysisOptions) -> Self {
        Self {
            width: if options.show_distance {
                WIDE_COLUMN
            } else {
                NARROW_COLUMN
            },
            show_distance: options.show_distance,
            units: options.units,
            palette: Palette::new(options.color),
            status: FilterStatus::default(),
        }
    }

    /// Render one frame from its header and the classified slot cells.
    pub fn render(&mut self, header: &FrameHeader, cells: &[Cell]) -> Emit {
        if cells.iter().any(Cell::has_data) {
            let resume = self.status.resume();
            let columns: Vec<String> = cells.iter().map(|c| self.column(c)).collect();
            let text = format!(
                "{:2}.{:06} {:+5}ms {} {} {}",
                header.sec,
                header.usec,
                header.elapsed_ms,
                header.tool,
                header.buttons,
                columns.join(COLUMN_SEPARATOR)
            );
            Emit::Line { resume, text }
        } else if cells.iter().any(|c| matches!(c, Cell::Filtered)) {
            Emit::Skipped {
                count: self.status.skip(),
            }
        } else {
            Emit::Nothing
        }
    }

    /// Terminate a pending status line at end of input.
    pub fn finish(&mut self) -> Option<Emit> {
        self.status.resume().then(|| Emit::Line {
            resume: false,
            text: String::new(),
        })
    }

    fn column(&self, cell: &Cell) -> String {
        let width = self.width;
        match cell {
            Cell::Begin => format!("{:^width$}", BEGIN_MARKER),
            Cell::End => format!("{:^width$}", END_MARKER),
            Cell::Idle => format!("{:^width$}", "*".repeat(width - 2)),
            Cell::Unchanged | Cell::Filtered => " ".repeat(width),
            Cell::Motion(motion) => self.motion_column(motion),
            Cell::Position {
                direction,
                position,
            } => self.position_column(direction.glyph(), *position),
        }
    }

    fn motion_column(&self, motion: &Motion) -> String {
        let coords = match self.units {
            Units::Device => format!(
                "{:+4}/{:+4}",
                motion.delta.x as i64, motion.delta.y as i64
            ),
            Units::Millimeters => format!("{:+.2}/{:+.2}", motion.delta.x, motion.delta.y),
        };
        let distance = if self.show_distance {
            format!(
                "dist: ({:3.1}/{:3.1}, {:3.1})",
                motion.distance.x,
                motion.distance.y,
                motion.distance.hypot()
            )
        } else {
            String::new()
        };

        let segments = [
            Segment::Text(motion.direction.glyph()),
            Segment::Escape(self.palette.color(motion.highlight)),
            Segment::Text(&coords),
            Segment::Text(&distance),
            Segment::Escape(self.palette.reset()),
        ];
        self.pad(join_segments(&segments))
    }

    fn position_column(&self, glyph: &str, position: Point) -> String {
        let coords = format!("{:4}/{:4}", position.x, position.y);
        let text = format!(
            "{} {}{}{}",
            glyph,
            self.palette.color(Highlight::Plain),
            coords,
            self.palette.reset()
        );
        let visible = glyph.width() + 1 + coords.width();
        self.pad((text, visible))
    }

    fn pad(&self, (mut text, visible): (String, usize)) -> String {
        let fill = self.width.saturating_sub(visible);
        text.extend(std::iter::repeat(' ').take(fill));
        text
    }
}

enum Segment<'a> {
    Text(&'a str),
    /// Zero-width escape sequence
    Escape(&'a str),
}

/// Join non-empty segments with single spaces, returning the string and
/// its visible width.
fn join_segments(segments: &[Segment<'_>]) -> (String, usize) {
    let mut text = String::new();
    let mut visible = 0;
    for segment in segments {
        let (s, width) = match segment {
            Segment::Text(s) => (*s, s.width()),
            Segment::Escape(s) => (*s, 0),
        };
        if s.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
            visible += 1;
        }
        text.push_str(s);
        visible += width;
    }
    (text, visible)
}
