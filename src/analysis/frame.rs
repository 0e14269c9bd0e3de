//! Frame aggregation.
//!
//! A frame is everything between two SYN_REPORT events. The aggregator
//! tracks the tool and button bits, timestamps each boundary and runs the
//! post-render slot transition.

use std::fmt;

use super::slot::Slot;
use super::tracker::SlotTracker;
use crate::evdev::{Code, InputEvent, Key};

/// Tool classification shown in the frame prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTag {
    QuintTap,
    QuadTap,
    TripleTap,
    DoubleTap,
    Touch,
    None,
}

impl ToolTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolTag::QuintTap => "QIN",
            ToolTag::QuadTap => "QAD",
            ToolTag::TripleTap => "TRI",
            ToolTag::DoubleTap => "DBL",
            ToolTag::Touch => "TOU",
            ToolTag::None => "   ",
        }
    }
}

impl fmt::Display for ToolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pressed physical buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !(self.left || self.middle || self.right) {
            return f.write_str(".");
        }
        for (pressed, letter) in [(self.left, "L"), (self.middle, "M"), (self.right, "R")] {
            if pressed {
                f.write_str(letter)?;
            }
        }
        Ok(())
    }
}

/// Last seen value of the BTN_TOUCH / BTN_TOOL_*TAP bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ToolBits {
    touch: bool,
    double: bool,
    triple: bool,
    quad: bool,
    quint: bool,
}

impl ToolBits {
    fn tag(&self) -> ToolTag {
        if self.quint {
            ToolTag::QuintTap
        } else if self.quad {
            ToolTag::QuadTap
        } else if self.triple {
            ToolTag::TripleTap
        } else if self.double {
            ToolTag::DoubleTap
        } else if self.touch {
            ToolTag::Touch
        } else {
            ToolTag::None
        }
    }
}

/// Per-frame metadata captured at the SYN_REPORT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub sec: u64,
    pub usec: u32,
    /// Milliseconds since the previous frame, 0 for the first
    pub elapsed_ms: i64,
    pub tool: ToolTag,
    pub buttons: Buttons,
}

/// All used slots at one frame boundary.
#[derive(Debug)]
pub struct Frame<'a> {
    pub header: FrameHeader,
    pub slots: Vec<&'a Slot>,
}

#[derive(Debug, Clone, Default)]
pub struct FrameAggregator {
    last_time_us: Option<i64>,
    tools: ToolBits,
    buttons: Buttons,
    frames: u64,
}

impl FrameAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frame boundaries seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Observe one event. Returns the frame header on SYN_REPORT.
    pub fn observe(&mut self, event: &InputEvent) -> Option<FrameHeader> {
        match event.code {
            Code::Key(key) => {
                self.record_key(key, event.value != 0);
                None
            }
            Code::SynReport => Some(self.boundary(event)),
            Code::Abs(_) | Code::Other { .. } => None,
        }
    }

    fn record_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Touch => self.tools.touch = down,
            Key::ToolDoubleTap => self.tools.double = down,
            Key::ToolTripleTap => self.tools.triple = down,
            Key::ToolQuadTap => self.tools.quad = down,
            Key::ToolQuintTap => self.tools.quint = down,
            Key::Left => self.buttons.left = down,
            Key::Middle => self.buttons.middle = down,
            Key::Right => self.buttons.right = down,
            Key::ToolFinger | Key::ToolPen => {}
        }
    }

    fn boundary(&mut self, event: &InputEvent) -> FrameHeader {
        let now = event.time_us();
        let elapsed_ms = self.last_time_us.map_or(0, |last| (now - last) / 1000);
        self.last_time_us = Some(now);
        self.frames += 1;

        FrameHeader {
            sec: event.sec,
            usec: event.usec,
            elapsed_ms,
            tool: self.tools.tag(),
            buttons: self.buttons,
        }
    }

    /// Snapshot the used slots for rendering.
    pub fn snapshot<'a>(&self, header: FrameHeader, tracker: &'a SlotTracker) -> Frame<'a> {
        Frame {
            header,
            slots: tracker.used_slots().collect(),
        }
    }

    /// Reset per-frame slot state. Must run exactly once per frame, after
    /// the frame has been rendered.
    pub fn finish_frame(&self, tracker: &mut SlotTracker) {
        for slot in tracker.used_slots_mut() {
            slot.finish_frame();
        }
    }
}
