//! Slot state machine.
//!
//! Consumes raw events in recorded order and attributes them to slots.
//! The tracker is the only writer of slot state; `current` is the slot the
//! next axis event lands in.
//!
//! In single-touch mode the contact lifecycle is derived from the tool
//! bits. This relies on the EV_KEY events preceding the X/Y events of the
//! same frame, otherwise the first or last position of a contact lands in
//! the wrong slot. Events are never reordered to fix this up.

use tracing::trace;

use super::capability::{Capabilities, TrackingMode};
use super::error::AnalysisError;
use super::slot::{Slot, SlotState};
use crate::evdev::{Abs, Code, InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Owns one [`Slot`] per contact-tracking channel.
#[derive(Debug, Clone)]
pub struct SlotTracker {
    slots: Vec<Slot>,
    current: usize,
    mode: TrackingMode,
}

impl SlotTracker {
    /// Allocate `caps.slot_count` slots. Slot 0 is always rendered.
    pub fn new(caps: &Capabilities) -> Self {
        let mut slots: Vec<Slot> = (0..caps.slot_count.max(1)).map(Slot::new).collect();
        slots[0].used = true;

        Self {
            slots,
            current: 0,
            mode: caps.mode,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots that get a column, in ascending index order.
    pub fn used_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.used)
    }

    pub(crate) fn used_slots_mut(&mut self) -> impl Iterator<Item = &mut Slot> {
        self.slots.iter_mut().filter(|s| s.used)
    }

    /// Index of the slot receiving axis events.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Apply one event to the slot state.
    pub fn apply_event(&mut self, event: &InputEvent) -> Result<(), AnalysisError> {
        match (self.mode, event.code) {
            (TrackingMode::MultiTouch, Code::Abs(abs)) => self.apply_mt(abs, event.value)?,
            (TrackingMode::SingleTouch, Code::Abs(abs)) => self.apply_st(abs, event.value),
            (TrackingMode::SingleTouch, Code::Key(key)) => self.apply_tool(key, event.value),
            (TrackingMode::MultiTouch, Code::Key(_))
            | (_, Code::SynReport)
            | (_, Code::Other { .. }) => {}
        }
        Ok(())
    }

    fn apply_mt(&mut self, abs: Abs, value: i32) -> Result<(), AnalysisError> {
        match abs {
            Abs::MtSlot => self.select_slot(value)?,
            Abs::MtTrackingId => {
                let slot = &mut self.slots[self.current];
                if value == -1 {
                    slot.end();
                } else {
                    slot.begin();
                }
                slot.dirty = true;
                trace!(slot = self.current, tracking_id = value, "tracking id");
            }
            Abs::MtPressure => self.slots[self.current].pressure = value,
            Abs::MtPositionX => self.apply_axis(Axis::X, value),
            Abs::MtPositionY => self.apply_axis(Axis::Y, value),
            Abs::X | Abs::Y | Abs::Pressure => {}
        }
        Ok(())
    }

    fn apply_st(&mut self, abs: Abs, value: i32) {
        match abs {
            Abs::Pressure => self.slots[self.current].pressure = value,
            Abs::X => self.apply_axis(Axis::X, value),
            Abs::Y => self.apply_axis(Axis::Y, value),
            Abs::MtSlot
            | Abs::MtTrackingId
            | Abs::MtPressure
            | Abs::MtPositionX
            | Abs::MtPositionY => {}
        }
    }

    fn apply_tool(&mut self, key: Key, value: i32) {
        match key {
            Key::ToolFinger | Key::ToolPen => self.current = 0,
            Key::ToolDoubleTap => {
                if self.slots.len() > 1 {
                    self.current = 1;
                }
            }
            _ => return,
        }

        let slot = &mut self.slots[self.current];
        if value != 0 {
            slot.begin();
        } else {
            slot.end();
        }
        slot.dirty = true;
    }

    /// Switch the current slot.
    ///
    /// Every slot up to and including the selected one is marked used:
    /// some devices (bcm5974) cycle through ascending slot numbers without
    /// ever starting a contact in the lower ones.
    fn select_slot(&mut self, value: i32) -> Result<(), AnalysisError> {
        let index = usize::try_from(value)
            .ok()
            .filter(|&i| i < self.slots.len())
            .ok_or(AnalysisError::SlotOutOfRange {
                slot: value,
                count: self.slots.len(),
            })?;

        self.current = index;
        for slot in &mut self.slots[..=index] {
            slot.used = true;
        }
        self.slots[index].dirty = true;
        Ok(())
    }

    fn apply_axis(&mut self, axis: Axis, value: i32) {
        let value = i64::from(value);
        let slot = &mut self.slots[self.current];
        slot.dirty = true;

        // Recording started after touch down
        if slot.state == SlotState::None {
            slot.begin();
        }

        let active = slot.state == SlotState::Active;
        match axis {
            Axis::X => {
                if active {
                    slot.delta.x = value - slot.position.x;
                }
                slot.position.x = value;
            }
            Axis::Y => {
                if active {
                    slot.delta.y = value - slot.position.y;
                }
                slot.position.y = value;
            }
        }
    }
}
