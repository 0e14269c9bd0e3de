//! Per-slot delta analysis
//!
//! Replays a recorded event stream and prints, for every frame, how each
//! touch slot moved since the previous frame.
//!
//! Pipeline, strictly forward:
//!
//! ```text
//! InputEvent -> SlotTracker -> FrameAggregator -> Classifier -> FrameRenderer
//! ```

pub mod capability;
pub mod classify;
pub mod error;
pub mod frame;
pub mod options;
pub mod render;
pub mod slot;
pub mod tracker;

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

pub use capability::{Capabilities, TrackingMode};
pub use classify::{Cell, Classifier, Direction};
pub use error::{AnalysisError, ConfigError};
pub use frame::{Frame, FrameAggregator, FrameHeader};
pub use options::{AnalysisOptions, ContactSource, CoordinateMode, Units};
pub use render::{Emit, FrameRenderer};
pub use slot::{Point, Slot, SlotState};
pub use tracker::SlotTracker;

use crate::evdev::{AbsInfo, InputEvent};

/// Counters describing a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Events consumed
    pub events: usize,
    /// SYN_REPORT boundaries seen
    pub frames: u64,
    /// Frames printed as a line
    pub printed: u64,
    /// Frames collapsed into the "below threshold" counter
    pub filtered: u64,
    /// Replay stopped early on user request
    pub interrupted: bool,
}

/// Drives one replay over a device's event stream.
#[derive(Debug)]
pub struct Analyzer {
    caps: Capabilities,
    tracker: SlotTracker,
    aggregator: FrameAggregator,
    classifier: Classifier,
    renderer: FrameRenderer,
    summary: Summary,
}

impl Analyzer {
    /// Set up an analyzer for a device. Fails before any event is consumed
    /// if the options cannot be honored.
    pub fn new(
        absinfo: &BTreeMap<u16, AbsInfo>,
        options: &AnalysisOptions,
    ) -> Result<Self, ConfigError> {
        let caps = Capabilities::resolve(absinfo, options.units, options.source)?;

        Ok(Self {
            tracker: SlotTracker::new(&caps),
            aggregator: FrameAggregator::new(),
            classifier: Classifier::new(options, caps.resolution),
            renderer: FrameRenderer::new(options),
            summary: Summary::default(),
            caps,
        })
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Feed one event. On a frame boundary the frame is classified,
    /// rendered and written to `out`.
    pub fn process<W: Write>(
        &mut self,
        event: &InputEvent,
        out: &mut W,
    ) -> Result<Option<Emit>, AnalysisError> {
        self.summary.events += 1;
        self.tracker.apply_event(event)?;

        let Some(header) = self.aggregator.observe(event) else {
            return Ok(None);
        };

        let frame = self.aggregator.snapshot(header, &self.tracker);
        let cells: Vec<Cell> = frame
            .slots
            .iter()
            .map(|slot| self.classifier.classify(slot))
            .collect();
        let emit = self.renderer.render(&frame.header, &cells);
        self.aggregator.finish_frame(&mut self.tracker);

        self.summary.frames = self.aggregator.frames();
        match emit {
            Emit::Line { .. } => self.summary.printed += 1,
            Emit::Skipped { .. } => self.summary.filtered += 1,
            Emit::Nothing => {}
        }

        emit.write_to(out)?;
        Ok(Some(emit))
    }

    /// Replay all events, stopping early once `interrupted` is set.
    pub fn run<'a, I, W>(
        &mut self,
        events: I,
        out: &mut W,
        interrupted: &AtomicBool,
    ) -> Result<Summary, AnalysisError>
    where
        I: IntoIterator<Item = &'a InputEvent>,
        W: Write,
    {
        for event in events {
            if interrupted.load(Ordering::SeqCst) {
                debug!("replay interrupted");
                self.summary.interrupted = true;
                return Ok(self.summary);
            }
            self.process(event, out)?;
        }

        if let Some(emit) = self.renderer.finish() {
            emit.write_to(out)?;
        }
        out.flush()?;

        debug!(
            events = self.summary.events,
            frames = self.summary.frames,
            printed = self.summary.printed,
            filtered = self.summary.filtered,
            "replay finished"
        );
        Ok(self.summary)
    }
}
