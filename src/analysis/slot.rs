//! Per-contact slot record.

/// Integer position or displacement in device units.
///
/// Wider than the `i32` event values so differences between any two
/// samples fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Lifecycle of a contact within a slot.
///
/// `None -> Begin -> Active -> End -> None`. Begin and End each last
/// exactly one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotState {
    /// No contact
    #[default]
    None,
    /// Contact started in this frame
    Begin,
    /// Contact ongoing
    Active,
    /// Contact lifted in this frame
    End,
}

/// State of one contact-tracking channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    index: usize,
    pub state: SlotState,
    /// Last absolute position
    pub position: Point,
    /// Position when the contact became active
    pub origin: Point,
    /// Motion since the previous frame
    pub delta: Point,
    /// Last pressure sample
    pub pressure: i32,
    /// Sticky: once set, the slot gets a column in every frame
    pub used: bool,
    /// Touched since the last frame boundary
    pub dirty: bool,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            state: SlotState::None,
            position: Point::ZERO,
            origin: Point::ZERO,
            delta: Point::ZERO,
            pressure: 0,
            used: false,
            dirty: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Start a new contact. Motion history is discarded.
    pub(crate) fn begin(&mut self) {
        self.state = SlotState::Begin;
        self.delta = Point::ZERO;
    }

    pub(crate) fn end(&mut self) {
        self.state = SlotState::End;
    }

    /// Post-render transition run once per frame.
    ///
    /// Clears the per-frame fields and advances Begin to Active (capturing
    /// the origin) and End to None.
    pub(crate) fn finish_frame(&mut self) {
        self.dirty = false;
        self.delta = Point::ZERO;
        match self.state {
            SlotState::Begin => {
                self.origin = self.position;
                self.state = SlotState::Active;
            }
            SlotState::End => self.state = SlotState::None,
            SlotState::None | SlotState::Active => {}
        }
    }
}
