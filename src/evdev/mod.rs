//! Kernel input event codes and the raw event record.
//!
//! Only the codes the analyzer reacts to are decoded into named variants.
//! Everything else is carried as [`Code::Other`] so the replay loop can
//! match exhaustively without losing events.

/// Event type: synchronization markers
pub const EV_SYN: u16 = 0x00;
/// Event type: keys and buttons
pub const EV_KEY: u16 = 0x01;
/// Event type: absolute axes
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0x00;

pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOOL_FINGER: u16 = 0x145;
pub const BTN_TOOL_QUINTTAP: u16 = 0x148;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_TOOL_DOUBLETAP: u16 = 0x14d;
pub const BTN_TOOL_TRIPLETAP: u16 = 0x14e;
pub const BTN_TOOL_QUADTAP: u16 = 0x14f;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const ABS_MT_SLOT: u16 = 0x2f;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;
pub const ABS_MT_PRESSURE: u16 = 0x3a;

/// Keys and buttons the analyzer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Middle,
    ToolPen,
    ToolFinger,
    ToolQuintTap,
    Touch,
    ToolDoubleTap,
    ToolTripleTap,
    ToolQuadTap,
}

impl Key {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            BTN_LEFT => Some(Key::Left),
            BTN_RIGHT => Some(Key::Right),
            BTN_MIDDLE => Some(Key::Middle),
            BTN_TOOL_PEN => Some(Key::ToolPen),
            BTN_TOOL_FINGER => Some(Key::ToolFinger),
            BTN_TOOL_QUINTTAP => Some(Key::ToolQuintTap),
            BTN_TOUCH => Some(Key::Touch),
            BTN_TOOL_DOUBLETAP => Some(Key::ToolDoubleTap),
            BTN_TOOL_TRIPLETAP => Some(Key::ToolTripleTap),
            BTN_TOOL_QUADTAP => Some(Key::ToolQuadTap),
            _ => None,
        }
    }
}

/// Absolute axes the analyzer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Abs {
    X,
    Y,
    Pressure,
    MtSlot,
    MtPositionX,
    MtPositionY,
    MtTrackingId,
    MtPressure,
}

impl Abs {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            ABS_X => Some(Abs::X),
            ABS_Y => Some(Abs::Y),
            ABS_PRESSURE => Some(Abs::Pressure),
            ABS_MT_SLOT => Some(Abs::MtSlot),
            ABS_MT_POSITION_X => Some(Abs::MtPositionX),
            ABS_MT_POSITION_Y => Some(Abs::MtPositionY),
            ABS_MT_TRACKING_ID => Some(Abs::MtTrackingId),
            ABS_MT_PRESSURE => Some(Abs::MtPressure),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Abs::X => ABS_X,
            Abs::Y => ABS_Y,
            Abs::Pressure => ABS_PRESSURE,
            Abs::MtSlot => ABS_MT_SLOT,
            Abs::MtPositionX => ABS_MT_POSITION_X,
            Abs::MtPositionY => ABS_MT_POSITION_Y,
            Abs::MtTrackingId => ABS_MT_TRACKING_ID,
            Abs::MtPressure => ABS_MT_PRESSURE,
        }
    }
}

/// Decoded `(type, code)` pair of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// End of a hardware frame
    SynReport,
    Key(Key),
    Abs(Abs),
    /// Any code the analyzer does not interpret
    Other { ev_type: u16, code: u16 },
}

impl Code {
    pub fn from_raw(ev_type: u16, code: u16) -> Self {
        let decoded = match ev_type {
            EV_SYN if code == SYN_REPORT => Some(Code::SynReport),
            EV_KEY => Key::from_code(code).map(Code::Key),
            EV_ABS => Abs::from_code(code).map(Code::Abs),
            _ => None,
        };
        decoded.unwrap_or(Code::Other { ev_type, code })
    }
}

/// One timestamped kernel input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub sec: u64,
    pub usec: u32,
    pub code: Code,
    pub value: i32,
}

impl InputEvent {
    pub fn new(sec: u64, usec: u32, ev_type: u16, code: u16, value: i32) -> Self {
        Self {
            sec,
            usec,
            code: Code::from_raw(ev_type, code),
            value,
        }
    }

    pub fn abs(sec: u64, usec: u32, abs: Abs, value: i32) -> Self {
        Self {
            sec,
            usec,
            code: Code::Abs(abs),
            value,
        }
    }

    pub fn key(sec: u64, usec: u32, key: Key, value: i32) -> Self {
        Self {
            sec,
            usec,
            code: Code::Key(key),
            value,
        }
    }

    pub fn syn(sec: u64, usec: u32) -> Self {
        Self {
            sec,
            usec,
            code: Code::SynReport,
            value: 0,
        }
    }

    /// Timestamp in microseconds.
    pub fn time_us(&self) -> i64 {
        self.sec as i64 * 1_000_000 + self.usec as i64
    }
}

/// Static range information for one absolute axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsInfo {
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
    /// Units per millimeter, 0 when the device does not report one
    pub resolution: i32,
}

impl From<[i32; 5]> for AbsInfo {
    fn from(v: [i32; 5]) -> Self {
        Self {
            minimum: v[0],
            maximum: v[1],
            fuzz: v[2],
            flat: v[3],
            resolution: v[4],
        }
    }
}
