//! libinput-record YAML loader
//!
//! Reads the subset of the `libinput record` output the analyzer needs:
//! the per-device absinfo table and the flat list of evdev events. Other
//! sections (udev, quirks, hid, libinput events) are ignored.
//!
//! Layout of the relevant parts:
//!
//! ```yaml
//! devices:
//! - node: /dev/input/event7
//!   evdev:
//!     name: "SYNA3602:00 0911:5288 Touchpad"
//!     absinfo:
//!       0: [0, 1228, 0, 0, 12]      # min, max, fuzz, flat, resolution
//!   events:
//!   - evdev:
//!     - [  0,      0,   3,  57,  42] # sec, usec, type, code, value
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::evdev::{AbsInfo, InputEvent};

#[derive(Deserialize)]
struct RawRecording {
    #[serde(default)]
    devices: Option<Vec<RawDevice>>,
}

#[derive(Deserialize)]
struct RawDevice {
    #[serde(default)]
    node: Option<String>,
    evdev: RawEvdev,
    #[serde(default)]
    events: Option<Vec<RawEventGroup>>,
}

#[derive(Deserialize)]
struct RawEvdev {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    absinfo: Option<BTreeMap<u16, [i32; 5]>>,
}

/// One entry of the `events:` list. Entries without an `evdev` key
/// (e.g. `libinput:` event dumps) carry nothing for us.
#[derive(Deserialize)]
struct RawEventGroup {
    #[serde(default)]
    evdev: Option<Vec<(u64, u32, u16, u16, i32)>>,
}

/// A recorded input device with its static metadata and event stream.
#[derive(Debug, Clone, Default)]
pub struct Device {
    /// Device node the recording was taken from
    pub node: Option<String>,
    /// Kernel device name
    pub name: Option<String>,
    /// Absolute axis metadata keyed by axis code
    pub absinfo: BTreeMap<u16, AbsInfo>,
    /// All evdev events in recorded order
    pub events: Vec<InputEvent>,
}

impl Device {
    /// Display label used in logs.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.node.as_deref())
            .unwrap_or("unnamed device")
    }
}

impl From<RawDevice> for Device {
    fn from(raw: RawDevice) -> Self {
        let absinfo = raw
            .evdev
            .absinfo
            .unwrap_or_default()
            .into_iter()
            .map(|(code, values)| (code, AbsInfo::from(values)))
            .collect();

        let events = raw
            .events
            .unwrap_or_default()
            .into_iter()
            .filter_map(|group| group.evdev)
            .flatten()
            .map(|(sec, usec, ev_type, code, value)| {
                InputEvent::new(sec, usec, ev_type, code, value)
            })
            .collect();

        Self {
            node: raw.node,
            name: raw.evdev.name,
            absinfo,
            events,
        }
    }
}

/// A complete parsed recording.
#[derive(Debug, Clone)]
pub struct Recording {
    pub devices: Vec<Device>,
}

impl Recording {
    /// Parse a recording from a path
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let reader = BufReader::new(file);

        Self::parse_reader(reader).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Parse a recording from a reader
    pub fn parse_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawRecording =
            serde_yaml::from_reader(reader).context("Invalid libinput recording")?;
        Self::from_raw(raw)
    }

    /// Parse from a string
    pub fn parse_str(content: &str) -> Result<Self> {
        let raw: RawRecording =
            serde_yaml::from_str(content).context("Invalid libinput recording")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRecording) -> Result<Self> {
        let devices: Vec<Device> = raw
            .devices
            .unwrap_or_default()
            .into_iter()
            .map(Device::from)
            .collect();

        if devices.is_empty() {
            bail!("Recording contains no devices");
        }

        Ok(Self { devices })
    }

    /// Select a device by its position in the recording.
    pub fn device(&self, index: usize) -> Result<&Device> {
        self.devices.get(index).with_context(|| {
            format!(
                "Device {} not found (recording has {} device(s))",
                index,
                self.devices.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evdev::{Abs, Code, Key, ABS_MT_PRESSURE, ABS_MT_SLOT, ABS_X};

    fn sample_recording() -> &'static str {
        r#"
version: 1
ndevices: 1
libinput:
  version: "1.25.0"
system:
  kernel: "6.5.0"
devices:
- node: /dev/input/event7
  evdev:
    name: "Test Touchpad"
    id: [24, 1267, 12850, 256]
    codes:
      0: [0] # EV_SYN
    absinfo:
      0: [0, 1228, 0, 0, 12]
      1: [0, 928, 0, 0, 12]
      47: [0, 4, 0, 0, 0]
    properties: [0, 2]
  events:
  # Current time is 10:00:00
  - evdev:
    - [  0,      0,   3,  47,   0] # EV_ABS / ABS_MT_SLOT 0
    - [  0,      0,   3,  57,  12] # EV_ABS / ABS_MT_TRACKING_ID 12
    - [  0,      0,   1, 330,   1] # EV_KEY / BTN_TOUCH 1
    - [  0,      0,   0,   0,   0] # ------------ SYN_REPORT (0) ---------- +0ms
  - libinput:
    - {type: POINTER_MOTION, time: 0.000}
  - evdev:
    - [  0,   7000,   3,  53, 300] # EV_ABS / ABS_MT_POSITION_X 300
    - [  0,   7000,   0,   0,   0] # ------------ SYN_REPORT (0) ---------- +7ms
"#
    }

    #[test]
    fn parse_reads_absinfo() {
        let recording = Recording::parse_str(sample_recording()).unwrap();
        let device = recording.device(0).unwrap();
        assert_eq!(device.name.as_deref(), Some("Test Touchpad"));
        assert_eq!(device.absinfo[&ABS_X].resolution, 12);
        assert_eq!(device.absinfo[&ABS_MT_SLOT].maximum, 4);
        assert!(!device.absinfo.contains_key(&ABS_MT_PRESSURE));
    }

    #[test]
    fn parse_flattens_evdev_groups_and_skips_libinput_entries() {
        let recording = Recording::parse_str(sample_recording()).unwrap();
        let events = &recording.devices[0].events;
        assert_eq!(events.len(), 6);
        assert_eq!(events[1].code, Code::Abs(Abs::MtTrackingId));
        assert_eq!(events[1].value, 12);
        assert_eq!(events[2].code, Code::Key(Key::Touch));
        assert_eq!(events[4].usec, 7000);
        assert_eq!(events[5].code, Code::SynReport);
    }

    #[test]
    fn parse_accepts_device_without_events() {
        let content = r#"
devices:
- evdev:
    name: "Idle"
    absinfo:
      0: [0, 100, 0, 0, 0]
  events:
"#;
        let recording = Recording::parse_str(content).unwrap();
        assert!(recording.devices[0].events.is_empty());
        assert_eq!(recording.devices[0].label(), "Idle");
    }

    #[test]
    fn rejects_recording_without_devices() {
        let result = Recording::parse_str("version: 1\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no devices"));
    }

    #[test]
    fn rejects_malformed_event() {
        let content = r#"
devices:
- evdev:
    absinfo: {}
  events:
  - evdev:
    - [0, 0, 3]
"#;
        assert!(Recording::parse_str(content).is_err());
    }

    #[test]
    fn device_index_out_of_range_is_error() {
        let recording = Recording::parse_str(sample_recording()).unwrap();
        let err = recording.device(3).unwrap_err();
        assert!(err.to_string().contains("Device 3 not found"));
    }
}
