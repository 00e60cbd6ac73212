//! Inbound joystick event descriptors and outbound device event writes.
//!
//! # Two sides of the bridge (for beginners)
//!
//! An [`InboundEvent`] is what arrives on the MQTT topic.  It speaks the
//! vocabulary of the Linux *joystick* API (`/dev/input/jsN`): a `type`
//! (button or axis), a `number` (which button or axis), and a `value`.
//!
//! A [`DeviceEventWrite`] is what goes out to the virtual device.  It speaks
//! the vocabulary of the Linux *evdev* API (`/dev/input/eventN`): an event
//! family (`EV_KEY`, `EV_ABS`, `EV_SYN`), an event code (`BTN_A`,
//! `ABS_HAT0X`, ...), and a value.
//!
//! Evdev consumers only act on a batch of writes once they see the
//! `EV_SYN`/`SYN_REPORT` marker, which is why every data write is followed by
//! [`DeviceEventWrite::sync_report`].

use serde::Serialize;

/// `SYN_REPORT` code within the `EV_SYN` family.
pub const SYN_REPORT: u16 = 0x00;

/// Evdev event families used by the virtual joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFamily {
    /// `EV_SYN` – synchronization markers.
    Synchronization,
    /// `EV_KEY` – buttons.
    Key,
    /// `EV_ABS` – absolute axes.
    Absolute,
}

impl EventFamily {
    /// Returns the `EV_*` value from `input-event-codes.h`.
    pub fn raw(self) -> u16 {
        match self {
            Self::Synchronization => 0x00,
            Self::Key => 0x01,
            Self::Absolute => 0x03,
        }
    }
}

/// One decoded message from the topic.
///
/// The wire names are `type`, `number`, and `value`.  `kind` stays a raw
/// integer because unrecognised kinds are rejected by the translator, not by
/// the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InboundEvent {
    /// Event kind discriminator (`JS_EVENT_BUTTON` or `JS_EVENT_AXIS`).
    #[serde(rename = "type")]
    pub kind: i32,
    /// Button or axis index.
    #[serde(rename = "number")]
    pub index: i32,
    /// New state: 0/1 for buttons, a signed position for axes.
    pub value: i32,
}

impl InboundEvent {
    /// Convenience constructor.
    pub fn new(kind: i32, index: i32, value: i32) -> Self {
        Self { kind, index, value }
    }
}

/// A single `(family, code, value)` write destined for the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEventWrite {
    /// Evdev event family (`EV_KEY`, `EV_ABS` or `EV_SYN`).
    pub family: EventFamily,
    /// Event code within the family, e.g. `BTN_A` or `ABS_HAT0X`.
    pub code: u16,
    /// Button state, axis position, or `0` for a sync marker.
    pub value: i32,
}

impl DeviceEventWrite {
    /// The `EV_SYN`/`SYN_REPORT` marker that closes one state update.
    pub fn sync_report() -> Self {
        Self {
            family: EventFamily::Synchronization,
            code: SYN_REPORT,
            value: 0,
        }
    }

    /// Returns `true` for a `SYN_REPORT` marker.
    pub fn is_sync(&self) -> bool {
        self.family == EventFamily::Synchronization && self.code == SYN_REPORT
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
