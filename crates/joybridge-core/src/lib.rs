//! # joybridge-core
//!
//! Shared library for joybridge containing the virtual joystick's capability
//! tables, the joystick event message types, and the JSON payload codec.
//!
//! It has zero dependencies on OS APIs, message-bus clients, or device nodes,
//! so everything here can be exercised from plain unit tests.
//!
//! # Architecture overview (for beginners)
//!
//! joybridge subscribes to one MQTT topic.  Every message published on that
//! topic describes a single joystick event, for example "button 0 was
//! pressed" or "axis 3 moved to -12000".  joybridge replays that event on a
//! virtual joystick registered with the Linux kernel, so games and emulators
//! see it exactly like input from a physical gamepad.
//!
//! This crate is the shared foundation.  It defines:
//!
//! - **`capability`** – The fixed tables that map a small index (button 0,
//!   axis 7, ...) to the Linux input event code the virtual device declares.
//!   The same tables are used to register the device and to translate events,
//!   so the two can never disagree.
//!
//! - **`protocol`** – The decoded message type ([`InboundEvent`]), the event
//!   families written to the device, and the JSON codec that turns raw MQTT
//!   payload bytes into an [`InboundEvent`].

pub mod capability;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `joybridge_core::InboundEvent` instead of the full module path.
pub use capability::{Capabilities, CapabilityTable, EventKind, InvalidIndex};
pub use protocol::codec::{decode_event, encode_event, DecodeError};
pub use protocol::messages::{DeviceEventWrite, EventFamily, InboundEvent};
