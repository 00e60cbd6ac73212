//! Infrastructure layer for the bridge.
//!
//! Contains OS- and network-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `joybridge_core`, but MUST NOT be imported by the `application` or
//! `domain` layers.
//!
//! # Sub-modules
//!
//! - **`virtual_device`** – [`DeviceSink`](crate::application::translate_event::DeviceSink)
//!   implementations: the uinput joystick (Linux only) and an in-memory
//!   recording sink for tests.
//!
//! - **`mqtt`** – MQTT client that subscribes to the event topic and feeds
//!   every publish, one at a time, into the application layer.

pub mod mqtt;
pub mod virtual_device;
