//! Application layer use cases.
//!
//! # What use cases does the bridge have?
//!
//! - **`translate_event`** – Validates a decoded [`joybridge_core::InboundEvent`]
//!   against the capability tables and writes it to the virtual device,
//!   followed by a synchronization report.  The device is reached through the
//!   [`translate_event::DeviceSink`] trait, injected at construction time.
//!
//! - **`handle_message`** – The per-message unit of work: decode one MQTT
//!   payload, translate it, log whatever went wrong, and tell the caller
//!   whether it may continue.

pub mod handle_message;
pub mod translate_event;
