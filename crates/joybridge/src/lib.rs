//! joybridge library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does joybridge do? (for beginners)
//!
//! joybridge turns messages on an MQTT topic into input from a virtual
//! gamepad.  A publisher somewhere on the network (for example a process
//! reading a real joystick, or a phone app) sends one small JSON object per
//! button press or stick movement.  joybridge:
//!
//! 1. Registers a virtual XBOX-style gamepad with the kernel through uinput.
//! 2. Connects to the MQTT broker and subscribes to the configured topic.
//! 3. Decodes each message into a `(type, number, value)` event.
//! 4. Resolves `number` to a Linux input event code through the capability
//!    tables in `joybridge-core`.
//! 5. Writes the event to the virtual device, followed by a synchronization
//!    report, so games see one complete state change per message.

/// Application layer: per-message use cases.
pub mod application;

/// Domain layer: configuration types.
pub mod domain;

/// Infrastructure layer: uinput device and MQTT client.
pub mod infrastructure;
