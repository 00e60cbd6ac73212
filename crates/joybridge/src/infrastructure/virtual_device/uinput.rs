//! Linux virtual joystick via uinput.
//!
//! # What is uinput? (for beginners)
//!
//! `/dev/uinput` is a kernel interface that lets a userspace process create an
//! input device.  The process declares which event families and codes the
//! device supports (here: `EV_KEY` buttons and `EV_ABS` axes), and the kernel
//! then exposes a regular `/dev/input/eventN` node (plus `/dev/input/jsN`
//! through the joystick driver).  Anything the process writes to the uinput
//! file descriptor is delivered to readers of that node exactly like events
//! from physical hardware.
//!
//! # Declaration
//!
//! The device is declared from [`Capabilities::declared_codes`], the same
//! tables the translator resolves indices against, so a translated code is
//! always one the device was created with.
//!
//! # Synchronization
//!
//! `evdev`'s [`VirtualDevice::emit`] writes the given events and then appends
//! an `EV_SYN`/`SYN_REPORT` itself.  Data writes are therefore staged by
//! [`DeviceSink::write`] and flushed together with the report in
//! [`DeviceSink::sync`], which keeps each state update a single write batch.
//!
//! # Permissions
//!
//! Opening `/dev/uinput` normally requires root or membership in a group
//! granted access by a udev rule.  Without it, [`UinputJoystick::create`]
//! fails with [`SinkError::Create`].

use std::io;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, UinputAbsSetup,
};
use joybridge_core::{Capabilities, DeviceEventWrite, EventFamily};
use tracing::{debug, info, warn};

use crate::application::translate_event::{DeviceSink, SinkError};

/// Lowest axis value declared to the kernel (joystick API `i16` range).
pub const AXIS_MIN: i32 = -32768;
/// Highest axis value declared to the kernel.
pub const AXIS_MAX: i32 = 32767;

/// A virtual joystick registered through `/dev/uinput`.
///
/// The device is destroyed when this value is dropped.
pub struct UinputJoystick {
    device: VirtualDevice,
    pending: Vec<DeviceEventWrite>,
}

impl UinputJoystick {
    /// Creates and registers the virtual device.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Create`] if `/dev/uinput` cannot be opened or the
    /// kernel rejects the declaration.
    pub fn create(name: &str, capabilities: &Capabilities) -> Result<Self, SinkError> {
        let mut keys = AttributeSet::<Key>::new();
        let mut axes = Vec::new();
        for (family, code) in capabilities.declared_codes() {
            match family {
                EventFamily::Key => {
                    keys.insert(Key::new(code));
                }
                EventFamily::Absolute => axes.push(AbsoluteAxisType(code)),
                EventFamily::Synchronization => {}
            }
        }

        let mut builder = VirtualDeviceBuilder::new()
            .map_err(SinkError::Create)?
            .name(name)
            .with_keys(&keys)
            .map_err(SinkError::Create)?;
        for axis in axes {
            let setup = UinputAbsSetup::new(axis, AbsInfo::new(0, AXIS_MIN, AXIS_MAX, 0, 0, 0));
            builder = builder
                .with_absolute_axis(&setup)
                .map_err(SinkError::Create)?;
        }
        let mut device = builder.build().map_err(SinkError::Create)?;

        info!(
            "created virtual device `{name}` with {} buttons and {} axes",
            capabilities.buttons.len(),
            capabilities.axes.len()
        );
        for table in [&capabilities.buttons, &capabilities.axes] {
            for (index, entry) in table.entries().enumerate() {
                debug!("{:?} {index} -> {} (0x{:03X})", table.family(), entry.name, entry.code);
            }
        }
        match device.enumerate_dev_nodes_blocking() {
            Ok(nodes) => {
                for node in nodes.flatten() {
                    info!("virtual device available as {}", node.display());
                }
            }
            Err(e) => warn!("could not enumerate virtual device nodes: {e}"),
        }

        Ok(Self {
            device,
            pending: Vec::with_capacity(1),
        })
    }
}

impl DeviceSink for UinputJoystick {
    fn write(&mut self, family: EventFamily, code: u16, value: i32) -> Result<(), SinkError> {
        self.pending.push(DeviceEventWrite { family, code, value });
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        let pending = std::mem::take(&mut self.pending);
        let events = to_input_events(&pending);

        self.device
            .emit(&events)
            .map_err(|source| emit_error(&pending, source))?;

        debug!(count = events.len(), "flushed events with SYN_REPORT");
        Ok(())
    }
}

/// Converts staged writes into raw evdev events, in order.
///
/// No `SYN_REPORT` is added: `emit` appends it.
fn to_input_events(pending: &[DeviceEventWrite]) -> Vec<InputEvent> {
    pending
        .iter()
        .map(|w| InputEvent::new(EventType(w.family.raw()), w.code, w.value))
        .collect()
}

/// Attributes a failed `emit` to the first staged data write, or to the
/// report itself when nothing was staged.
fn emit_error(pending: &[DeviceEventWrite], source: io::Error) -> SinkError {
    match pending.first() {
        Some(w) => SinkError::Write {
            family: w.family,
            code: w.code,
            source,
        },
        None => SinkError::Sync(source),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
