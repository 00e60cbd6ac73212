//! Recording device sink for tests.
//!
//! The real sink writes to `/dev/uinput`, which needs root (or a udev rule)
//! and creates an actual input device on the test machine.  `RecordingSink`
//! replaces every write with an in-memory record so tests can assert exactly
//! which events were emitted and in what order.
//!
//! # Failure injection
//!
//! Set `fail_writes` or `fail_sync` to make the corresponding call return an
//! I/O error, for testing the fatal path of callers.

use std::io;

use joybridge_core::{DeviceEventWrite, EventFamily};

use crate::application::translate_event::{DeviceSink, SinkError};

/// A sink that records all calls without touching any device.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every successful call in order; `sync()` is recorded as
    /// [`DeviceEventWrite::sync_report`].
    pub writes: Vec<DeviceEventWrite>,
    /// When `true`, `write` returns [`SinkError::Write`].
    pub fail_writes: bool,
    /// When `true`, `sync` returns [`SinkError::Sync`].
    pub fail_sync: bool,
}

impl RecordingSink {
    /// Creates an empty sink that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Data writes only, sync markers removed.
    pub fn data_writes(&self) -> Vec<DeviceEventWrite> {
        self.writes.iter().copied().filter(|w| !w.is_sync()).collect()
    }

    /// Number of recorded sync markers.
    pub fn sync_count(&self) -> usize {
        self.writes.iter().filter(|w| w.is_sync()).count()
    }
}

impl DeviceSink for RecordingSink {
    fn write(&mut self, family: EventFamily, code: u16, value: i32) -> Result<(), SinkError> {
        if self.fail_writes {
            return Err(SinkError::Write {
                family,
                code,
                source: io::Error::new(io::ErrorKind::BrokenPipe, "mock failure"),
            });
        }
        self.writes.push(DeviceEventWrite { family, code, value });
        Ok(())
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        if self.fail_sync {
            return Err(SinkError::Sync(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "mock failure",
            )));
        }
        self.writes.push(DeviceEventWrite::sync_report());
        Ok(())
    }
}
