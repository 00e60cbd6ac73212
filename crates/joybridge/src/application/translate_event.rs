//! TranslateEventUseCase: replays a decoded joystick event on the virtual device.
//!
//! This use case sits at the application layer and delegates to a
//! [`DeviceSink`] for the actual device writes.  The uinput implementation
//! lives in the infrastructure layer.
//!
//! # Error policy
//!
//! | Failure                  | Variant                              | Fatal? |
//! |--------------------------|--------------------------------------|--------|
//! | `type` not button/axis   | [`TranslationError::UnknownKind`]    | no     |
//! | `number` outside table   | [`TranslationError::IndexOutOfRange`]| no     |
//! | device write/sync failed | [`TranslationError::Sink`]           | yes    |
//!
//! Validation failures never touch the sink, so a malformed message cannot
//! leave a half-written state update behind.  A sink failure means the device
//! can no longer be trusted to reflect what consumers believe its state is,
//! so the caller must stop translating.

use joybridge_core::{
    Capabilities, DeviceEventWrite, EventFamily, EventKind, InboundEvent, InvalidIndex,
};
use thiserror::Error;
use tracing::trace;

/// Errors raised by a [`DeviceSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The virtual device could not be created or registered.
    #[error("failed to create virtual device: {0}")]
    Create(#[source] std::io::Error),

    /// A data write was rejected by the device.
    #[error("failed to write {family:?} event 0x{code:03X}: {source}")]
    Write {
        family: EventFamily,
        code: u16,
        #[source]
        source: std::io::Error,
    },

    /// The synchronization report could not be written.
    #[error("failed to write synchronization report: {0}")]
    Sync(#[source] std::io::Error),
}

/// The virtual device as seen by the translator.
///
/// Implementations own the device and its capability declaration; the
/// translator only ever writes events and synchronization markers.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceSink {
    /// Writes one `(family, code, value)` event.
    fn write(&mut self, family: EventFamily, code: u16, value: i32) -> Result<(), SinkError>;

    /// Writes the `SYN_REPORT` marker closing the current state update.
    fn sync(&mut self) -> Result<(), SinkError>;
}

/// Outcome of a translation that did not produce device writes, or whose
/// writes failed.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The `type` field is neither `JS_EVENT_BUTTON` nor `JS_EVENT_AXIS`.
    #[error("invalid event type: {0}")]
    UnknownKind(i32),

    /// The `number` field does not index into the selected table.
    #[error("invalid {kind} number {index} (valid: 0..{bound})")]
    IndexOutOfRange {
        kind: EventKind,
        index: i32,
        bound: usize,
    },

    /// The device rejected a write.
    #[error("virtual device failure: {0}")]
    Sink(#[from] SinkError),
}

impl TranslationError {
    /// Returns `true` if translation must not continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}

/// The Translate Event use case.
///
/// Holds the capability tables and the device sink; carries no state between
/// calls, so the same input always produces the same writes.
pub struct TranslateEventUseCase<S> {
    capabilities: Capabilities,
    sink: S,
}

impl<S: DeviceSink> TranslateEventUseCase<S> {
    /// Creates a new use case writing to `sink`.
    ///
    /// `capabilities` must be the same tables the sink's device was created
    /// with.
    pub fn new(capabilities: Capabilities, sink: S) -> Self {
        Self { capabilities, sink }
    }

    /// Translates one inbound event into a data write followed by a sync.
    ///
    /// Returns the data write that was issued.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::UnknownKind`] or
    /// [`TranslationError::IndexOutOfRange`] without touching the sink, or
    /// [`TranslationError::Sink`] if the device rejected a write.
    pub fn translate(&mut self, event: &InboundEvent) -> Result<DeviceEventWrite, TranslationError> {
        let kind = EventKind::from_raw(event.kind).ok_or(TranslationError::UnknownKind(event.kind))?;

        let code = self
            .capabilities
            .lookup(kind, event.index)
            .map_err(|InvalidIndex { index, bound }| TranslationError::IndexOutOfRange {
                kind,
                index,
                bound,
            })?;

        let write = DeviceEventWrite {
            family: kind.family(),
            code,
            value: event.value,
        };
        self.sink.write(write.family, write.code, write.value)?;
        self.sink.sync()?;

        trace!(?write, "event written");
        Ok(write)
    }

    /// Borrows the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the use case and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
