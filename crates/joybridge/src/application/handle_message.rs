//! HandleMessageUseCase: one MQTT payload in, zero or one device update out.
//!
//! Decodes the payload, hands the decoded event to
//! [`TranslateEventUseCase`], and sorts the outcome into "keep going" or
//! "stop": every recoverable problem is logged here and reported as a
//! [`Dispatch`] variant, and only a device failure escapes as an error.

use joybridge_core::{decode_event, DecodeError, DeviceEventWrite};
use tracing::{debug, info, warn};

use super::translate_event::{DeviceSink, SinkError, TranslateEventUseCase, TranslationError};

/// What happened to one inbound payload.
#[derive(Debug)]
pub enum Dispatch {
    /// The event was written to the device and synchronised.
    Translated(DeviceEventWrite),
    /// The payload could not be decoded; the translator was not invoked.
    Undecodable(DecodeError),
    /// The event was decoded but rejected by validation; nothing was written.
    Rejected(TranslationError),
}

/// Processes one payload.
///
/// When `verbose` is set, every payload is echoed to the log at `info`
/// level before decoding.
///
/// # Errors
///
/// Returns [`SinkError`] if the device rejected a write.  The caller must
/// treat this as fatal and stop processing messages.
pub fn handle_payload<S: DeviceSink>(
    use_case: &mut TranslateEventUseCase<S>,
    payload: &[u8],
    verbose: bool,
) -> Result<Dispatch, SinkError> {
    if verbose {
        info!("payload: {}", String::from_utf8_lossy(payload));
    }

    let event = match decode_event(payload) {
        Ok(event) => event,
        Err(e) => {
            warn!("dropping message: {e}: {}", String::from_utf8_lossy(payload));
            return Ok(Dispatch::Undecodable(e));
        }
    };
    debug!(kind = event.kind, index = event.index, value = event.value, "event received");

    match use_case.translate(&event) {
        Ok(write) => Ok(Dispatch::Translated(write)),
        Err(TranslationError::Sink(e)) => Err(e),
        Err(e) => {
            warn!("dropping event: {e}");
            Ok(Dispatch::Rejected(e))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::translate_event::MockDeviceSink;
    use joybridge_core::{Capabilities, EventFamily, EventKind};
    use std::io;

    fn use_case(sink: MockDeviceSink) -> TranslateEventUseCase<MockDeviceSink> {
        TranslateEventUseCase::new(Capabilities::XBOX, sink)
    }

    fn untouched_sink() -> MockDeviceSink {
        let mut sink = MockDeviceSink::new();
        sink.expect_write().never();
        sink.expect_sync().never();
        sink
    }

    #[test]
    fn test_valid_payload_is_translated() {
        // Arrange
        let mut sink = MockDeviceSink::new();
        sink.expect_write().times(1).returning(|_, _, _| Ok(()));
        sink.expect_sync().times(1).returning(|| Ok(()));
        let mut uc = use_case(sink);

        // Act
        let outcome = handle_payload(&mut uc, br#"{"type":1,"number":0,"value":1}"#, false);

        // Assert
        match outcome {
            Ok(Dispatch::Translated(write)) => {
                assert_eq!(write.family, EventFamily::Key);
                assert_eq!(write.code, 0x130);
            }
            other => panic!("expected Translated, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_undecodable() {
        let mut uc = use_case(untouched_sink());

        let outcome = handle_payload(&mut uc, b"\xff\xfe garbage", true).unwrap();

        assert!(matches!(outcome, Dispatch::Undecodable(DecodeError::InvalidJson(_))));
    }

    #[test]
    fn test_missing_field_is_undecodable() {
        let mut uc = use_case(untouched_sink());

        let outcome = handle_payload(&mut uc, br#"{"type":1,"number":0}"#, false).unwrap();

        assert!(matches!(outcome, Dispatch::Undecodable(DecodeError::MissingField("value"))));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut uc = use_case(untouched_sink());

        let outcome = handle_payload(&mut uc, br#"{"type":99,"number":0,"value":0}"#, false).unwrap();

        assert!(matches!(outcome, Dispatch::Rejected(TranslationError::UnknownKind(99))));
    }

    #[test]
    fn test_out_of_range_axis_is_rejected() {
        let mut uc = use_case(untouched_sink());

        let outcome = handle_payload(&mut uc, br#"{"type":2,"number":8,"value":0}"#, false).unwrap();

        assert!(matches!(
            outcome,
            Dispatch::Rejected(TranslationError::IndexOutOfRange { kind: EventKind::Axis, index: 8, bound: 8 })
        ));
    }

    #[test]
    fn test_sink_failure_escapes_as_error() {
        // Arrange
        let mut sink = MockDeviceSink::new();
        sink.expect_write().times(1).returning(|family, code, _| {
            Err(SinkError::Write {
                family,
                code,
                source: io::Error::new(io::ErrorKind::NotFound, "no such device"),
            })
        });
        sink.expect_sync().never();
        let mut uc = use_case(sink);

        // Act
        let outcome = handle_payload(&mut uc, br#"{"type":2,"number":1,"value":5}"#, false);

        // Assert
        assert!(matches!(outcome, Err(SinkError::Write { code: 0x11, .. })));
    }
}
