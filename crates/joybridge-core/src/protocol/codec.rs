//! JSON codec for joystick event payloads.
//!
//! Wire format (one JSON object per MQTT message):
//! ```text
//! {"type": 1, "number": 0, "value": 1}
//! ```
//! Extra keys are ignored.  Each of the three fields must be present.
//!
//! # Integer coercion
//!
//! Publishers are not always strict about JSON types, so field values are
//! read leniently:
//!
//! | JSON value        | Result                                  |
//! |-------------------|-----------------------------------------|
//! | integer           | itself, saturated to the `i32` range    |
//! | fractional number | truncated toward zero, then saturated   |
//! | `true` / `false`  | `1` / `0`                               |
//! | numeric string    | parsed whole, then saturated            |
//! | anything else     | [`DecodeError::NotAnInteger`]           |
//!
//! "Anything else" covers `null`, arrays, objects and strings with trailing
//! garbage such as `"12abc"`.  None of them is read as `0`, so a malformed
//! field never releases a button or centers an axis.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

use crate::protocol::messages::InboundEvent;

/// Wire name of the kind field.
pub const FIELD_TYPE: &str = "type";
/// Wire name of the index field.
pub const FIELD_NUMBER: &str = "number";
/// Wire name of the value field.
pub const FIELD_VALUE: &str = "value";

/// Errors that can occur while decoding a payload.
///
/// All of them are recoverable: the message is dropped and the next one is
/// processed normally.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A required key is absent.
    #[error("missing key `{0}`")]
    MissingField(&'static str),

    /// A required key holds a value that cannot be read as an integer.
    #[error("key `{0}` is not an integer")]
    NotAnInteger(&'static str),
}

/// Decodes one MQTT payload into an [`InboundEvent`].
///
/// # Errors
///
/// Returns [`DecodeError`] if the payload is not a JSON object or if any of
/// `type`, `number`, `value` is missing or non-numeric.
///
/// # Examples
///
/// ```rust
/// use joybridge_core::{decode_event, InboundEvent};
///
/// let event = decode_event(br#"{"type": 2, "number": 7, "value": -32768}"#).unwrap();
/// assert_eq!(event, InboundEvent::new(2, 7, -32768));
/// ```
pub fn decode_event(payload: &[u8]) -> Result<InboundEvent, DecodeError> {
    let value: Value = serde_json::from_slice(payload)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let event = InboundEvent {
        kind: int_field(object, FIELD_TYPE)?,
        index: int_field(object, FIELD_NUMBER)?,
        value: int_field(object, FIELD_VALUE)?,
    };
    trace!(?event, "decoded payload");
    Ok(event)
}

/// Encodes an [`InboundEvent`] in the wire format accepted by [`decode_event`].
///
/// Used by publishers and by tests that need well-formed payloads.
pub fn encode_event(event: &InboundEvent) -> Vec<u8> {
    // Serializing a struct of three integers into a Vec cannot fail.
    serde_json::to_vec(event).unwrap_or_default()
}

fn int_field(object: &Map<String, Value>, name: &'static str) -> Result<i32, DecodeError> {
    let value = object.get(name).ok_or(DecodeError::MissingField(name))?;
    coerce_i32(value).ok_or(DecodeError::NotAnInteger(name))
}

fn coerce_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(saturate(i))
            } else if n.as_u64().is_some() {
                Some(i32::MAX)
            } else {
                // `as` truncates toward zero and saturates at the i32 bounds.
                n.as_f64().map(|f| f as i32)
            }
        }
        Value::Bool(b) => Some(i32::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(saturate),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn saturate(i: i64) -> i32 {
    i32::try_from(i).unwrap_or(if i < 0 { i32::MIN } else { i32::MAX })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_button_press() {
        let event = decode_event(br#"{"type":1,"number":0,"value":1}"#).unwrap();
        assert_eq!(event, InboundEvent::new(1, 0, 1));
    }

    #[test]
    fn test_decode_ignores_key_order_and_extra_keys() {
        let payload = br#"{"value":-5,"time":123456,"number":3,"type":2}"#;
        assert_eq!(decode_event(payload).unwrap(), InboundEvent::new(2, 3, -5));
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode_event(b"{not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        assert!(matches!(decode_event(b""), Err(DecodeError::InvalidJson(_))));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(decode_event(b"[1,0,1]"), Err(DecodeError::NotAnObject)));
        assert!(matches!(decode_event(b"42"), Err(DecodeError::NotAnObject)));
    }

    #[test]
    fn test_decode_reports_each_missing_field() {
        let cases: [(&[u8], &str); 3] = [
            (br#"{"number":0,"value":1}"#, "type"),
            (br#"{"type":1,"value":1}"#, "number"),
            (br#"{"type":1,"number":0}"#, "value"),
        ];
        for (payload, field) in cases {
            match decode_event(payload) {
                Err(DecodeError::MissingField(name)) => assert_eq!(name, field),
                other => panic!("expected MissingField({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_rejects_null_and_nested_values() {
        let err = decode_event(br#"{"type":null,"number":0,"value":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("type")));

        let err = decode_event(br#"{"type":1,"number":[0],"value":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("number")));
    }

    #[test]
    fn test_coerce_truncates_fractional_numbers() {
        let event = decode_event(br#"{"type":2,"number":1,"value":-12.9}"#).unwrap();
        assert_eq!(event.value, -12);
    }

    #[test]
    fn test_coerce_booleans() {
        let event = decode_event(br#"{"type":1,"number":4,"value":true}"#).unwrap();
        assert_eq!(event.value, 1);
        let event = decode_event(br#"{"type":1,"number":4,"value":false}"#).unwrap();
        assert_eq!(event.value, 0);
    }

    #[test]
    fn test_coerce_numeric_strings() {
        let event = decode_event(br#"{"type":"2","number":" 6 ","value":"-100"}"#).unwrap();
        assert_eq!(event, InboundEvent::new(2, 6, -100));
    }

    #[test]
    fn test_coerce_rejects_non_numeric_strings() {
        let err = decode_event(br#"{"type":"axis","number":0,"value":0}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("type")));
    }

    #[test]
    fn test_null_value_is_rejected_not_read_as_zero() {
        let err = decode_event(br#"{"type":1,"number":0,"value":null}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("value")));
    }

    #[test]
    fn test_coerce_rejects_partially_numeric_strings() {
        let err = decode_event(br#"{"type":1,"number":"12abc","value":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("number")));

        let err = decode_event(br#"{"type":1,"number":0,"value":{}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnInteger("value")));
    }

    #[test]
    fn test_coerce_saturates_out_of_range_integers() {
        let payload = br#"{"type":2,"number":-9999999999,"value":18446744073709551615}"#;
        let event = decode_event(payload).unwrap();
        assert_eq!(event.index, i32::MIN);
        assert_eq!(event.value, i32::MAX);
    }

    #[test]
    fn test_encode_produces_decodable_payload() {
        let event = InboundEvent::new(1, 10, 0);
        assert_eq!(decode_event(&encode_event(&event)).unwrap(), event);
    }

    #[test]
    fn test_decode_error_display_names_the_field() {
        assert_eq!(
            DecodeError::MissingField("number").to_string(),
            "missing key `number`"
        );
    }
}
