//! Message types and the JSON payload codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_event, encode_event, DecodeError};
pub use messages::{DeviceEventWrite, EventFamily, InboundEvent};
