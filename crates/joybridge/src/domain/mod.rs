//! Domain layer for joybridge.
//!
//! Pure configuration types with no dependency on I/O, the MQTT client, or
//! the device node.  The binary populates them from CLI arguments and
//! environment variables.

pub mod config;

pub use config::BridgeConfig;
