//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! None of these settings change how events are translated; they only decide
//! which messages arrive and how much is logged.

use std::time::Duration;

/// Default MQTT broker host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default MQTT broker port.
pub const DEFAULT_PORT: u16 = 1883;
/// Default topic carrying joystick events.
pub const DEFAULT_TOPIC: &str = "/joystick";
/// Default name of the virtual device, as shown by `evtest` and game settings.
pub const DEFAULT_DEVICE_NAME: &str = "joybridge virtual joystick";
/// Default MQTT keep-alive interval in seconds.
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;

/// All runtime configuration for the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Hostname or IP address of the MQTT broker.
    pub host: String,
    /// TCP port of the MQTT broker.
    pub port: u16,
    /// Topic to subscribe to.
    pub topic: String,
    /// Name given to the virtual device.
    pub device_name: String,
    /// MQTT keep-alive interval.
    pub keep_alive: Duration,
    /// Echo every received payload to the log.
    pub debug: bool,
}

impl Default for BridgeConfig {
    /// | Field        | Default                        |
    /// |--------------|--------------------------------|
    /// | host         | `localhost`                    |
    /// | port         | `1883`                         |
    /// | topic        | `/joystick`                    |
    /// | device_name  | `joybridge virtual joystick`   |
    /// | keep_alive   | 60 seconds                     |
    /// | debug        | `false`                        |
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            debug: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
