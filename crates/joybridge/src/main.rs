//! joybridge entry point.
//!
//! Creates the virtual joystick, connects to the MQTT broker, and replays
//! every event published on the topic until the process is killed or the
//! device fails.
//!
//! # Usage
//!
//! ```text
//! joybridge [OPTIONS]
//!
//! Options:
//!   -o, --host <HOST>          MQTT broker address [default: localhost]
//!   -p, --port <PORT>          MQTT broker port [default: 1883]
//!   -t, --topic <TOPIC>        MQTT topic [default: /joystick]
//!   -d, --debug                Echo every received payload to the log
//!   -n, --device-name <NAME>   Virtual device name [default: joybridge virtual joystick]
//!       --keep-alive <SECS>    MQTT keep-alive interval [default: 60]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                | Default                       |
//! |-------------------------|-------------------------------|
//! | `JOYBRIDGE_HOST`        | `localhost`                   |
//! | `JOYBRIDGE_PORT`        | `1883`                        |
//! | `JOYBRIDGE_TOPIC`       | `/joystick`                   |
//! | `JOYBRIDGE_DEBUG`       | `false`                       |
//! | `JOYBRIDGE_DEVICE_NAME` | `joybridge virtual joystick`  |
//! | `JOYBRIDGE_KEEP_ALIVE`  | `60`                          |
//!
//! # Exit status
//!
//! The bridge has no successful exit.  It stops only on a setup failure, a
//! virtual device failure, or Ctrl+C, and always exits with status 1.
//!
//! ```text
//! main()
//!  └─ Cli::parse() → BridgeConfig
//!  └─ UinputJoystick::create()        -- declares Capabilities::XBOX
//!  └─ MqttMessageSource::run()        -- one payload at a time
//!       └─ handle_payload()
//!            └─ TranslateEventUseCase::translate()  -- write + SYN_REPORT
//! ```

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use joybridge::application::translate_event::TranslateEventUseCase;
use joybridge::domain::config::{
    BridgeConfig, DEFAULT_DEVICE_NAME, DEFAULT_HOST, DEFAULT_KEEP_ALIVE_SECS, DEFAULT_PORT,
    DEFAULT_TOPIC,
};
use joybridge::infrastructure::mqtt::{MqttMessageSource, MqttSourceConfig};
use joybridge_core::Capabilities;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Create a virtual joystick controlled by an MQTT topic.
#[derive(Debug, Parser)]
#[command(name = "joybridge", version)]
struct Cli {
    /// MQTT broker address.
    #[arg(short = 'o', long, default_value = DEFAULT_HOST, env = "JOYBRIDGE_HOST")]
    host: String,

    /// MQTT broker port.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "JOYBRIDGE_PORT")]
    port: u16,

    /// MQTT topic carrying joystick events.
    #[arg(short, long, default_value = DEFAULT_TOPIC, env = "JOYBRIDGE_TOPIC")]
    topic: String,

    /// Echo every received payload to the log and lower the default log
    /// level to `debug`.
    #[arg(short, long, env = "JOYBRIDGE_DEBUG")]
    debug: bool,

    /// Name of the virtual device, as shown by `evtest` and game settings.
    #[arg(short = 'n', long, default_value = DEFAULT_DEVICE_NAME, env = "JOYBRIDGE_DEVICE_NAME")]
    device_name: String,

    /// MQTT keep-alive interval in seconds.
    #[arg(
        long,
        default_value_t = DEFAULT_KEEP_ALIVE_SECS,
        value_parser = clap::value_parser!(u64).range(5..),
        env = "JOYBRIDGE_KEEP_ALIVE"
    )]
    keep_alive: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host or topic is empty.
    fn into_bridge_config(self) -> anyhow::Result<BridgeConfig> {
        anyhow::ensure!(!self.host.trim().is_empty(), "broker address must not be empty");
        anyhow::ensure!(!self.topic.is_empty(), "topic must not be empty");

        Ok(BridgeConfig {
            host: self.host,
            port: self.port,
            topic: self.topic,
            device_name: self.device_name,
            keep_alive: Duration::from_secs(self.keep_alive),
            debug: self.debug,
        })
    }
}

// ── Virtual device ────────────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
fn open_device(
    name: &str,
    capabilities: &Capabilities,
) -> anyhow::Result<joybridge::infrastructure::virtual_device::uinput::UinputJoystick> {
    Ok(joybridge::infrastructure::virtual_device::uinput::UinputJoystick::create(
        name,
        capabilities,
    )?)
}

#[cfg(not(target_os = "linux"))]
fn open_device(
    _name: &str,
    _capabilities: &Capabilities,
) -> anyhow::Result<joybridge::infrastructure::virtual_device::mock::RecordingSink> {
    anyhow::bail!("virtual joysticks require Linux uinput")
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// A current-thread runtime is enough: there is exactly one task, and
/// messages are handled strictly one after another.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_bridge_config()?;

    // `RUST_LOG` wins when set; otherwise `--debug` picks the default level.
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(
        "listening for topic `{}` from {}:{}...",
        config.topic, config.host, config.port
    );

    // ── Virtual device ────────────────────────────────────────────────────────
    let capabilities = Capabilities::XBOX;
    let sink = open_device(&config.device_name, &capabilities)
        .context("failed to create the virtual joystick")?;
    let mut use_case = TranslateEventUseCase::new(capabilities, sink);

    // ── Message loop ──────────────────────────────────────────────────────────
    let source = MqttMessageSource::new(MqttSourceConfig::from_bridge_config(&config));

    tokio::select! {
        result = source.run(&mut use_case, config.debug) => match result {
            Ok(never) => match never {},
            Err(e) => Err(anyhow::Error::new(e).context("bridge stopped")),
        },
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            anyhow::bail!("interrupted")
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Arrange / Act
        let cli = Cli::parse_from(["joybridge"]);

        // Assert
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.port, 1883);
        assert_eq!(cli.topic, "/joystick");
        assert!(!cli.debug);
        assert_eq!(cli.keep_alive, 60);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "joybridge", "-o", "10.0.0.5", "-p", "1884", "-t", "pads/1", "-d",
        ]);
        assert_eq!(cli.host, "10.0.0.5");
        assert_eq!(cli.port, 1884);
        assert_eq!(cli.topic, "pads/1");
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_device_name_override() {
        let cli = Cli::parse_from(["joybridge", "--device-name", "couch pad"]);
        assert_eq!(cli.device_name, "couch pad");
    }

    #[test]
    fn test_cli_rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["joybridge", "-p", "18x3"]).is_err());
    }

    #[test]
    fn test_cli_rejects_port_out_of_range() {
        assert!(Cli::try_parse_from(["joybridge", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_cli_rejects_keep_alive_below_five_seconds() {
        assert!(Cli::try_parse_from(["joybridge", "--keep-alive", "2"]).is_err());
    }

    #[test]
    fn test_into_bridge_config_defaults_match_domain_defaults() {
        let config = Cli::parse_from(["joybridge"]).into_bridge_config().unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_into_bridge_config_keep_alive_seconds() {
        let config = Cli::parse_from(["joybridge", "--keep-alive", "30"])
            .into_bridge_config()
            .unwrap();
        assert_eq!(config.keep_alive, Duration::from_secs(30));
    }

    #[test]
    fn test_into_bridge_config_rejects_empty_topic() {
        let cli = Cli::parse_from(["joybridge", "--topic", ""]);
        assert!(cli.into_bridge_config().is_err());
    }

    #[test]
    fn test_into_bridge_config_rejects_blank_host() {
        let cli = Cli {
            host: "  ".to_string(),
            port: 1883,
            topic: "/joystick".to_string(),
            debug: false,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            keep_alive: 60,
        };
        assert!(cli.into_bridge_config().is_err());
    }
}
