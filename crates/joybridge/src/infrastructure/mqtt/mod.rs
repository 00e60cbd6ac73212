//! MQTT message source.
//!
//! Architecture:
//! - `MqttMessageSource` owns the `rumqttc` client and its event loop.
//! - [`MqttMessageSource::run`] polls the event loop and hands each publish
//!   to [`handle_payload`] before polling again, so messages are translated
//!   one at a time, in arrival order, with no queue in between.
//! - The subscription is (re)issued on every `ConnAck`, so a broker-side
//!   session loss after a reconnect does not silently stop delivery.
//!
//! # Failure handling
//!
//! | When                               | What happens                     |
//! |------------------------------------|----------------------------------|
//! | broker unreachable before first ConnAck | [`SourceError::Connect`], fatal |
//! | subscription rejected by broker    | [`SourceError::SubscribeRejected`], fatal |
//! | connection lost after ConnAck      | logged, retried after `retry_interval` |
//! | device write failed                | [`SourceError::Device`], fatal   |

use std::convert::Infallible;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS, SubscribeReasonCode};
use thiserror::Error;
use tokio::time;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::handle_message::handle_payload;
use crate::application::translate_event::{DeviceSink, SinkError, TranslateEventUseCase};
use crate::domain::BridgeConfig;

/// Capacity of the client → event loop request channel.  Only subscribe
/// requests travel on it.
const REQUEST_CHANNEL_CAPACITY: usize = 10;

/// Errors that end the message source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The first connection to the broker failed.
    #[error("failed to connect to MQTT broker at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: rumqttc::ConnectionError,
    },

    /// The subscribe request could not be queued.
    #[error("failed to subscribe to `{topic}`: {source}")]
    Subscribe {
        topic: String,
        #[source]
        source: rumqttc::ClientError,
    },

    /// The broker refused the subscription.
    #[error("broker rejected subscription to `{topic}`")]
    SubscribeRejected { topic: String },

    /// The virtual device failed; translation cannot continue.
    #[error(transparent)]
    Device(#[from] SinkError),
}

/// Configuration for the MQTT connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttSourceConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    /// Client identifier presented to the broker.
    pub client_id: String,
    pub keep_alive: Duration,
    /// Delay before polling again after a lost connection.
    pub retry_interval: Duration,
}

impl MqttSourceConfig {
    /// Builds the connection settings from the bridge configuration with a
    /// fresh random client identifier.
    pub fn from_bridge_config(config: &BridgeConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            topic: config.topic.clone(),
            client_id: format!("joybridge-{}", Uuid::new_v4().simple()),
            keep_alive: config.keep_alive,
            retry_interval: Duration::from_secs(1),
        }
    }

    /// `host:port`, for log and error messages.
    pub fn broker_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Subscribes to the event topic and drives the per-message use case.
pub struct MqttMessageSource {
    config: MqttSourceConfig,
    client: AsyncClient,
    eventloop: EventLoop,
}

impl MqttMessageSource {
    /// Creates the client.  No network traffic happens until [`run`](Self::run).
    pub fn new(config: MqttSourceConfig) -> Self {
        let mut options = MqttOptions::new(config.client_id.clone(), config.host.clone(), config.port);
        options.set_keep_alive(config.keep_alive);
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);
        Self {
            config,
            client,
            eventloop,
        }
    }

    /// Receives and dispatches messages until a fatal error occurs.
    ///
    /// This never returns `Ok`: the steady state is "await next message".
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the broker cannot be reached at startup,
    /// rejects the subscription, or if the device fails.
    pub async fn run<S: DeviceSink>(
        mut self,
        use_case: &mut TranslateEventUseCase<S>,
        verbose: bool,
    ) -> Result<Infallible, SourceError> {
        let mut connected_once = false;

        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("connected to MQTT broker at {}", self.config.broker_addr());
                    connected_once = true;
                    self.subscribe()?;
                }
                Ok(Event::Incoming(Packet::SubAck(ack))) => {
                    if ack
                        .return_codes
                        .iter()
                        .any(|code| matches!(code, SubscribeReasonCode::Failure))
                    {
                        return Err(SourceError::SubscribeRejected {
                            topic: self.config.topic.clone(),
                        });
                    }
                    info!("subscribed to `{}`", self.config.topic);
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    debug!(topic = %publish.topic, bytes = publish.payload.len(), "message received");
                    handle_payload(use_case, &publish.payload, verbose)?;
                }
                Ok(_) => {}
                Err(source) if !connected_once => {
                    return Err(SourceError::Connect {
                        addr: self.config.broker_addr(),
                        source,
                    });
                }
                Err(e) => {
                    warn!(
                        "MQTT connection error: {e}; retrying in {:?}",
                        self.config.retry_interval
                    );
                    time::sleep(self.config.retry_interval).await;
                }
            }
        }
    }

    fn subscribe(&self) -> Result<(), SourceError> {
        // QoS 2: every event is delivered exactly once, so a button press is
        // never replayed twice nor lost.
        self.client
            .try_subscribe(self.config.topic.clone(), QoS::ExactlyOnce)
            .map_err(|source| SourceError::Subscribe {
                topic: self.config.topic.clone(),
                source,
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
