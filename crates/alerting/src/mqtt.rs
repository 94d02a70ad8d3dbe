//! MQTT Alert Publishing

use crate::{AlertError, AlertSender};
use chrono::{DateTime, Utc};
use rumqttc::{AsyncClient, Event, MqttOptions, QoS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

/// MQTT alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttAlertConfig {
    /// MQTT broker host
    pub broker_url: String,
    /// MQTT port
    pub broker_port: u16,
    /// Client identifier, also reported as the alert source
    pub client_id: String,
    /// Topic alerts are published to
    pub topic: String,
}

impl Default for MqttAlertConfig {
    fn default() -> Self {
        Self {
            broker_url: "localhost".to_string(),
            broker_port: 1883,
            client_id: "vitals-monitor".to_string(),
            topic: "vitals/alerts".to_string(),
        }
    }
}

/// Alert payload published to the broker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEnvelope {
    pub id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub source: String,
    pub message: String,
}

impl AlertEnvelope {
    pub fn new(source: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sent_at: Utc::now(),
            source: source.to_string(),
            message: message.to_string(),
        }
    }
}

/// Publishes alerts as JSON envelopes to an MQTT topic
pub struct MqttAlertSender {
    config: MqttAlertConfig,
    client: AsyncClient,
}

impl MqttAlertSender {
    /// Create the client and spawn its event loop on the current Tokio runtime
    pub fn connect(config: MqttAlertConfig) -> Result<Self, AlertError> {
        if config.topic.is_empty() || config.topic.contains(['+', '#']) {
            return Err(AlertError::Connection(format!(
                "Invalid alert topic: {:?}",
                config.topic
            )));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AlertError::Connection(e.to_string()))?;

        let mut options =
            MqttOptions::new(&config.client_id, &config.broker_url, config.broker_port);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        runtime.spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(incoming)) => {
                        debug!("MQTT incoming: {:?}", incoming);
                    }
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    _ => {}
                }
            }
        });

        info!(
            "Publishing alerts to MQTT broker {}:{} on topic {}",
            config.broker_url, config.broker_port, config.topic
        );
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MqttAlertConfig {
        &self.config
    }
}

impl AlertSender for MqttAlertSender {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        let envelope = AlertEnvelope::new(&self.config.client_id, message);
        let payload =
            serde_json::to_vec(&envelope).map_err(|e| AlertError::Serialization(e.to_string()))?;

        self.client
            .try_publish(self.config.topic.as_str(), QoS::AtLeastOnce, false, payload)
            .map_err(|e| AlertError::Publish(e.to_string()))?;

        debug!("Queued alert {} on {}", envelope.id, self.config.topic);
        Ok(())
    }
}
