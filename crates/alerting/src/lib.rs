//! Alert Delivery
//!
//! A single-method `AlertSender` trait with several transports:
//! - `LogAlertSender` writes alerts to the tracing log
//! - `RecordingAlertSender` keeps alerts in memory for inspection
//! - `NoopAlertSender` discards alerts
//! - `MqttAlertSender` publishes alerts to an MQTT broker

mod mqtt;
mod sender;

pub use mqtt::{AlertEnvelope, MqttAlertConfig, MqttAlertSender};
pub use sender::{LogAlertSender, NoopAlertSender, RecordingAlertSender};

use std::sync::Arc;
use thiserror::Error;

/// Alert delivery errors
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Delivers alert messages
pub trait AlertSender: Send + Sync {
    /// Attempt delivery of `message`
    fn send(&self, message: &str) -> Result<(), AlertError>;
}

impl<T: AlertSender + ?Sized> AlertSender for Arc<T> {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        (**self).send(message)
    }
}
