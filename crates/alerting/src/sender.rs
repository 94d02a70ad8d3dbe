//! Local Alert Senders

use crate::{AlertError, AlertSender};
use std::sync::Mutex;
use tracing::{info, warn};

/// Writes each alert as a warning on the `alerts` log target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertSender;

impl LogAlertSender {
    pub fn new() -> Self {
        info!("Alerts will be written to the log");
        Self
    }
}

impl AlertSender for LogAlertSender {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        warn!(target: "alerts", "{}", message);
        Ok(())
    }
}

/// Discards every alert
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAlertSender;

impl AlertSender for NoopAlertSender {
    fn send(&self, _message: &str) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Keeps every alert in memory, in send order
#[derive(Debug, Default)]
pub struct RecordingAlertSender {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlertSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Number of messages received
    pub fn count(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Forget recorded messages
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl AlertSender for RecordingAlertSender {
    fn send(&self, message: &str) -> Result<(), AlertError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| AlertError::Publish(format!("Lock error: {}", e)))?;
        messages.push(message.to_string());
        Ok(())
    }
}
