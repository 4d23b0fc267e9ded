//! Notification Dispatcher - Ordered Channel Fallback
//!
//! Tries channels in configuration order until one delivers. A channel
//! answering `SessionRequired` or `NotConfigured` is skipped without retry.
//! The dispatcher performs no deduplication; the alert state machine owns
//! cooldown decisions before anything reaches this point.

use parking_lot::Mutex;
use serde::Serialize;

use super::channels::NotifyChannel;
use super::types::{ChannelError, DeliveryAttempt, DeliveryOutcome, Subscriber};

const MAX_DELIVERY_HISTORY: usize = 500;

pub struct NotificationDispatcher {
    channels: Vec<Box<dyn NotifyChannel>>,
    history: Mutex<Vec<DeliveryAttempt>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchStats {
    pub total: usize,
    pub delivered: usize,
    pub failed: usize,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn NotifyChannel>>) -> Self {
        Self {
            channels,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatch(&self, recipient: &Subscriber, text: &str) -> DeliveryAttempt {
        let mut last_error = "no channels configured".to_string();

        for channel in &self.channels {
            match channel.send(recipient, text) {
                Ok(()) => {
                    let attempt = DeliveryAttempt::new(
                        &recipient.id,
                        DeliveryOutcome::Sent { channel: channel.name().to_string() },
                    );
                    self.record(attempt.clone());
                    return attempt;
                }
                Err(e @ (ChannelError::SessionRequired | ChannelError::NotConfigured)) => {
                    log::debug!("Channel {} unavailable ({}), trying next", channel.name(), e);
                    last_error = e.to_string();
                }
                Err(e) => {
                    log::warn!("Channel {} send failed: {}", channel.name(), e);
                    last_error = e.to_string();
                }
            }
        }

        let attempt =
            DeliveryAttempt::new(&recipient.id, DeliveryOutcome::Failed { last_error });
        self.record(attempt.clone());
        attempt
    }

    fn record(&self, attempt: DeliveryAttempt) {
        let mut history = self.history.lock();
        history.push(attempt);
        let len = history.len();
        if len > MAX_DELIVERY_HISTORY {
            history.drain(0..len - MAX_DELIVERY_HISTORY);
        }
    }

    pub fn stats(&self) -> DispatchStats {
        let history = self.history.lock();
        let delivered = history.iter().filter(|a| a.delivered()).count();
        DispatchStats {
            total: history.len(),
            delivered,
            failed: history.len() - delivered,
        }
    }

    pub fn recent_attempts(&self, limit: usize) -> Vec<DeliveryAttempt> {
        let history = self.history.lock();
        history.iter().rev().take(limit).cloned().collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
