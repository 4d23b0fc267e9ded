//! Notify Types - Subscribers, Channel Errors & Delivery Records

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::validation::{validate_coordinates, validate_phone, ValidationError};

// ============================================================================
// SUBSCRIBER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    /// International format, leading '+'.
    pub phone: String,
    pub lat: f64,
    pub lon: f64,
    pub registered_at: i64,
}

impl Subscriber {
    /// Validated constructor; the only way subscriber data enters the
    /// system from outside.
    pub fn register(phone: &str, lat: f64, lon: f64) -> Result<Self, ValidationError> {
        validate_phone(phone)?;
        validate_coordinates(lat, lon)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            phone: phone.to_string(),
            lat,
            lon,
            registered_at: Utc::now().timestamp(),
        })
    }
}

// ============================================================================
// CHANNEL ERRORS
// ============================================================================

#[derive(Debug, Clone)]
pub enum ChannelError {
    /// The channel has no authenticated session; skip to the next channel
    /// without retrying.
    SessionRequired,
    NotConfigured,
    Network { message: String },
    Rejected { status: u16, message: String },
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelError::SessionRequired => write!(f, "channel session not established"),
            ChannelError::NotConfigured => write!(f, "channel not configured"),
            ChannelError::Network { message } => write!(f, "channel network error: {}", message),
            ChannelError::Rejected { status, message } => {
                write!(f, "channel rejected send (HTTP {}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ChannelError {}

// ============================================================================
// DELIVERY RECORDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// Delivered through the named channel.
    Sent { channel: String },
    /// Every channel failed; carries the last error text.
    Failed { last_error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    pub id: String,
    pub subscriber_id: String,
    pub outcome: DeliveryOutcome,
    pub attempted_at: i64,
}

impl DeliveryAttempt {
    pub fn new(subscriber_id: &str, outcome: DeliveryOutcome) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subscriber_id: subscriber_id.to_string(),
            outcome,
            attempted_at: Utc::now().timestamp(),
        }
    }

    pub fn delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Sent { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_valid_subscriber() {
        let sub = Subscriber::register("+905551234567", 41.0, 29.0).unwrap();
        assert!(!sub.id.is_empty());
        assert!(sub.registered_at > 0);
    }

    #[test]
    fn test_register_rejects_bad_phone() {
        assert!(Subscriber::register("05551234567", 41.0, 29.0).is_err());
    }

    #[test]
    fn test_register_rejects_bad_coordinates() {
        assert!(Subscriber::register("+905551234567", 95.0, 29.0).is_err());
        assert!(Subscriber::register("+905551234567", 41.0, 200.0).is_err());
    }

    #[test]
    fn test_delivery_outcome() {
        let sent = DeliveryAttempt::new("s1", DeliveryOutcome::Sent { channel: "sms".into() });
        assert!(sent.delivered());

        let failed =
            DeliveryAttempt::new("s1", DeliveryOutcome::Failed { last_error: "down".into() });
        assert!(!failed.delivered());
    }
}
