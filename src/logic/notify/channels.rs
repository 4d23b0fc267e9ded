//! Notification Channels - WhatsApp Session Service & SMS Gateway
//!
//! Channels send synchronously over HTTP through an agent with a bounded
//! timeout. The WhatsApp path goes through a local session service that
//! answers 503 while no authenticated session exists; that maps to
//! `SessionRequired` so the dispatcher moves straight to the SMS fallback.

use std::time::Duration;

use super::types::{ChannelError, Subscriber};

/// Capability seam for outbound alert delivery.
pub trait NotifyChannel: Send + Sync {
    fn name(&self) -> &'static str;
    fn send(&self, recipient: &Subscriber, text: &str) -> Result<(), ChannelError>;
}

fn agent_with_timeout(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

fn map_send_error(err: ureq::Error) -> ChannelError {
    match err {
        ureq::Error::Status(status, response) => ChannelError::Rejected {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(t) => ChannelError::Network { message: t.to_string() },
    }
}

// ============================================================================
// WHATSAPP (session service)
// ============================================================================

pub struct WhatsAppChannel {
    agent: ureq::Agent,
    service_url: String,
}

impl WhatsAppChannel {
    pub fn new(service_url: &str, timeout_secs: u64) -> Self {
        Self {
            agent: agent_with_timeout(timeout_secs),
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    /// The session service answers 503 while no authenticated session
    /// exists; everything else maps like any other channel error.
    fn classify(err: ureq::Error) -> ChannelError {
        match err {
            ureq::Error::Status(503, _) => ChannelError::SessionRequired,
            other => map_send_error(other),
        }
    }
}

impl NotifyChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    fn send(&self, recipient: &Subscriber, text: &str) -> Result<(), ChannelError> {
        let payload = serde_json::json!({
            "number": recipient.phone,
            "message": text,
        });

        self.agent
            .post(&format!("{}/send", self.service_url))
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string())
            .map_err(Self::classify)?;

        log::debug!("WhatsApp alert sent to subscriber {}", recipient.id);
        Ok(())
    }
}

// ============================================================================
// SMS GATEWAY
// ============================================================================

pub struct SmsChannel {
    agent: ureq::Agent,
    api_url: String,
    auth_token: String,
    from_number: String,
}

impl SmsChannel {
    pub fn new(api_url: &str, auth_token: &str, from_number: &str, timeout_secs: u64) -> Self {
        Self {
            agent: agent_with_timeout(timeout_secs),
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

impl NotifyChannel for SmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn send(&self, recipient: &Subscriber, text: &str) -> Result<(), ChannelError> {
        if !self.is_configured() {
            return Err(ChannelError::NotConfigured);
        }

        let payload = serde_json::json!({
            "to": recipient.phone,
            "from": self.from_number,
            "body": text,
        });

        self.agent
            .post(&format!("{}/messages", self.api_url))
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.auth_token))
            .send_string(&payload.to_string())
            .map_err(map_send_error)?;

        log::debug!("SMS alert sent to subscriber {}", recipient.id);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn subscriber() -> Subscriber {
        Subscriber::register("+905551234567", 41.0, 29.0).unwrap()
    }

    #[test]
    fn test_unconfigured_sms_refuses_without_network() {
        let channel = SmsChannel::new("https://sms.example", "", "", 10);
        let err = channel.send(&subscriber(), "test").unwrap_err();
        assert!(matches!(err, ChannelError::NotConfigured));
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(WhatsAppChannel::new("http://localhost:3001", 10).name(), "whatsapp");
        assert_eq!(SmsChannel::new("https://sms.example", "t", "+1", 10).name(), "sms");
    }

    #[test]
    fn test_whatsapp_503_means_session_required() {
        let no_session = ureq::Error::Status(
            503,
            ureq::Response::new(503, "Service Unavailable", "").unwrap(),
        );
        assert!(matches!(WhatsAppChannel::classify(no_session), ChannelError::SessionRequired));

        let server_error = ureq::Error::Status(
            500,
            ureq::Response::new(500, "Internal Server Error", "boom").unwrap(),
        );
        assert!(matches!(
            WhatsAppChannel::classify(server_error),
            ChannelError::Rejected { status: 500, .. }
        ));
    }

    #[test]
    fn test_generic_status_maps_to_rejected() {
        let throttled = ureq::Error::Status(
            429,
            ureq::Response::new(429, "Too Many Requests", "slow down").unwrap(),
        );
        assert!(matches!(
            map_send_error(throttled),
            ChannelError::Rejected { status: 429, ref message } if message.as_str() == "slow down"
        ));
    }
}
