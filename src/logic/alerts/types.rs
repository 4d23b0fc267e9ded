//! Alert Types

use serde::{Deserialize, Serialize};

/// Escalation level of a region's early warning. Ordered; `Medium` and
/// above are notifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    Normal,
    Low,
    Medium,
    High,
    Critical,
}

impl Default for AlertLevel {
    fn default() -> Self {
        AlertLevel::Normal
    }
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }

    pub fn is_notifiable(&self) -> bool {
        *self >= AlertLevel::Medium
    }
}

/// Outcome of feeding one evaluation into the state machine.
#[derive(Debug, Clone)]
pub struct Emission {
    pub region_id: String,
    pub level: AlertLevel,
    pub previous_level: AlertLevel,
    /// Level changed since the last evaluation.
    pub transitioned: bool,
    /// Notifiable level outside its (region, level) cooldown window.
    pub should_notify: bool,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(AlertLevel::Critical > AlertLevel::High);
        assert!(AlertLevel::High > AlertLevel::Medium);
        assert!(AlertLevel::Normal < AlertLevel::Low);
    }

    #[test]
    fn test_notifiable_floor() {
        assert!(!AlertLevel::Normal.is_notifiable());
        assert!(!AlertLevel::Low.is_notifiable());
        assert!(AlertLevel::Medium.is_notifiable());
        assert!(AlertLevel::Critical.is_notifiable());
    }
}
