//! Alert State Machine - Per-Region Levels With Notification Cooldown
//!
//! Tracks the current level of each region and when each (region, level)
//! pair last notified. A notifiable level emits again only after the
//! cooldown window; a different level is keyed independently, so an
//! escalation is never held back by a lower level's cooldown.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::types::{AlertLevel, Emission};

#[derive(Debug, Default)]
struct RegionState {
    current_level: AlertLevel,
    last_transition_at: i64,
    last_notified_at: HashMap<AlertLevel, i64>,
}

pub struct AlertStateMachine {
    cooldown_secs: i64,
    regions: RwLock<HashMap<String, RegionState>>,
}

impl AlertStateMachine {
    pub fn new(cooldown_secs: i64) -> Self {
        Self {
            cooldown_secs,
            regions: RwLock::new(HashMap::new()),
        }
    }

    /// Record a region's evaluated level. When the emission says notify,
    /// the (region, level) cooldown is stamped immediately.
    pub fn apply(&self, region_id: &str, level: AlertLevel, now: i64) -> Emission {
        let mut regions = self.regions.write();
        let state = regions.entry(region_id.to_string()).or_default();

        let previous_level = state.current_level;
        let transitioned = level != previous_level;
        if transitioned {
            log::info!(
                "Region {} alert level {} -> {}",
                region_id,
                previous_level.as_str(),
                level.as_str()
            );
            state.current_level = level;
            state.last_transition_at = now;
        }

        let should_notify = level.is_notifiable()
            && match state.last_notified_at.get(&level) {
                Some(last) => now - last > self.cooldown_secs,
                None => true,
            };

        if should_notify {
            state.last_notified_at.insert(level, now);
        }

        Emission {
            region_id: region_id.to_string(),
            level,
            previous_level,
            transitioned,
            should_notify,
        }
    }

    pub fn current_level(&self, region_id: &str) -> AlertLevel {
        self.regions
            .read()
            .get(region_id)
            .map(|s| s.current_level)
            .unwrap_or(AlertLevel::Normal)
    }
}

// ============================================================================
// TESTS
// ============================================================================
