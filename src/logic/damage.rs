//! Damage Estimation - Building-Stock Impact Model
//!
//! Turns an event (magnitude, depth, distance to the population center) and
//! the center's building fragility mix into a 0..100 impact score with an
//! affected-building band. Feeds notification bodies only; it is not part
//! of the risk score.

use serde::{Deserialize, Serialize};

use crate::logic::geo::FragilityMix;

const REINFORCED_FACTOR: f64 = 0.6;
const NORMAL_FACTOR: f64 = 1.0;
const WEAK_FACTOR: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageLevel {
    VeryLight,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl DamageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageLevel::VeryLight => "very_light",
            DamageLevel::Light => "light",
            DamageLevel::Moderate => "moderate",
            DamageLevel::Heavy => "heavy",
            DamageLevel::VeryHeavy => "very_heavy",
        }
    }

    /// Expected share of the building stock affected.
    pub fn affected_buildings(&self) -> &'static str {
        match self {
            DamageLevel::VeryLight => "<1%",
            DamageLevel::Light => "1-5%",
            DamageLevel::Moderate => "5-15%",
            DamageLevel::Heavy => "15-30%",
            DamageLevel::VeryHeavy => "30-50%",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageEstimate {
    /// Clamped to [0, 100].
    pub score: f64,
    pub level: DamageLevel,
}

/// Estimate impact at a center `distance_km` from the hypocenter.
pub fn estimate(
    magnitude: f64,
    depth_km: f64,
    distance_km: f64,
    fragility: &FragilityMix,
) -> DamageEstimate {
    let base = magnitude * 2.5;
    let depth_factor = (1.0 - depth_km / 60.0).max(0.4);
    let distance_factor = (1.0 / (1.0 + (1.0 + distance_km / 30.0).ln())).max(0.05);
    let building_factor = fragility.reinforced * REINFORCED_FACTOR
        + fragility.normal * NORMAL_FACTOR
        + fragility.weak * WEAK_FACTOR;

    let raw = base * depth_factor * distance_factor * building_factor * 10.0;
    let score = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };

    let level = if score >= 75.0 {
        DamageLevel::VeryHeavy
    } else if score >= 55.0 {
        DamageLevel::Heavy
    } else if score >= 35.0 {
        DamageLevel::Moderate
    } else if score >= 18.0 {
        DamageLevel::Light
    } else {
        DamageLevel::VeryLight
    };

    DamageEstimate { score, level }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_stock() -> FragilityMix {
        FragilityMix { reinforced: 0.25, normal: 0.60, weak: 0.15 }
    }

    fn weak_stock() -> FragilityMix {
        FragilityMix { reinforced: 0.10, normal: 0.45, weak: 0.45 }
    }

    #[test]
    fn test_large_close_shallow_quake_is_heavy() {
        let e = estimate(7.4, 8.0, 10.0, &weak_stock());
        assert!(e.score >= 75.0, "got {}", e.score);
        assert_eq!(e.level, DamageLevel::VeryHeavy);
    }

    #[test]
    fn test_small_distant_quake_is_very_light() {
        let e = estimate(3.0, 25.0, 180.0, &mixed_stock());
        assert!(e.score < 18.0, "got {}", e.score);
        assert_eq!(e.level, DamageLevel::VeryLight);
    }

    #[test]
    fn test_weak_stock_scores_higher() {
        let mixed = estimate(6.0, 10.0, 40.0, &mixed_stock());
        let weak = estimate(6.0, 10.0, 40.0, &weak_stock());
        assert!(weak.score > mixed.score);
    }

    #[test]
    fn test_depth_attenuates() {
        let shallow = estimate(6.0, 5.0, 40.0, &mixed_stock());
        let deep = estimate(6.0, 50.0, 40.0, &mixed_stock());
        assert!(shallow.score > deep.score);
    }

    #[test]
    fn test_score_clamped() {
        let e = estimate(9.9, 0.0, 0.0, &weak_stock());
        assert!(e.score <= 100.0);
    }
}
