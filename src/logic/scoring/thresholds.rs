//! Scoring Thresholds - Level Ladder & Heuristic Factor Weights

// ============================================================================
// LEVEL LADDER DEFAULTS
// ============================================================================

pub const DEFAULT_LOW_MAX: f64 = 1.5;
pub const DEFAULT_LOW_MEDIUM_MAX: f64 = 2.5;
pub const DEFAULT_MEDIUM_MAX: f64 = 4.0;
pub const DEFAULT_MEDIUM_HIGH_MAX: f64 = 6.0;
pub const DEFAULT_HIGH_MAX: f64 = 7.5;

/// Upper bounds of each risk band over the 0..10 score.
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub low_max: f64,
    pub low_medium_max: f64,
    pub medium_max: f64,
    pub medium_high_max: f64,
    pub high_max: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: DEFAULT_LOW_MAX,
            low_medium_max: DEFAULT_LOW_MEDIUM_MAX,
            medium_max: DEFAULT_MEDIUM_MAX,
            medium_high_max: DEFAULT_MEDIUM_HIGH_MAX,
            high_max: DEFAULT_HIGH_MAX,
        }
    }
}

// ============================================================================
// HEURISTIC FACTOR CONSTANTS
// ============================================================================

/// Fault-proximity baseline when the window holds no events:
/// (max distance km, base score) pairs checked in order.
pub const BASELINE_LADDER: &[(f64, f64)] = &[(20.0, 3.5), (50.0, 2.5), (100.0, 1.5)];
pub const BASELINE_FLOOR: f64 = 1.0;

/// Magnitude factor: (min magnitude, contribution) checked in order.
pub const MAGNITUDE_LADDER: &[(f64, f64)] = &[(6.0, 3.5), (5.0, 2.5), (4.5, 1.8), (4.0, 1.2)];
pub const MAGNITUDE_PER_UNIT: f64 = 0.3;

/// Event-count factor: (min count, contribution).
pub const COUNT_LADDER: &[(f64, f64)] = &[(50.0, 2.5), (20.0, 2.0), (10.0, 1.5), (5.0, 1.0)];
pub const COUNT_PER_EVENT: f64 = 0.15;

/// Proximity factor over min event distance: (max km, contribution).
pub const DISTANCE_LADDER: &[(f64, f64)] = &[(10.0, 2.0), (25.0, 1.5), (50.0, 1.0), (100.0, 0.5)];
pub const MEAN_DISTANCE_NEAR_KM: f64 = 150.0;
pub const MEAN_DISTANCE_NEAR_BONUS: f64 = 0.3;

/// Fault-proximity factor: (max km, contribution).
pub const FAULT_LADDER: &[(f64, f64)] = &[(10.0, 1.5), (25.0, 1.2), (50.0, 0.8), (100.0, 0.4)];

/// Shallow-depth factor: (max mean depth km, contribution).
pub const DEPTH_LADDER: &[(f64, f64)] = &[(5.0, 0.5), (10.0, 0.3)];

/// Large-event factor over the M >= 4.0 count: (min count, contribution).
pub const LARGE_EVENT_LADDER: &[(f64, f64)] = &[(3.0, 0.5), (1.0, 0.3)];

/// First ladder entry the value qualifies for, ladders ordered most severe
/// first. `below` picks by "value < bound", `above` by "value >= bound".
pub fn ladder_below(value: f64, ladder: &[(f64, f64)]) -> Option<f64> {
    ladder.iter().find(|(bound, _)| value < *bound).map(|(_, c)| *c)
}

pub fn ladder_above(value: f64, ladder: &[(f64, f64)]) -> Option<f64> {
    ladder.iter().find(|(bound, _)| value >= *bound).map(|(_, c)| *c)
}

// ============================================================================
// TESTS
// ============================================================================
