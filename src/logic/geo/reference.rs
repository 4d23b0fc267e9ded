//! Reference Data - Fault Geometry & Monitored Regions
//!
//! Immutable lookup tables for the Anatolian fault systems and the regions
//! the warning sweep covers. Loaded once behind `Lazy`; never mutated at
//! runtime.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FAULT GEOMETRY
// ============================================================================

/// Known fault polylines as (lat, lon) vertex chains.
pub static FAULT_LINES: Lazy<Vec<FaultLine>> = Lazy::new(|| {
    vec![
        FaultLine {
            name: "North Anatolian Fault",
            vertices: vec![
                (40.0, 26.0), (40.2, 27.0), (40.5, 28.0), (40.7, 29.0),
                (40.9, 30.0), (41.0, 31.0), (41.2, 32.0), (41.4, 33.0),
                (41.6, 34.0), (41.8, 35.0), (42.0, 36.0), (42.2, 37.0),
            ],
        },
        FaultLine {
            name: "East Anatolian Fault",
            vertices: vec![
                (37.0, 38.0), (37.5, 39.0), (38.0, 40.0), (38.5, 41.0),
                (39.0, 42.0), (39.5, 43.0), (40.0, 44.0),
            ],
        },
        FaultLine {
            name: "Aegean Graben System",
            vertices: vec![(38.0, 26.0), (38.5, 27.0), (39.0, 28.0), (39.5, 29.0)],
        },
        FaultLine {
            name: "West Anatolian Fault Zone",
            vertices: vec![(38.5, 27.0), (39.0, 28.5), (39.5, 30.0), (40.0, 31.5)],
        },
    ]
});

#[derive(Debug, Clone)]
pub struct FaultLine {
    pub name: &'static str,
    pub vertices: Vec<(f64, f64)>,
}

// ============================================================================
// REGIONS
// ============================================================================

/// Building stock fragility mix of a region. Fractions sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FragilityMix {
    pub reinforced: f64,
    pub normal: f64,
    pub weak: f64,
}

/// A monitored region: population center with its fragility profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub fragility: FragilityMix,
}

impl Region {
    fn new(id: &str, name: &str, lat: f64, lon: f64, reinforced: f64, normal: f64, weak: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lon,
            fragility: FragilityMix { reinforced, normal, weak },
        }
    }
}

/// Monitored region table (major population centers).
pub static REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    vec![
        Region::new("istanbul", "Istanbul", 41.0082, 28.9784, 0.35, 0.50, 0.15),
        Region::new("ankara", "Ankara", 39.9334, 32.8597, 0.40, 0.45, 0.15),
        Region::new("izmir", "Izmir", 38.4237, 27.1428, 0.30, 0.55, 0.15),
        Region::new("bursa", "Bursa", 40.1826, 29.0665, 0.25, 0.60, 0.15),
        Region::new("antalya", "Antalya", 36.8969, 30.7133, 0.30, 0.55, 0.15),
        Region::new("adana", "Adana", 36.9914, 35.3308, 0.20, 0.60, 0.20),
        Region::new("konya", "Konya", 37.8746, 32.4932, 0.25, 0.60, 0.15),
        Region::new("gaziantep", "Gaziantep", 37.0662, 37.3833, 0.20, 0.55, 0.25),
        Region::new("sanliurfa", "Sanliurfa", 37.1674, 38.7955, 0.15, 0.50, 0.35),
        Region::new("kocaeli", "Kocaeli", 40.8533, 29.8815, 0.30, 0.55, 0.15),
        Region::new("kayseri", "Kayseri", 38.7312, 35.4787, 0.25, 0.60, 0.15),
        Region::new("eskisehir", "Eskisehir", 39.7767, 30.5206, 0.30, 0.55, 0.15),
        Region::new("diyarbakir", "Diyarbakir", 37.9144, 40.2306, 0.15, 0.50, 0.35),
        Region::new("samsun", "Samsun", 41.2867, 36.3300, 0.25, 0.60, 0.15),
        Region::new("denizli", "Denizli", 37.7765, 29.0864, 0.25, 0.60, 0.15),
        Region::new("kahramanmaras", "Kahramanmaras", 37.5858, 36.9371, 0.15, 0.50, 0.35),
        Region::new("malatya", "Malatya", 38.3552, 38.3095, 0.20, 0.55, 0.25),
        Region::new("van", "Van", 38.4891, 43.4089, 0.15, 0.50, 0.35),
        Region::new("erzurum", "Erzurum", 39.9043, 41.2679, 0.20, 0.55, 0.25),
        Region::new("elazig", "Elazig", 38.6748, 39.2225, 0.20, 0.55, 0.25),
        Region::new("hatay", "Hatay", 36.4018, 36.3498, 0.20, 0.55, 0.25),
        Region::new("sakarya", "Sakarya", 40.7569, 30.3781, 0.30, 0.55, 0.15),
        Region::new("duzce", "Duzce", 40.8439, 31.1565, 0.25, 0.60, 0.15),
        Region::new("canakkale", "Canakkale", 40.1553, 26.4142, 0.30, 0.55, 0.15),
    ]
});

// ============================================================================
// TESTS
// ============================================================================
