//! Alert Message Formatting

use crate::logic::damage::DamageEstimate;
use crate::logic::evaluator::RegionAssessment;
use crate::logic::feed::SeismicEvent;
use crate::logic::geo::Region;

/// Early-warning body for a region emission.
pub fn format_early_warning(region: &Region, assessment: &RegionAssessment) -> String {
    let mut lines = vec![
        format!("[EARLY WARNING] {} - {}", region.name, assessment.level.as_str().to_uppercase()),
        format!(
            "Seismic activity: {} events in the monitoring window, warning score {:.2}",
            assessment.event_count, assessment.warning_score
        ),
    ];

    if let Some(pm) = assessment.predicted_magnitude {
        lines.push(format!("Predicted magnitude: up to M{:.1}", pm));
    }
    if let Some(horizon) = assessment.time_horizon {
        lines.push(format!("Expected window: {}", horizon));
    }
    if assessment.anomaly.detected {
        lines.push("Anomalous activity pattern detected.".to_string());
    }
    lines.push("Review your emergency plan and stay clear of damaged structures.".to_string());

    lines.join("\n")
}

/// Direct notification for an actual large event near a subscriber.
pub fn format_big_quake(
    event: &SeismicEvent,
    distance_km: f64,
    damage: &DamageEstimate,
) -> String {
    let location = if event.location.is_empty() { "unknown location" } else { &event.location };
    [
        format!("[BIG QUAKE] M{:.1} earthquake at {}", event.magnitude, location),
        format!("Depth {:.0} km, about {:.0} km from your location.", event.depth_km, distance_km),
        format!(
            "Estimated local impact: {} (affected buildings {})",
            damage.level.as_str(),
            damage.level.affected_buildings()
        ),
        format!("Map: https://maps.google.com/?q={:.4},{:.4}", event.lat, event.lon),
    ]
    .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================
