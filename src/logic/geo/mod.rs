//! Geo Module - Geodesy & Reference Data
//!
//! - `distance` - Haversine distance and proximity lookups
//! - `reference` - Static fault geometry and monitored region table

pub mod distance;
pub mod reference;

pub use distance::{haversine_km, nearest_fault_distance_km, nearest_region, nearest_region_of};
pub use reference::{FragilityMix, Region, FAULT_LINES, REGIONS};
