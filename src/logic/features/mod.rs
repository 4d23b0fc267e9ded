//! Features Module - Windowed Seismic Feature Extraction
//!
//! - `layout` - Versioned feature schema (single source of truth)
//! - `vector` - Versioned feature vector with layout validation
//! - `extract` - Pure extraction from event lists

pub mod extract;
pub mod layout;
pub mod vector;

pub use extract::{extract, ExtractionParams};
pub use layout::{layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::FeatureVector;
