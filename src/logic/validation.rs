//! Input Validation - Coordinates & Phone Numbers

/// Rejected input at a service boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError {
            field: "lat",
            message: format!("{} outside [-90, 90]", lat),
        });
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError {
            field: "lon",
            message: format!("{} outside [-180, 180]", lon),
        });
    }
    Ok(())
}

/// Phone numbers travel in international format.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !phone.starts_with('+') || phone.len() < 8 {
        return Err(ValidationError {
            field: "phone",
            message: "must start with '+' and carry a country code".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(validate_coordinates(41.0, 29.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert!(validate_coordinates(91.0, 29.0).is_err());
        assert!(validate_coordinates(41.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_phone_format() {
        assert!(validate_phone("+905551234567").is_ok());
        assert!(validate_phone("05551234567").is_err());
        assert!(validate_phone("+90").is_err());
    }
}
