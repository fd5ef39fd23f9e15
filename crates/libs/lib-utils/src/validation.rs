//! # Validation Utilities
//!
//! Input validation helpers for listing and profile forms.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate maximum length in characters.
pub fn validate_max_length(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must be at most {} characters", field_name, max))
    } else {
        Ok(())
    }
}

/// Validate an hour amount: finite and strictly positive.
pub fn validate_positive_hours(hours: f64) -> Result<(), String> {
    if hours.is_finite() && hours > 0.0 {
        Ok(())
    } else {
        Err("Hours must be greater than zero".to_string())
    }
}

/// Validate that an hour amount has at most one decimal place.
pub fn validate_tenths(hours: f64) -> Result<(), String> {
    let tenths = hours * 10.0;
    if tenths.is_finite() && (tenths - tenths.round()).abs() < 1e-6 {
        Ok(())
    } else {
        Err("Hours must be a multiple of 0.1".to_string())
    }
}
