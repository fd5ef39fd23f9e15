//! # Shared Utility Functions
//!
//! Display helpers used wherever hours and usernames are rendered.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_hours, format_username};
//!
//! assert_eq!(format_hours(1.5), "1.5 h");
//! assert_eq!(format_username("alice"), "@alice");
//! ```

/// Format an hour amount with one decimal place, dropping a trailing `.0`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_hours;
///
/// assert_eq!(format_hours(3.0), "3 h");
/// assert_eq!(format_hours(0.99), "1 h");
/// assert_eq!(format_hours(-0.3), "-0.3 h");
/// ```
pub fn format_hours(hours: f64) -> String {
    let tenths = (hours * 10.0).round() as i64;
    let sign = if tenths < 0 { "-" } else { "" };
    let tenths = tenths.abs();

    if tenths % 10 == 0 {
        format!("{}{} h", sign, tenths / 10)
    } else {
        format!("{}{}.{} h", sign, tenths / 10, tenths % 10)
    }
}

/// Format a Telegram username for display.
///
/// Usernames that already carry the `@` prefix are returned unchanged.
pub fn format_username(username: &str) -> String {
    if username.starts_with('@') {
        username.to_string()
    } else {
        format!("@{}", username)
    }
}
