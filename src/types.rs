//! Shared constants and small numeric helpers for the orbital animation core.

use std::f64::consts::TAU;

/// Days per Julian year, used for elapsed-time display.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Average days per month, used for elapsed-time display.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Hours per day (rotation periods are given in hours).
pub const HOURS_PER_DAY: f64 = 24.0;

/// Name of the central body. It never orbits anything.
pub const SUN_KEY: &str = "sun";

/// Normalize a body name into its registry key (trimmed, lowercase).
pub fn body_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` can round up to exactly `TAU` for tiny negative inputs,
/// so that case is folded back to zero. Non-finite input yields zero.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Return `value` when finite, otherwise `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Convert simulated days to years.
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// Format elapsed simulated days as a compact duration.
///
/// - under 30 days: `"12d"`
/// - under one year: `"3m 4d"` (30.44-day months)
/// - otherwise: `"2y 17d"` (365.25-day years)
///
/// All components are floor-truncated.
pub fn format_elapsed_days(days: f64) -> String {
    let days = finite_or(days, 0.0).max(0.0);

    if days < 30.0 {
        format!("{}d", days.floor() as u64)
    } else if days < DAYS_PER_YEAR {
        let months = (days / DAYS_PER_MONTH).floor();
        let rest = (days - months * DAYS_PER_MONTH).floor().max(0.0);
        format!("{}m {}d", months as u64, rest as u64)
    } else {
        let years = (days / DAYS_PER_YEAR).floor();
        let rest = (days - years * DAYS_PER_YEAR).floor().max(0.0);
        format!("{}y {}d", years as u64, rest as u64)
    }
}
