//! Output rounding helpers

/// Round a monetary amount or percentage to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
