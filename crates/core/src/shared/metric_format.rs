use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("cannot compute a rate over a zero duration")]
    DivisionByZero,
}

/// Render `value` with exactly two decimal digits, rounding halves away from zero.
///
/// Rounding happens on the scaled value before formatting so the output does
/// not depend on the float formatter's tie-breaking rule. The scaled value is
/// nudged up by one relative epsilon first: decimal ties such as `1.005` are
/// stored just below the tie and would otherwise round down.
pub fn to_fixed2(value: f64) -> String {
    let rounded = (value * 100.0 * (1.0 + f64::EPSILON)).round() / 100.0;
    // Avoid rendering "-0.00" for tiny negative inputs.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

/// Scale a 0-1 fraction to a 0-100 percentage.
pub fn to_percentage(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Words per minute for `word_count` words spoken over `duration_seconds`.
pub fn words_per_minute(word_count: usize, duration_seconds: f64) -> Result<f64, MetricError> {
    if duration_seconds == 0.0 {
        return Err(MetricError::DivisionByZero);
    }
    Ok(word_count as f64 / duration_seconds * 60.0)
}
