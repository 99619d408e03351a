use permanence_core::models::form::Answer;

/// Percentage change of `current` relative to `previous`.
///
/// The denominator is `|previous|`, so a positive result always means the
/// value moved upward regardless of the baseline's sign. A zero baseline
/// yields `0.0` when the value stayed at zero and `f64::INFINITY` otherwise
/// (the direction is not kept). Non-finite inputs yield `None`.
pub fn deviation_percent(current: f64, previous: f64) -> Option<f64> {
    if !current.is_finite() || !previous.is_finite() {
        return None;
    }
    if previous == 0.0 {
        return Some(if current == 0.0 { 0.0 } else { f64::INFINITY });
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Deviation between two recorded answers; `None` unless both are numeric.
pub fn answer_deviation(current: &Answer, baseline: Option<&Answer>) -> Option<f64> {
    deviation_percent(current.numeric_value()?, baseline?.numeric_value()?)
}
