//! Moving-average-plus-trend demand estimate.
//!
//! Model:
//! - Take the last `FORECAST_WINDOW` finite observations.
//! - `average` = arithmetic mean of the window.
//! - `trend` = `(last - first) / len` when the window has more than one point.
//! - Result = `max(0, round(average + trend))`.

/// Number of trailing observations the estimate looks at.
pub const FORECAST_WINDOW: usize = 7;

/// Deterministic fallback demand estimate for a history series.
///
/// Non-finite observations are skipped; an empty (or all non-finite) series
/// estimates 0.
pub fn estimate(series: &[f64]) -> u32 {
    let finite: Vec<f64> = series.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return 0;
    }

    let window = &finite[finite.len().saturating_sub(FORECAST_WINDOW)..];
    let average = mean(window);
    let trend = if window.len() > 1 {
        (window[window.len() - 1] - window[0]) / (window.len() as f64)
    } else {
        0.0
    };

    // `as` saturates: negative results clamp to 0, huge ones to u32::MAX.
    (average + trend).round().max(0.0) as u32
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}
