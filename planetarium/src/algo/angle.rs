//! Angle wrapping for celestial coordinates
//!
//! Right ascension and declination offsets are folded back into a fixed
//! interval by whole turns in constant time, whatever their magnitude.

use std::f64::consts::TAU;

/// Fold `angle` into `[lo, hi]` by whole multiples of 2π.
///
/// The interval must span at least one full turn, otherwise some inputs
/// can never land inside it. This is checked with an assertion.
///
/// Non-finite inputs are returned unchanged.
///
/// # Example
/// ```
/// use planetarium::algo::normalize_angle;
/// use std::f64::consts::{PI, TAU};
///
/// let wrapped = normalize_angle(-0.5, 0.0, TAU);
/// assert!((wrapped - (TAU - 0.5)).abs() < 1e-12);
///
/// let centered = normalize_angle(1.5 * PI, -PI, PI);
/// assert!((centered + 0.5 * PI).abs() < 1e-12);
/// ```
pub fn normalize_angle(angle: f64, lo: f64, hi: f64) -> f64 {
    assert!(
        hi - lo >= TAU,
        "normalization interval [{lo}, {hi}] is narrower than a full turn"
    );

    if !angle.is_finite() || (lo..=hi).contains(&angle) {
        return angle;
    }

    // rem_euclid lands in [0, TAU], and lo + TAU <= hi
    lo + (angle - lo).rem_euclid(TAU)
}
