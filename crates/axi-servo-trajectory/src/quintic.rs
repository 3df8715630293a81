//! Minimum-jerk blend and single-segment evaluation.

/// Normalised minimum-jerk blend `6τ⁵ − 15τ⁴ + 10τ³`.
///
/// `tau` is clamped to `[0, 1]`; the result is 0 at `tau = 0`, 1 at `tau = 1`
/// and non-decreasing in between.
#[inline]
pub fn blend(tau: f64) -> f64 {
    let t = if tau.is_nan() { 0.0 } else { tau.clamp(0.0, 1.0) };
    let t3 = t * t * t;
    t3 * (t * (6.0 * t - 15.0) + 10.0)
}

/// Position of a minimum-jerk move from `start` to `end` lasting `phase_ms`,
/// evaluated `elapsed_ms` after the move began.
///
/// The displacement is truncated toward zero and added to `start`. Times past
/// the end of the phase return `end`, and a zero-length phase is already at
/// `end`. The arithmetic is done in 64 bits, so any pair of `i32` positions
/// is safe.
///
/// # Examples
///
/// ```
/// use axi_servo_trajectory::position_at;
///
/// assert_eq!(position_at(0, 1000, 0, 1000), 0);
/// assert_eq!(position_at(250, 1000, 0, 1000), 103);
/// assert_eq!(position_at(1000, 1000, 0, 1000), 1000);
/// assert_eq!(position_at(10, 0, 0, 1000), 1000);
/// ```
#[inline]
pub fn position_at(elapsed_ms: u64, phase_ms: u64, start: i32, end: i32) -> i32 {
    if elapsed_ms >= phase_ms {
        return end;
    }
    let tau = elapsed_ms as f64 / phase_ms as f64;
    let span = i64::from(end) - i64::from(start);
    let offset = (span as f64 * blend(tau)).trunc() as i64;
    let position = i64::from(start).saturating_add(offset);
    i32::try_from(position).unwrap_or(if position < 0 { i32::MIN } else { i32::MAX })
}
