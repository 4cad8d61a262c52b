/// Linear blend between `a` and `b`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Fraction of `lifetime` elapsed since `created`, clamped to [0,1].
///
/// Timestamps are milliseconds on the host's monotonic clock. A non-positive
/// lifetime counts as already expired.
#[inline]
pub fn age_progress(now: f64, created: f64, lifetime: f64) -> f32 {
    if lifetime <= 0.0 {
        return 1.0;
    }
    ((now - created) / lifetime).clamp(0.0, 1.0) as f32
}

/// Cubic ease-out on normalized progress.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
