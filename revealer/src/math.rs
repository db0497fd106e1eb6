/// Affinely remaps `x` from `[a, b]` onto `[c, d]`.
///
/// The input is not clamped, so values outside `[a, b]` extrapolate.
pub fn map(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    (x - a) * (d - c) / (b - a) + c
}

/// Bounds `v` to `[min, max]`.
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v <= min {
        min
    } else if v >= max {
        max
    } else {
        v
    }
}

/// Linear interpolation: `(1 - t) * a + t * b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}
