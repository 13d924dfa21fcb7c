//! Easing functions for cross-fades

/// Cubic smoothstep `t^2 (3 - 2t)`, input clamped to `[0, 1]`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
