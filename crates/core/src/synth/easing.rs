//! Blend-weight easing curves.
//!
//! The blending engine pushes each neighbor's inverse-distance falloff
//! `1 / (distance + 1)` through an easing curve to shape how sharply region
//! borders smooth out. Hosts may supply their own curve; the presets here
//! cover the common cases.

/// Easing curve applied to a neighbor's inverse-distance falloff.
///
/// Expected to map [0, 1] into [0, 1] and to be pure. The engine does not
/// validate outputs; a curve that zeroes every weight triggers the
/// documented center-type fallback instead of erroring.
pub type EasingCurve = fn(f32) -> f32;

/// Quintic smoothstep (6t^5 - 15t^4 + 10t^3), the default curve.
///
/// Flattens the falloff near both ends, giving wide plateaus inside regions
/// and a tight transition band at borders.
#[must_use]
pub fn smooth_step(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Identity curve: weights fall off exactly as `1 / (distance + 1)`.
#[must_use]
pub fn linear(t: f32) -> f32 {
    t
}
