//! Scalar and angular helpers shared across the crate.

use glam::Vec2;

/// Shared tolerance for epsilon comparisons.
pub const EPSILON: f32 = 1e-5;

/// Epsilon-tolerant float equality.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Signum with a tolerant zero: -1.0, 0.0 or 1.0.
#[inline]
pub fn sign(v: f32) -> f32 {
    if approx_eq(v, 0.0) {
        0.0
    } else if v > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Signed angle from `a` to `b` in degrees, counterclockwise positive.
#[inline]
pub fn signed_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b)).to_degrees()
}

/// Polar angle of `v` in degrees, measured counterclockwise from +X.
#[inline]
pub fn polar_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Wrapped angular difference `a - b`, normalized into (-180, 180].
#[inline]
pub fn angle_delta(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Move `current` toward `target` by at most `max_delta`, without overshoot.
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + sign(diff) * max_delta
    }
}
