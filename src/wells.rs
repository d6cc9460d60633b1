//! Radial gravity wells with keyframed force falloff.
//!
//! A well pulls bodies toward its center with a strength shaped by a
//! [`ForceCurve`] over the normalized distance: full curve input at the
//! center, zero at the rim, nothing outside the radius.

use glam::Vec2;

use crate::query::LayerMask;

/// A piecewise-linear curve over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ForceCurve {
    /// `(t, value)` keys, strictly ascending in `t`.
    keys: Vec<(f32, f32)>,
}

impl ForceCurve {
    /// Build a curve from `(t, value)` keys.
    ///
    /// Requires at least two keys with strictly ascending `t`.
    pub fn new(keys: Vec<(f32, f32)>) -> anyhow::Result<Self> {
        if keys.len() < 2 {
            anyhow::bail!("force curve needs at least two keys");
        }
        if !keys.windows(2).all(|w| w[0].0 < w[1].0) {
            anyhow::bail!("force curve keys must be strictly ascending");
        }
        Ok(Self { keys })
    }

    /// Smoothstep ease from (0, 0) to (1, 1), sampled into `samples`
    /// keys (clamped to at least 2).
    pub fn ease_in_out(samples: usize) -> Self {
        let n = samples.max(2);
        let keys = (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                (t, t * t * (3.0 - 2.0 * t))
            })
            .collect();
        Self { keys }
    }

    /// Straight ramp from (0, 0) to (1, 1).
    pub fn linear() -> Self {
        Self {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    /// Sample the curve at `t`, clamping outside the key range.
    pub fn sample(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t <= t1 {
                let r = (t - t0) / (t1 - t0);
                return v0 + (v1 - v0) * r;
            }
        }
        last.1
    }
}

impl Default for ForceCurve {
    fn default() -> Self {
        Self::ease_in_out(16)
    }
}

/// Radial attractor applying a curve-shaped pull within its radius.
#[derive(Debug, Clone)]
pub struct GravityWell {
    pub center: Vec2,
    pub radius: f32,
    /// Peak pull strength, reached where the curve evaluates to 1.
    pub force: f32,
    pub curve: ForceCurve,
    /// Layers the well acts on.
    pub mask: LayerMask,
}

impl GravityWell {
    /// Create a well with the default ease-in-out falloff.
    ///
    /// Panics unless `radius` is strictly positive.
    pub fn new(center: Vec2, radius: f32, force: f32) -> Self {
        assert!(radius > 0.0, "gravity well radius must be positive");
        Self {
            center,
            radius,
            force,
            curve: ForceCurve::default(),
            mask: LayerMask::ALL,
        }
    }

    /// Replace the falloff curve.
    pub fn with_curve(mut self, curve: ForceCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Restrict which layers the well acts on.
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    /// Pull acceleration at `pos` for a body on `layer`, or `None`
    /// outside the radius or for masked-out layers.
    pub fn acceleration_at(&self, pos: Vec2, layer: LayerMask) -> Option<Vec2> {
        if !self.mask.intersects(layer) {
            return None;
        }

        let delta = self.center - pos;
        let dist = delta.length();
        if dist >= self.radius {
            return None;
        }

        let rate = 1.0 - (dist / self.radius).clamp(0.0, 1.0);
        let dir = if dist > 1e-6 { delta / dist } else { Vec2::ZERO };
        Some(self.force * self.curve.sample(rate) * dir)
    }
}
