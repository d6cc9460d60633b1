//! Kinematic body state and per-step contact summaries.

use glam::Vec2;

use crate::math::sign;
use crate::query::{LayerMask, SurfaceId};

/// Which way a contact was made along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionDirection {
    #[default]
    None,
    /// Toward +axis.
    Positive,
    /// Toward -axis.
    Negative,
}

impl CollisionDirection {
    /// Classify a signed value, treating near-zero as `None`.
    pub fn from_sign(v: f32) -> Self {
        match sign(v) {
            s if s > 0.0 => CollisionDirection::Positive,
            s if s < 0.0 => CollisionDirection::Negative,
            _ => CollisionDirection::None,
        }
    }

    /// -1.0, 0.0 or 1.0.
    pub fn as_sign(self) -> f32 {
        match self {
            CollisionDirection::None => 0.0,
            CollisionDirection::Positive => 1.0,
            CollisionDirection::Negative => -1.0,
        }
    }
}

/// Contact recorded on one axis during a step.
#[derive(Debug, Clone, Copy)]
pub struct AxisContact {
    pub direction: CollisionDirection,
    pub surface: SurfaceId,
    pub point: Vec2,
}

/// Per-step summary of which axes contacted a surface.
///
/// Built fresh by every resolver step and returned by value; consumers
/// read it after the step completes rather than caching it across steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollidedInfo {
    pub x: Option<AxisContact>,
    pub y: Option<AxisContact>,
}

impl CollidedInfo {
    /// Whether any axis made contact this step.
    pub fn any(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Surface touched while moving toward +x, if any.
    pub fn right(&self) -> Option<SurfaceId> {
        directional(self.x, CollisionDirection::Positive)
    }

    /// Surface touched while moving toward -x, if any.
    pub fn left(&self) -> Option<SurfaceId> {
        directional(self.x, CollisionDirection::Negative)
    }

    /// Surface touched while moving toward +y, if any.
    pub fn top(&self) -> Option<SurfaceId> {
        directional(self.y, CollisionDirection::Positive)
    }

    /// Surface touched while moving toward -y, if any.
    pub fn bottom(&self) -> Option<SurfaceId> {
        directional(self.y, CollisionDirection::Negative)
    }

    /// Whether the body came to rest on something below it this step.
    pub fn is_grounded(&self) -> bool {
        self.bottom().is_some()
    }
}

fn directional(contact: Option<AxisContact>, direction: CollisionDirection) -> Option<SurfaceId> {
    contact
        .filter(|c| c.direction == direction)
        .map(|c| c.surface)
}

/// An axis-aligned kinematic body.
///
/// `position` is the reference transform origin; the collision rectangle
/// is centered at `position + offset` with the given half-extents. The
/// resolver owns collision-driven changes to `position` and `velocity`;
/// movement controllers write intent into `velocity` before the step.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    offset: Vec2,
    half_extents: Vec2,
    /// Gravity multiplier applied by the resolver.
    pub gravity_scale: f32,
    /// Layers this body collides with.
    pub mask: LayerMask,
    /// Disabled bodies are skipped by the resolver.
    pub simulated: bool,
}

impl Body {
    /// Create a simulated body centered at `position`.
    ///
    /// Panics unless both half-extents are strictly positive.
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        assert_positive_extents(half_extents);
        Self {
            position,
            velocity: Vec2::ZERO,
            offset: Vec2::ZERO,
            half_extents,
            gravity_scale: 1.0,
            mask: LayerMask::ALL,
            simulated: true,
        }
    }

    /// Offset the collision rectangle from the transform origin.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Restrict which layers the body collides with.
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Resize the collision rectangle.
    ///
    /// Panics unless both half-extents are strictly positive.
    pub fn set_half_extents(&mut self, half_extents: Vec2) {
        assert_positive_extents(half_extents);
        self.half_extents = half_extents;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Collision-rectangle center.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Move the body so its collision rectangle is centered at `center`.
    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.position = center - self.offset;
    }

    /// Reposition so the edge facing `side` rests at `point` plus
    /// `clearance`.
    ///
    /// The assignment is absolute, not incremental: snapping twice to
    /// the same point is a no-op. The axis orthogonal to `side` is left
    /// untouched.
    pub fn snap_edge(&mut self, side: Vec2, point: Vec2, clearance: f32) {
        debug_assert!(clearance >= 0.0, "negative clearance");
        if side.x != 0.0 {
            let half = self.half_extents.x + clearance;
            let center = self.center();
            self.set_center(Vec2::new(point.x - sign(side.x) * half, center.y));
        }
        if side.y != 0.0 {
            let half = self.half_extents.y + clearance;
            let center = self.center();
            self.set_center(Vec2::new(center.x, point.y - sign(side.y) * half));
        }
    }

    /// Zero the velocity component moving into a blocked `side`.
    /// Velocity moving away from the contact is untouched.
    pub fn clamp_velocity(&mut self, side: Vec2) {
        if side.x != 0.0 && sign(self.velocity.x) == sign(side.x) {
            self.velocity.x = 0.0;
        }
        if side.y != 0.0 && sign(self.velocity.y) == sign(side.y) {
            self.velocity.y = 0.0;
        }
    }
}

fn assert_positive_extents(half_extents: Vec2) {
    assert!(
        half_extents.x > 0.0 && half_extents.y > 0.0,
        "body half-extents must be positive: {half_extents:?}"
    );
}
