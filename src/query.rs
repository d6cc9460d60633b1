//! Shape-cast query types and the provider seam.
//!
//! The resolver never walks world geometry itself; it issues swept-box
//! queries through [`ShapeQueryProvider`]. Production code backs the
//! trait with [`crate::world::StaticWorld`]; tests back it with scripted
//! hit lists.

use glam::Vec2;

use crate::math::{angle_delta, polar_angle, signed_angle};

/// Opaque identity of a collidable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// 32-bit collision layer bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing only the given layer index.
    ///
    /// Panics if `index` is 32 or greater.
    #[inline]
    pub fn layer(index: u32) -> Self {
        assert!(index < 32, "layer index out of range: {index}");
        LayerMask(1 << index)
    }

    /// Whether the two masks share any layer.
    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Result of a single swept-shape query. Consumed immediately by the
/// resolver, never retained across steps.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Contact point on the struck surface, world space.
    pub point: Vec2,
    /// Surface normal at the contact.
    pub normal: Vec2,
    /// Identity of the struck surface.
    pub surface: SurfaceId,
    /// Sweep distance travelled before contact.
    pub distance: f32,
}

/// Acceptable surface-normal angle window for one sweep direction.
///
/// Derived from the movement side by reflecting it across the (1, -1)
/// diagonal and taking the signed angle to `Vec2::NEG_X`. In
/// surface-normal polar angle the resulting centers are: right sweep
/// 180, left 0, up -90, down 90 — each facing back against the sweep, so
/// a horizontal sweep skimming a floor rejects the floor's upward normal
/// while still admitting slopes within the climb tolerance.
#[derive(Debug, Clone, Copy)]
pub struct NormalWindow {
    center: f32,
    half_width: f32,
}

impl NormalWindow {
    /// Window for a sweep along `side`, tolerating `max_climb_angle`
    /// degrees of slope on either side of the center.
    pub fn for_side(side: Vec2, max_climb_angle: f32) -> Self {
        let center = signed_angle(side * Vec2::new(1.0, -1.0), Vec2::NEG_X);
        Self {
            center,
            half_width: max_climb_angle,
        }
    }

    /// Window center in surface-normal polar degrees.
    pub fn center(&self) -> f32 {
        self.center
    }

    /// Whether the surface normal falls inside the window. Wraps at
    /// +-180 so a window centered on 180 accepts normals just past the
    /// seam.
    #[inline]
    pub fn contains(&self, normal: Vec2) -> bool {
        angle_delta(polar_angle(normal), self.center).abs() <= self.half_width
    }
}

/// Per-cast filter: layer mask plus optional climb-angle window.
#[derive(Debug, Clone, Copy)]
pub struct CastFilter {
    pub mask: LayerMask,
    pub normal_window: Option<NormalWindow>,
}

impl CastFilter {
    /// Filter on layers only.
    pub fn new(mask: LayerMask) -> Self {
        Self {
            mask,
            normal_window: None,
        }
    }

    /// Filter on layers and surface-normal angle.
    pub fn with_normal_window(mask: LayerMask, window: NormalWindow) -> Self {
        Self {
            mask,
            normal_window: Some(window),
        }
    }

    /// Whether a surface on `layer` with `normal` passes the filter.
    #[inline]
    pub fn accepts(&self, layer: LayerMask, normal: Vec2) -> bool {
        self.mask.intersects(layer) && self.normal_window.map_or(true, |w| w.contains(normal))
    }
}

/// Swept-shape query capability.
///
/// Sweeps an axis-aligned box of `half_extents` from `origin` along
/// `direction` for up to `max_distance` and appends every surface it
/// would touch to `hits`. Implementations are expected to append hits
/// sorted by ascending distance; whether the caller relies on that
/// contract is decided by [`crate::resolver::ResolverConfig::require_sorted_hits`].
pub trait ShapeQueryProvider {
    fn cast(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: &CastFilter,
        hits: &mut Vec<Hit>,
    );
}
