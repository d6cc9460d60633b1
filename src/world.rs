//! Static collision world: the production shape-query provider.
//!
//! Holds a flat set of immovable axis-aligned surfaces and answers
//! swept-box queries against them. The sweep is a Minkowski-expanded
//! slab test: each surface is grown by the moving box's half-extents
//! and the box center is ray-cast against the grown bounds.

use glam::Vec2;

use crate::query::{CastFilter, Hit, LayerMask, ShapeQueryProvider, SurfaceId};

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Create a rectangle from corner points.
    ///
    /// Panics unless `min < max` on both axes.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        assert!(
            min.x < max.x && min.y < max.y,
            "degenerate aabb: min {min:?} max {max:?}"
        );
        Self { min, max }
    }

    /// Create a rectangle from a center and half-extents.
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Grow the rectangle by `amount` on every side.
    #[inline]
    pub fn expanded(&self, amount: Vec2) -> Aabb {
        Aabb {
            min: self.min - amount,
            max: self.max + amount,
        }
    }

    /// Whether the point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[derive(Debug, Clone, Copy)]
struct Surface {
    bounds: Aabb,
    layer: LayerMask,
    id: SurfaceId,
}

/// A set of static axis-aligned surfaces supporting swept-box queries.
///
/// Surfaces never move once inserted; bodies query the world, the world
/// never touches the bodies.
#[derive(Debug, Default)]
pub struct StaticWorld {
    surfaces: Vec<Surface>,
    next_id: u32,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a static surface, returning its identity.
    pub fn insert(&mut self, bounds: Aabb, layer: LayerMask) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.push(Surface { bounds, layer, id });
        id
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Bounds of a previously inserted surface.
    pub fn bounds(&self, id: SurfaceId) -> Option<Aabb> {
        self.surfaces
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.bounds)
    }
}

impl ShapeQueryProvider for StaticWorld {
    fn cast(
        &self,
        origin: Vec2,
        half_extents: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: &CastFilter,
        hits: &mut Vec<Hit>,
    ) {
        let mut found: Vec<Hit> = Vec::new();

        for surface in &self.surfaces {
            if !filter.mask.intersects(surface.layer) {
                continue;
            }

            let grown = surface.bounds.expanded(half_extents);
            let Some((t, normal)) = ray_vs_aabb(origin, direction, max_distance, &grown) else {
                continue;
            };

            if !filter.accepts(surface.layer, normal) {
                continue;
            }

            let center_at_hit = origin + direction * t;
            found.push(Hit {
                point: contact_on_face(center_at_hit, direction, normal, &surface.bounds),
                normal,
                surface: surface.id,
                distance: t,
            });
        }

        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.extend(found);
    }
}

/// Slab-test a ray against a rectangle. Returns the entry distance and
/// the normal of the entered face, or `None` on a miss. Rays starting
/// inside the rectangle do not hit it.
fn ray_vs_aabb(origin: Vec2, direction: Vec2, max_distance: f32, bounds: &Aabb) -> Option<(f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut entry_axis = 0usize;

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);

        if d.abs() < f32::EPSILON {
            // Parallel to the slab: miss unless already between the planes.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let mut t1 = (lo - o) / d;
        let mut t2 = (hi - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        if t1 > t_enter {
            t_enter = t1;
            entry_axis = axis;
        }
        t_exit = t_exit.min(t2);
    }

    if t_enter > t_exit || t_enter < 0.0 || t_enter > max_distance {
        return None;
    }

    let mut normal = Vec2::ZERO;
    normal[entry_axis] = -direction[entry_axis].signum();
    Some((t_enter, normal))
}

/// Contact point on the struck face of the original (unexpanded) surface:
/// the entry-axis coordinate sits on the face plane, the other coordinate
/// is the sweep position clamped onto the face span.
fn contact_on_face(center_at_hit: Vec2, direction: Vec2, normal: Vec2, bounds: &Aabb) -> Vec2 {
    let axis = if normal.x != 0.0 { 0usize } else { 1usize };
    let other = 1 - axis;

    let mut point = Vec2::ZERO;
    point[axis] = if direction[axis] > 0.0 {
        bounds.min[axis]
    } else {
        bounds.max[axis]
    };
    point[other] = center_at_hit[other].clamp(bounds.min[other], bounds.max[other]);
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NormalWindow;

    fn floor_and_wall() -> StaticWorld {
        let mut world = StaticWorld::new();
        // Floor slab with its top face at y = -1.
        world.insert(
            Aabb::new(Vec2::new(-10.0, -2.0), Vec2::new(10.0, -1.0)),
            LayerMask::ALL,
        );
        // Wall slab with its right face at x = -2.
        world.insert(
            Aabb::new(Vec2::new(-3.0, -10.0), Vec2::new(-2.0, 10.0)),
            LayerMask::ALL,
        );
        world
    }

    #[test]
    fn test_cast_hits_floor_downward() {
        let world = floor_and_wall();
        let mut hits = Vec::new();
        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            Vec2::new(0.0, -1.0),
            5.0,
            &CastFilter::new(LayerMask::ALL),
            &mut hits,
        );

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        // Body bottom edge is at -0.5; floor top at -1.0.
        assert!((hit.distance - 0.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
        assert!((hit.point.y - (-1.0)).abs() < 1e-5);
        assert!(hit.point.x.abs() < 1e-5);
    }

    #[test]
    fn test_cast_respects_max_distance() {
        let world = floor_and_wall();
        let mut hits = Vec::new();
        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            Vec2::new(0.0, -1.0),
            0.2,
            &CastFilter::new(LayerMask::ALL),
            &mut hits,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_cast_sorted_by_distance() {
        let mut world = StaticWorld::new();
        let far = world.insert(
            Aabb::new(Vec2::new(5.0, -1.0), Vec2::new(6.0, 1.0)),
            LayerMask::ALL,
        );
        let near = world.insert(
            Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)),
            LayerMask::ALL,
        );

        let mut hits = Vec::new();
        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            Vec2::new(1.0, 0.0),
            10.0,
            &CastFilter::new(LayerMask::ALL),
            &mut hits,
        );

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].surface, near);
        assert_eq!(hits[1].surface, far);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn test_cast_filters_by_layer() {
        let mut world = StaticWorld::new();
        world.insert(
            Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)),
            LayerMask::layer(5),
        );

        let mut hits = Vec::new();
        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            Vec2::new(1.0, 0.0),
            10.0,
            &CastFilter::new(LayerMask::layer(1)),
            &mut hits,
        );
        assert!(hits.is_empty());

        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            Vec2::new(1.0, 0.0),
            10.0,
            &CastFilter::new(LayerMask::layer(5)),
            &mut hits,
        );
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_normal_window_rejects_floor_entry() {
        let world = floor_and_wall();
        // Sweep diagonally down-left. The sweep would enter the floor
        // through its top face (normal (0, 1)) before reaching the wall,
        // but a horizontal-movement climb window only admits
        // right-facing normals, so the floor is filtered out and the
        // wall is the sole hit.
        let dir = Vec2::new(-1.0, -1.0).normalize();
        let window = NormalWindow::for_side(Vec2::new(-1.0, 0.0), 30.0);
        let filter = CastFilter::with_normal_window(LayerMask::ALL, window);

        let mut hits = Vec::new();
        world.cast(Vec2::ZERO, Vec2::splat(0.5), dir, 5.0, &filter, &mut hits);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].normal, Vec2::new(1.0, 0.0));
        assert!((hits[0].point.x - (-2.0)).abs() < 1e-5);

        // Without the window both surfaces report, floor first.
        hits.clear();
        world.cast(
            Vec2::ZERO,
            Vec2::splat(0.5),
            dir,
            5.0,
            &CastFilter::new(LayerMask::ALL),
            &mut hits,
        );
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_contact_point_clamped_to_face() {
        let mut world = StaticWorld::new();
        // Narrow pillar; a wide box sweeping down past its corner should
        // report a contact on the pillar's top face, not beyond it.
        world.insert(
            Aabb::new(Vec2::new(-0.25, -2.0), Vec2::new(0.25, -1.0)),
            LayerMask::ALL,
        );

        let mut hits = Vec::new();
        world.cast(
            Vec2::new(1.0, 0.0),
            Vec2::new(1.5, 0.5),
            Vec2::new(0.0, -1.0),
            5.0,
            &CastFilter::new(LayerMask::ALL),
            &mut hits,
        );

        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.y - (-1.0)).abs() < 1e-5);
        assert!(hits[0].point.x <= 0.25 + 1e-5);
    }

    #[test]
    fn test_ray_starting_inside_misses() {
        let bounds = Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(ray_vs_aabb(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0, &bounds).is_none());
    }

    #[test]
    #[should_panic(expected = "degenerate aabb")]
    fn test_degenerate_aabb_rejected() {
        Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 2.0));
    }
}
