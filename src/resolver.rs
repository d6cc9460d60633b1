//! Per-step kinematic collision resolution.
//!
//! The resolver runs once per fixed step, in order:
//!
//! 1. Apply gravity to the velocity.
//! 2. Compute the frame displacement from the velocity.
//! 3. Resolve the x axis: swept test, edge snap, velocity clamp.
//! 4. Resolve the y axis the same way, sweeping from the already-updated
//!    x position.
//! 5. Return a fresh [`CollidedInfo`] for the step.
//!
//! The x axis always resolves first. Tuned level geometry depends on
//! this exact order; it is never varied by movement direction.

use glam::Vec2;

use crate::body::{AxisContact, Body, CollidedInfo, CollisionDirection};
use crate::math::{approx_eq, sign};
use crate::query::{CastFilter, Hit, NormalWindow, ShapeQueryProvider};

/// Default clearance kept between a snapped edge and its surface.
pub const MIN_SPACE: f32 = 0.01;

/// Default climb-angle tolerance in degrees.
pub const MAX_CLIMB_ANGLE: f32 = 30.0;

/// Tuning for a [`Resolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Gravity acceleration applied to simulated bodies. Default: (0, -9.81).
    pub gravity: Vec2,
    /// Clearance between a snapped edge and the contacted surface.
    /// Must be strictly positive. Default: [`MIN_SPACE`].
    pub min_space: f32,
    /// Maximum surface slope treated as a valid contact, in degrees.
    /// Default: [`MAX_CLIMB_ANGLE`].
    pub max_climb_angle: f32,
    /// Fixed timestep for [`Resolver::update`] in seconds. Default: 1/60.
    pub fixed_timestep: f32,
    /// Maximum number of substeps per [`Resolver::update`] call. Default: 4.
    pub max_substeps: u32,
    /// Trust the provider to return hits sorted by ascending distance
    /// and take the first one surviving the user filter. When false, the
    /// resolver scans every surviving hit and picks the nearest itself.
    /// Default: true.
    pub require_sorted_hits: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            min_space: MIN_SPACE,
            max_climb_angle: MAX_CLIMB_ANGLE,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            require_sorted_hits: true,
        }
    }
}

/// Veto callback consulted for every candidate hit: `(side, hit) -> keep`.
pub type CollisionFilter = Box<dyn FnMut(Vec2, &Hit) -> bool>;

/// Instrumentation callback observing every axis test:
/// `(side, max_distance, winning hit)`.
pub type AxisProbe = Box<dyn FnMut(Vec2, f32, Option<&Hit>)>;

/// Axis-separated swept collision resolver for kinematic bodies.
pub struct Resolver {
    config: ResolverConfig,
    accumulator: f32,
    hit_buffer: Vec<Hit>,
    collision_filter: Option<CollisionFilter>,
    axis_probe: Option<AxisProbe>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    /// Create a resolver with the given configuration.
    ///
    /// Panics on degenerate configuration: non-positive clearance or
    /// timestep, negative climb angle, non-finite gravity.
    pub fn new(config: ResolverConfig) -> Self {
        assert!(config.min_space > 0.0, "clearance must be positive");
        assert!(config.max_climb_angle >= 0.0, "negative climb angle");
        assert!(
            config.fixed_timestep > 0.0 && config.fixed_timestep.is_finite(),
            "fixed timestep must be positive and finite"
        );
        assert!(config.gravity.is_finite(), "gravity must be finite");

        Self {
            config,
            accumulator: 0.0,
            hit_buffer: Vec::new(),
            collision_filter: None,
            axis_probe: None,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Install a veto callback consulted for every candidate hit.
    /// Returning false discards the hit and moves on to the next one.
    pub fn set_collision_filter(&mut self, filter: impl FnMut(Vec2, &Hit) -> bool + 'static) {
        self.collision_filter = Some(Box::new(filter));
    }

    pub fn clear_collision_filter(&mut self) {
        self.collision_filter = None;
    }

    /// Install a callback observing every axis test and its outcome.
    pub fn set_axis_probe(&mut self, probe: impl FnMut(Vec2, f32, Option<&Hit>) + 'static) {
        self.axis_probe = Some(Box::new(probe));
    }

    pub fn clear_axis_probe(&mut self) {
        self.axis_probe = None;
    }

    /// Advance by `delta_time`, running as many fixed steps as the
    /// accumulator allows (capped at `max_substeps`). Returns the most
    /// recent step's contact summary, or an empty one if no step ran.
    pub fn update(
        &mut self,
        body: &mut Body,
        provider: &dyn ShapeQueryProvider,
        delta_time: f32,
    ) -> CollidedInfo {
        debug_assert!(
            delta_time.is_finite() && delta_time >= 0.0,
            "degenerate delta time"
        );
        self.accumulator += delta_time;

        let mut info = CollidedInfo::default();
        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            info = self.step(body, provider, self.config.fixed_timestep);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Clamp accumulator to avoid spiral of death
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f32 {
            self.accumulator = 0.0;
        }

        info
    }

    /// Run one fixed step of duration `dt` and return the step's contact
    /// summary. Non-simulated bodies are left untouched.
    pub fn step(
        &mut self,
        body: &mut Body,
        provider: &dyn ShapeQueryProvider,
        dt: f32,
    ) -> CollidedInfo {
        debug_assert!(dt > 0.0 && dt.is_finite(), "degenerate step duration");

        if !body.simulated {
            return CollidedInfo::default();
        }

        // Apply gravity
        body.velocity += self.config.gravity * body.gravity_scale * dt;

        let delta = body.velocity * dt;

        // x always resolves first; the y sweep starts from the updated
        // x position.
        let x = self.resolve_axis(body, provider, Vec2::new(sign(delta.x), 0.0), delta.x);
        let y = self.resolve_axis(body, provider, Vec2::new(0.0, sign(delta.y)), delta.y);

        CollidedInfo { x, y }
    }

    /// Resolve one axis: swept test, then either snap-and-clamp at the
    /// contact or free movement by the axis displacement. Near-zero
    /// displacement skips the axis entirely.
    fn resolve_axis(
        &mut self,
        body: &mut Body,
        provider: &dyn ShapeQueryProvider,
        side: Vec2,
        axis_delta: f32,
    ) -> Option<AxisContact> {
        if approx_eq(axis_delta, 0.0) {
            return None;
        }

        match self.axis_test(body, provider, side, axis_delta.abs()) {
            Some(hit) => {
                body.snap_edge(side, hit.point, self.config.min_space);
                body.clamp_velocity(side);
                tracing::trace!(?side, surface = hit.surface.0, "edge snapped");
                Some(AxisContact {
                    direction: CollisionDirection::from_sign(side.x + side.y),
                    surface: hit.surface,
                    point: hit.point,
                })
            }
            None => {
                body.position += side * axis_delta.abs();
                None
            }
        }
    }

    /// Swept test along one axis direction. Returns the winning hit, if
    /// any, after layer, climb-angle and user filtering.
    fn axis_test(
        &mut self,
        body: &Body,
        provider: &dyn ShapeQueryProvider,
        side: Vec2,
        max_distance: f32,
    ) -> Option<Hit> {
        let max_distance = max_distance.abs();

        let window = NormalWindow::for_side(side, self.config.max_climb_angle);
        let filter = CastFilter::with_normal_window(body.mask, window);

        self.hit_buffer.clear();
        provider.cast(
            body.center(),
            body.half_extents(),
            side,
            max_distance,
            &filter,
            &mut self.hit_buffer,
        );

        let mut winner: Option<Hit> = None;
        for hit in &self.hit_buffer {
            if let Some(veto) = &mut self.collision_filter {
                if !veto(side, hit) {
                    continue;
                }
            }
            if winner.map_or(true, |best| hit.distance < best.distance) {
                winner = Some(*hit);
            }
            // First survivor wins when the provider pre-sorts.
            if self.config.require_sorted_hits {
                break;
            }
        }

        if let Some(probe) = &mut self.axis_probe {
            probe(side, max_distance, winner.as_ref());
        }
        tracing::trace!(?side, max_distance, hit = winner.is_some(), "axis test");

        winner
    }
}
