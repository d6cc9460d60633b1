//! Strider
//!
//! A 2D kinematic character physics library: axis-separated swept-box
//! collision resolution with climb-angle filtering and edge snapping,
//! plus platformer movement, radial gravity wells, and sprite keyframe
//! timing.
//!
//! # Architecture
//!
//! The library is organized leaf-first:
//!
//! 1. **math** - scalar and angular helpers
//! 2. **query** - shape-cast types and the provider seam
//! 3. **world** - static AABB collision world (production provider)
//! 4. **body** - kinematic body state and contact summaries
//! 5. **resolver** - per-step axis-separated collision resolution
//! 6. **motion** - intent-driven movement controller
//! 7. **wells** - radial gravity wells with curve falloff
//! 8. **animation** - sprite keyframe playback timing
//! 9. **ecs** - hecs integration (feature = "ecs")
//!
//! A fixed step resolves one body in order: gravity, displacement,
//! x-axis sweep/snap/clamp, then y-axis sweep/snap/clamp from the
//! already-updated x position. Each step returns a fresh
//! [`CollidedInfo`] that controllers read until the next step.

pub mod animation;
pub mod body;
pub mod math;
pub mod motion;
pub mod query;
pub mod resolver;
pub mod wells;
pub mod world;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use animation::{Keyframe, KeyframeSequence, PlayState, SequencePlayer};
pub use body::{AxisContact, Body, CollidedInfo, CollisionDirection};
pub use motion::Motion;
pub use query::{CastFilter, Hit, LayerMask, NormalWindow, ShapeQueryProvider, SurfaceId};
pub use resolver::{Resolver, ResolverConfig, MAX_CLIMB_ANGLE, MIN_SPACE};
pub use wells::{ForceCurve, GravityWell};
pub use world::{Aabb, StaticWorld};

#[cfg(feature = "ecs")]
pub use ecs::{apply_wells, step_bodies, update_motion, Contacts};

// Re-export glam for convenience
pub use glam;
