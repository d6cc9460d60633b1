//! hecs integration: components and fixed-step systems.
//!
//! [`Body`], [`Motion`] and [`GravityWell`] are used directly as
//! components; [`Contacts`] carries each body's latest step summary.
//! The systems are free functions over `hecs::World`, intended to run
//! once per fixed step in this order:
//!
//! 1. [`apply_wells`] - wells accelerate bodies in range
//! 2. [`update_motion`] - movement intent eases horizontal velocity
//! 3. [`step_bodies`] - resolver steps every body, refreshing contacts

use crate::body::{Body, CollidedInfo};
use crate::motion::Motion;
use crate::query::ShapeQueryProvider;
use crate::resolver::Resolver;
use crate::wells::GravityWell;

/// Per-entity contact summary refreshed by [`step_bodies`] each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contacts(pub CollidedInfo);

/// Accelerate simulated bodies inside any gravity well.
pub fn apply_wells(world: &mut hecs::World, dt: f32) {
    let wells: Vec<GravityWell> = world
        .query_mut::<&GravityWell>()
        .into_iter()
        .map(|(_, well)| well.clone())
        .collect();
    if wells.is_empty() {
        return;
    }

    for (_, body) in world.query_mut::<&mut Body>() {
        if !body.simulated {
            continue;
        }
        for well in &wells {
            if let Some(accel) = well.acceleration_at(body.center(), body.mask) {
                body.velocity += accel * dt;
            }
        }
    }
}

/// Ease horizontal velocities toward each entity's motion target, using
/// the previous step's contacts for the grounded check.
pub fn update_motion(world: &mut hecs::World, dt: f32) {
    for (_, (motion, body, contacts)) in world.query_mut::<(&Motion, &mut Body, &Contacts)>() {
        motion.apply(body, &contacts.0, dt);
    }
}

/// Step every kinematic body against the provider and refresh its
/// [`Contacts`] with the step's summary.
pub fn step_bodies(
    world: &mut hecs::World,
    provider: &dyn ShapeQueryProvider,
    resolver: &mut Resolver,
    dt: f32,
) {
    for (_, (body, contacts)) in world.query_mut::<(&mut Body, &mut Contacts)>() {
        contacts.0 = resolver.step(body, provider, dt);
    }
}
