//! Explicit Euler integration of linear motion

use crate::ecs::components::{PhysicsComponent, TransformComponent};
use crate::ecs::join2_mut;

/// Advance every entity present in both arrays by `dt` seconds
///
/// Velocity takes the acceleration first, then position takes the new
/// velocity. Each integrated transform gets its `updated` flag raised.
/// Returns how many entities were integrated.
pub fn update_pos_vel(transforms: &mut [TransformComponent], physics: &mut [PhysicsComponent], dt: f32) -> usize {
    join2_mut(transforms, physics, |transform, body| {
        body.velocity += body.acceleration * dt;
        transform.position += body.velocity * dt;
        transform.updated = true;
    })
}
