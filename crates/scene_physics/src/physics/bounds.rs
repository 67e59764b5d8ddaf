//! Collider bounds refresh
//!
//! Local bounds are cached on the collider and recomputed only while the
//! transform says they are outdated. Every pass still emits one absolute
//! [`CollisionEntity`] per joined entity for the broad phase.

use nalgebra::Point3;

use crate::ecs::components::{Bounds, ColliderComponent, ColliderShape, TransformComponent};
use crate::ecs::{join2_mut, Entity};
use crate::foundation::math::Vec3;

/// Broad-phase candidate: an entity and its world-space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEntity {
    /// Candidate entity
    pub entity: Entity,
    /// Bounds offset by the entity position
    pub bounds: Bounds,
}

/// Local bounds of `shape` under the rotation and scale of `transform`
///
/// Spheres take `|radius * scale|` per axis as their extents, so a mirrored
/// scale still yields `min <= max`. Boxes and
/// capsules transform their min and max corners and re-axis-align the
/// result; the other six corners are not considered.
pub fn local_bounds(shape: &ColliderShape, transform: &TransformComponent) -> Bounds {
    let corner = match *shape {
        ColliderShape::Sphere { radius } => {
            return Bounds::new(Vec3::zeros(), (transform.scale * radius).abs());
        }
        ColliderShape::Aabb { half_extents } | ColliderShape::OrientedBox { half_extents } => half_extents,
        ColliderShape::Capsule { radius, half_height } => Vec3::new(radius, half_height + radius, radius),
    };

    let matrix = transform.rotation_scale_matrix();
    let a = matrix.transform_point(&Point3::from(-corner)).coords;
    let b = matrix.transform_point(&Point3::from(corner)).coords;

    Bounds::from_min_max(a.inf(&b), a.sup(&b))
}

/// Refresh outdated collider bounds and list every candidate
///
/// Walks transforms and colliders in entity order. For each joined pair the
/// local bounds are recomputed if `collider_bounds_outdated` is set, the
/// flag is cleared, and the bounds offset by the position are appended.
pub fn compute_collision_entities(
    transforms: &mut [TransformComponent],
    colliders: &mut [ColliderComponent],
) -> Vec<CollisionEntity> {
    let mut candidates = Vec::with_capacity(colliders.len());
    let mut refreshed = 0usize;

    join2_mut(transforms, colliders, |transform, collider| {
        if transform.collider_bounds_outdated {
            collider.bounds = local_bounds(&collider.shape, transform);
            transform.collider_bounds_outdated = false;
            refreshed += 1;
        }

        candidates.push(CollisionEntity {
            entity: collider.entity,
            bounds: collider.bounds.translated(&transform.position),
        });
    });

    log::trace!(
        "Bounds: {} candidates, {} refreshed",
        candidates.len(),
        refreshed
    );
    candidates
}
