//! Physics module for integration and collision detection
//!
//! One call to [`PhysicsSystem::update_physics`] runs a full tick:
//!
//! 1. integrate velocity and position ([`integrator`])
//! 2. refresh collider bounds and list candidates ([`bounds`])
//! 3. pair overlapping candidates ([`broad_phase`])
//! 4. resolve exact contacts into [`HitInfo`]s ([`narrow_phase`])
//! 5. hand every hit to the [`CollisionResponse`] hook and return them
//!
//! The component arrays are borrowed for the duration of the tick only.

pub mod integrator;
pub mod bounds;
pub mod intersection;
pub mod broad_phase;
pub mod narrow_phase;
pub mod snapshot;

use thiserror::Error;

pub use bounds::{compute_collision_entities, CollisionEntity};
pub use broad_phase::{BroadPhase, BruteForceBroadPhase, OctreeBroadPhase};
pub use narrow_phase::collision_check;
pub use snapshot::{PhysicsSnapshot, SnapshotBuffer};

use crate::core::config::PhysicsConfig;
use crate::ecs::components::{ColliderComponent, PhysicsComponent, TransformComponent};
use crate::ecs::{find_sorted, Entity};
use crate::events::HitInfo;
use crate::foundation::math::Vec3;
use crate::spatial::OctreeError;

/// Errors that abort a physics tick
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// The broad-phase octree is misconfigured
    #[error("octree broad phase failed: {0}")]
    Octree(#[from] OctreeError),
}

/// Reaction to a resolved contact
///
/// Called once per [`HitInfo`] during the tick that produced it. The
/// default does nothing: hits are only reported, never resolved.
pub trait CollisionResponse: Send {
    /// Handle one hit
    fn handle_hit_info(&mut self, _hit: &HitInfo) {}
}

/// Response that leaves bodies untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResponse;

impl CollisionResponse for NoResponse {}

/// Fixed-tick physics driver
pub struct PhysicsSystem {
    config: PhysicsConfig,
    broad_phase: Box<dyn BroadPhase>,
    response: Box<dyn CollisionResponse>,
}

impl PhysicsSystem {
    /// Create a new physics system using the broad phase named in `config`
    pub fn new(config: PhysicsConfig) -> Self {
        let broad_phase = broad_phase::create_broad_phase(config.broad_phase, config.octree);
        log::debug!("PhysicsSystem: {} broad phase at {} Hz", broad_phase.name(), config.tick_rate_hz);
        Self {
            config,
            broad_phase,
            response: Box::new(NoResponse),
        }
    }

    /// Builder pattern: Replace the collision response hook
    pub fn with_response(mut self, response: Box<dyn CollisionResponse>) -> Self {
        self.response = response;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Name of the active broad phase
    pub fn broad_phase_name(&self) -> &'static str {
        self.broad_phase.name()
    }

    /// Run one tick over the given entity-sorted arrays
    ///
    /// Transforms and physics rows are mutated in place. Returns every hit
    /// of the tick, two per touching pair, in pair order.
    pub fn update_physics(
        &mut self,
        transforms: &mut [TransformComponent],
        physics: &mut [PhysicsComponent],
        colliders: &mut [ColliderComponent],
        dt: f32,
    ) -> Result<Vec<HitInfo>, PhysicsError> {
        let integrated = integrator::update_pos_vel(transforms, physics, dt);
        let candidates = compute_collision_entities(transforms, colliders);
        let pairs = self.broad_phase.find_pairs(&candidates)?;

        let mut hits = Vec::new();
        for &(i, j) in &pairs {
            let (a, b) = (candidates[i].entity, candidates[j].entity);
            let (Some(transform_a), Some(collider_a), Some(transform_b), Some(collider_b)) = (
                find_sorted(transforms, a),
                find_sorted(colliders, a),
                find_sorted(transforms, b),
                find_sorted(colliders, b),
            ) else {
                continue;
            };

            let Some([mut hit_a, mut hit_b]) = collision_check(transform_a, collider_a, transform_b, collider_b) else {
                continue;
            };

            let relative = velocity_of(physics, b) - velocity_of(physics, a);
            hit_a.velocity = relative;
            hit_b.velocity = -relative;
            hits.push(hit_a);
            hits.push(hit_b);
        }

        for hit in &hits {
            self.response.handle_hit_info(hit);
        }

        log::trace!(
            "PhysicsSystem: {} integrated, {} candidates, {} pairs, {} hits",
            integrated,
            candidates.len(),
            pairs.len(),
            hits.len()
        );
        Ok(hits)
    }

    /// Run one tick on an owned snapshot and give it back with the hits
    pub fn step_snapshot(
        &mut self,
        mut snapshot: PhysicsSnapshot,
        dt: f32,
    ) -> Result<(PhysicsSnapshot, Vec<HitInfo>), PhysicsError> {
        let hits = self.update_physics(
            &mut snapshot.transforms,
            &mut snapshot.physics,
            &mut snapshot.colliders,
            dt,
        )?;
        Ok((snapshot, hits))
    }
}

fn velocity_of(physics: &[PhysicsComponent], entity: Entity) -> Vec3 {
    find_sorted(physics, entity).map_or_else(Vec3::zeros, |body| body.velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BroadPhaseMode, OctreeSettings};
    use crate::ecs::components::ColliderShape;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    struct Scene {
        transforms: Vec<TransformComponent>,
        physics: Vec<PhysicsComponent>,
        colliders: Vec<ColliderComponent>,
    }

    impl Scene {
        fn spheres(positions: &[(u32, Vec3)]) -> Self {
            let mut scene = Self {
                transforms: Vec::new(),
                physics: Vec::new(),
                colliders: Vec::new(),
            };
            for &(id, position) in positions {
                let entity = Entity::new(id);
                scene.transforms.push(TransformComponent::from_position(entity, position));
                scene.physics.push(PhysicsComponent::new(entity));
                scene.colliders.push(ColliderComponent::new(entity, ColliderShape::sphere(0.5)));
            }
            scene
        }

        fn tick(&mut self, system: &mut PhysicsSystem, dt: f32) -> Vec<HitInfo> {
            system
                .update_physics(&mut self.transforms, &mut self.physics, &mut self.colliders, dt)
                .unwrap()
        }
    }

    #[test]
    fn test_touching_spheres_report_both_sides() {
        let mut scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(0.4, 0.0, 0.0))]);
        scene.physics[1].velocity = Vec3::new(-1.0, 0.0, 0.0);

        let hits = scene.tick(&mut PhysicsSystem::new(PhysicsConfig::default()), 0.0);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, Entity::new(1));
        assert_eq!(hits[1].entity, Entity::new(2));
        assert_relative_eq!(hits[0].velocity, Vec3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(hits[1].velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(hits[0].normal, Vec3::x());
    }

    #[test]
    fn test_distant_spheres_no_hits() {
        let mut scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(10.0, 0.0, 0.0))]);

        assert!(scene.tick(&mut PhysicsSystem::new(PhysicsConfig::default()), 1.0 / 30.0).is_empty());
        assert!(!scene.transforms[0].collider_bounds_outdated);
    }

    #[test]
    fn test_mirrored_sphere_still_collides() {
        let mut scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(0.5, 0.0, 0.0))]);
        scene.transforms[0].set_scale(Vec3::new(-1.0, 1.0, 1.0));

        let hits = scene.tick(&mut PhysicsSystem::new(PhysicsConfig::default()), 0.0);

        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].normal, Vec3::x());
    }

    #[test]
    fn test_body_without_physics_has_zero_velocity() {
        let mut scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(0.2, 0.0, 0.0))]);
        scene.physics.remove(0);
        scene.physics[0].velocity = Vec3::new(0.0, 2.0, 0.0);

        let hits = scene.tick(&mut PhysicsSystem::new(PhysicsConfig::default()), 0.0);

        assert_relative_eq!(hits[0].velocity, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_octree_mode_same_hits() {
        let positions: Vec<(u32, Vec3)> = (0..40)
            .map(|i| (i, Vec3::new((i % 7) as f32 * 0.2, (i / 7) as f32 * 0.2, 0.0)))
            .collect();

        let mut brute = Scene::spheres(&positions);
        let mut octree = Scene::spheres(&positions);
        let mut brute_system = PhysicsSystem::new(PhysicsConfig::default());
        let mut octree_system =
            PhysicsSystem::new(PhysicsConfig::default().with_broad_phase(BroadPhaseMode::Octree));

        assert_eq!(octree_system.broad_phase_name(), "octree");
        assert_eq!(brute.tick(&mut brute_system, 0.1), octree.tick(&mut octree_system, 0.1));
    }

    #[test]
    fn test_bad_octree_range_is_fatal() {
        let mut scene = Scene::spheres(&[(1, Vec3::new(1.0, 1.0, 1.0)), (2, Vec3::new(1.1, 1.0, 1.0)), (3, Vec3::new(1.2, 1.0, 1.0))]);
        let config = PhysicsConfig::default()
            .with_broad_phase(BroadPhaseMode::Octree)
            .with_octree(OctreeSettings { half_range: 6, split_threshold: 2 });
        let mut system = PhysicsSystem::new(config);

        let result = system.update_physics(&mut scene.transforms, &mut scene.physics, &mut scene.colliders, 0.0);

        assert!(matches!(result, Err(PhysicsError::Octree(OctreeError::RangeNotSubdividable { .. }))));
    }

    #[test]
    fn test_response_sees_every_hit() {
        struct Counter(Arc<Mutex<usize>>);
        impl CollisionResponse for Counter {
            fn handle_hit_info(&mut self, _hit: &HitInfo) {
                *self.0.lock().unwrap() += 1;
            }
        }

        let count = Arc::new(Mutex::new(0));
        let mut system = PhysicsSystem::new(PhysicsConfig::default()).with_response(Box::new(Counter(count.clone())));
        let mut scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(0.1, 0.0, 0.0)), (3, Vec3::new(0.2, 0.0, 0.0))]);

        let hits = scene.tick(&mut system, 0.0);

        assert_eq!(hits.len(), 6);
        assert_eq!(*count.lock().unwrap(), 6);
    }

    #[test]
    fn test_step_snapshot_on_worker_thread() {
        let scene = Scene::spheres(&[(1, Vec3::zeros()), (2, Vec3::new(3.0, 0.0, 0.0))]);
        let mut snapshot = PhysicsSnapshot {
            transforms: scene.transforms,
            physics: scene.physics,
            colliders: scene.colliders,
        };
        snapshot.physics[0].velocity = Vec3::new(1.0, 0.0, 0.0);

        let buffer = SnapshotBuffer::new();
        let producer = buffer.clone();
        let worker = std::thread::spawn(move || {
            let mut system = PhysicsSystem::new(PhysicsConfig::default());
            let (stepped, hits) = system.step_snapshot(snapshot, 0.5).unwrap();
            producer.publish(stepped);
            hits.len()
        });

        assert_eq!(worker.join().unwrap(), 0);
        let latest = buffer.take_latest().expect("worker published");
        assert_relative_eq!(latest.transforms[0].position, Vec3::new(0.5, 0.0, 0.0));
    }
}
