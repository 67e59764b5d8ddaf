//! # Scene Physics
//!
//! The physics and collision core of a component-based scene engine.
//!
//! ## Features
//!
//! - **Sorted component storage**: per-type component arrays kept in ascending
//!   entity order and walked together with a multi-way merge join
//! - **Integration**: fixed-tick velocity/position integration
//! - **Bounds**: cached axis-aligned bounds per collider, refreshed through dirty flags
//! - **Broad phase**: brute-force pairwise AABB testing or an adaptive octree
//! - **Narrow phase**: shape-pair contact resolution producing hit events
//! - **Script boundary**: hit events serialized to the JSON shape scripts consume
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_physics::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut transforms = ComponentArray::new();
//!     let mut physics = ComponentArray::new();
//!     let mut colliders = ComponentArray::new();
//!
//!     let entity = Entity::new(1);
//!     transforms.insert(TransformComponent::new(entity));
//!     physics.insert(PhysicsComponent::new(entity));
//!     colliders.insert(ColliderComponent::new(entity, ColliderShape::sphere(0.5)));
//!
//!     let mut system = PhysicsSystem::new(PhysicsConfig::default());
//!     let hits = system.update_physics(
//!         transforms.as_mut_slice(),
//!         physics.as_mut_slice(),
//!         colliders.as_mut_slice(),
//!         1.0 / 30.0,
//!     )?;
//!     println!("{} hits this tick", hits.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod spatial;
pub mod physics;
pub mod events;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Mat4, Quat, IVec3},
            time::FixedTimestep,
        },
        ecs::{
            Entity, Component, ComponentArray,
            components::{
                TransformComponent, PhysicsComponent, ColliderComponent,
                ColliderShape, Bounds,
            },
        },
        physics::{PhysicsSystem, PhysicsError, CollisionEntity},
        events::{HitInfo, HitEventQueue, ScriptBridge, DispatchError},
        core::config::{EngineConfig, PhysicsConfig, OctreeSettings, BroadPhaseMode},
        config::{Config, ConfigError},
    };
}
