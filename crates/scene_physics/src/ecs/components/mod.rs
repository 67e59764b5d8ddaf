//! ECS Components
//!
//! Pure data components consumed by the physics core.

pub mod transform;
pub mod physics;
pub mod collider;

pub use transform::TransformComponent;
pub use physics::PhysicsComponent;
pub use collider::{ColliderComponent, ColliderShape, CollisionType, Bounds};
