//! Physics component
//!
//! Linear motion state of an entity. Only the integrator and the script
//! bridge write to it; there is no angular state.

use serde::{Serialize, Deserialize};

use crate::ecs::component::impl_component;
use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// Velocity, acceleration and mass of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsComponent {
    /// Owning entity
    #[serde(skip)]
    pub entity: Entity,
    /// False once logically deleted
    #[serde(skip, default = "valid_default")]
    pub valid: bool,
    /// Units per second
    #[serde(rename = "Velocity")]
    pub velocity: Vec3,
    /// Units per second squared
    #[serde(rename = "Acceleration")]
    pub acceleration: Vec3,
    /// Mass (unused by the integrator, carried for scripts)
    #[serde(rename = "Mass")]
    pub mass: f32,
}

fn valid_default() -> bool {
    true
}

impl_component!(PhysicsComponent);

impl PhysicsComponent {
    /// At rest, unit mass
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            valid: true,
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            mass: 1.0,
        }
    }

    /// Builder pattern: Set owning entity
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = entity;
        self
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: Set acceleration
    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Builder pattern: Set mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Momentum (mass * velocity)
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let body = PhysicsComponent::new(Entity::new(2))
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .with_acceleration(Vec3::new(0.0, -9.8, 0.0))
            .with_mass(2.0);

        assert_eq!(body.momentum(), Vec3::new(2.0, 0.0, 0.0));
        assert!(body.valid);
    }

    #[test]
    fn test_persisted_names() {
        let body = PhysicsComponent::new(Entity::new(7)).with_velocity(Vec3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["Velocity"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["Acceleration"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(json["Mass"], serde_json::json!(1.0));
        assert!(json.get("entity").is_none());

        let loaded: PhysicsComponent = serde_json::from_value(json).unwrap();
        assert!(loaded.valid);
        assert_eq!(loaded.entity, Entity::default());
        assert_eq!(loaded.velocity, body.velocity);
    }
}
