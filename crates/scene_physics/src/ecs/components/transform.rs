//! Transform component
//!
//! Pure data: position, rotation and scale of one entity plus the change
//! flags other systems key off.
//!
//! - `updated` is raised on any position/rotation/scale change and cleared
//!   by whichever consumer (camera follow, sound sync) reads it.
//! - `collider_bounds_outdated` / `mesh_bounds_outdated` mark the cached
//!   local bounds of the collider and mesh as stale. Only rotation and scale
//!   affect local bounds; translation is applied afterwards.

use serde::{Serialize, Deserialize};

use crate::ecs::component::impl_component;
use crate::ecs::Entity;
use crate::foundation::math::{self, Mat4, Quat, Quaternion, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformRepr", into = "TransformRepr")]
pub struct TransformComponent {
    /// Owning entity
    pub entity: Entity,
    /// False once logically deleted
    pub valid: bool,
    /// Set on every spatial change, cleared by consumers
    pub updated: bool,
    /// World space position
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Unit rotation quaternion
    pub rotation: Quat,
    /// Collider bounds must be recomputed before use
    pub collider_bounds_outdated: bool,
    /// Mesh bounds must be recomputed before use
    pub mesh_bounds_outdated: bool,
}

impl_component!(TransformComponent);

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Entity::default())
    }
}

impl TransformComponent {
    /// Identity transform for `entity`; bounds start out outdated
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            valid: true,
            updated: true,
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Quat::identity(),
            collider_bounds_outdated: true,
            mesh_bounds_outdated: true,
        }
    }

    /// Create from position only
    pub fn from_position(entity: Entity, position: Vec3) -> Self {
        Self {
            position,
            ..Self::new(entity)
        }
    }

    /// Builder pattern: Set owning entity (used after loading from a scene file)
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = entity;
        self
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Move to `position`
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.updated = true;
    }

    /// Offset the position by `delta`
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.updated = true;
    }

    /// Replace the rotation; local bounds become stale
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.mark_changed_shape();
    }

    /// Replace the scale; local bounds become stale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.mark_changed_shape();
    }

    /// Consume the `updated` flag, returning its previous value
    pub fn take_updated(&mut self) -> bool {
        std::mem::replace(&mut self.updated, false)
    }

    /// Rotation and scale only (translation zeroed)
    pub fn rotation_scale_matrix(&self) -> Mat4 {
        math::rotation_scale_matrix(&self.rotation, &self.scale)
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        math::model_matrix(&self.position, &self.rotation, &self.scale)
    }

    fn mark_changed_shape(&mut self) {
        self.updated = true;
        self.collider_bounds_outdated = true;
        self.mesh_bounds_outdated = true;
    }
}

/// Persisted form: `Position`, `Rotation` as `[s, i, j, k]`, `Scale`
#[derive(Serialize, Deserialize)]
struct TransformRepr {
    #[serde(rename = "Position")]
    position: [f32; 3],
    #[serde(rename = "Rotation")]
    rotation: [f32; 4],
    #[serde(rename = "Scale")]
    scale: [f32; 3],
}

impl From<TransformComponent> for TransformRepr {
    fn from(t: TransformComponent) -> Self {
        let q = t.rotation.quaternion();
        Self {
            position: t.position.into(),
            rotation: [q.w, q.i, q.j, q.k],
            scale: t.scale.into(),
        }
    }
}

impl From<TransformRepr> for TransformComponent {
    fn from(repr: TransformRepr) -> Self {
        let [s, i, j, k] = repr.rotation.map(math::nan_to_zero);
        let raw = Quaternion::new(s, i, j, k);
        // A zero quaternion cannot be normalized; fall back to identity
        let rotation = Quat::try_new(raw, f32::EPSILON).unwrap_or_else(Quat::identity);

        Self {
            position: Vec3::from(repr.position),
            scale: Vec3::from(repr.scale),
            rotation,
            ..Self::new(Entity::default())
        }
    }
}
