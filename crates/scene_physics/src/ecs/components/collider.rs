//! Collider component
//!
//! A collider pairs a shape with the bounds cached for it. The bounds are
//! local (relative to the entity position) and only meaningful while the
//! owning transform's `collider_bounds_outdated` flag is clear; the bounds
//! calculator in [`crate::physics::bounds`] is the only writer.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::ecs::component::impl_component;
use crate::ecs::Entity;
use crate::foundation::math::{MinMax, Vec3};

/// Persisted shape tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CollisionType {
    /// Axis-aligned box
    Aabb = 0,
    /// Box following the entity rotation
    OrientedBox = 1,
    /// Sphere
    Sphere = 2,
    /// Capsule along the local Y axis
    Capsule = 3,
}

impl TryFrom<u8> for CollisionType {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Aabb),
            1 => Ok(Self::OrientedBox),
            2 => Ok(Self::Sphere),
            3 => Ok(Self::Capsule),
            other => Err(format!("unknown CollisionType {other}")),
        }
    }
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aabb => "AABB",
            Self::OrientedBox => "OrientedBox",
            Self::Sphere => "Sphere",
            Self::Capsule => "Capsule",
        };
        f.write_str(name)
    }
}

/// Collision shape with its parameters, in unscaled local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box
    Aabb {
        /// Half size per axis
        half_extents: Vec3,
    },
    /// Oriented box
    OrientedBox {
        /// Half size per axis
        half_extents: Vec3,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Capsule: a segment of length `2 * half_height` along Y, swept by `radius`
    Capsule {
        /// Radius
        radius: f32,
        /// Half the length of the core segment
        half_height: f32,
    },
}

impl ColliderShape {
    /// Sphere of `radius`
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Axis-aligned box with the given half extents
    pub fn aabb(half_extents: Vec3) -> Self {
        Self::Aabb { half_extents }
    }

    /// Oriented box with the given half extents
    pub fn oriented_box(half_extents: Vec3) -> Self {
        Self::OrientedBox { half_extents }
    }

    /// Capsule along the local Y axis
    pub fn capsule(radius: f32, half_height: f32) -> Self {
        Self::Capsule { radius, half_height }
    }

    /// Persisted tag for this shape
    pub fn collision_type(&self) -> CollisionType {
        match self {
            Self::Aabb { .. } => CollisionType::Aabb,
            Self::OrientedBox { .. } => CollisionType::OrientedBox,
            Self::Sphere { .. } => CollisionType::Sphere,
            Self::Capsule { .. } => CollisionType::Capsule,
        }
    }
}

/// Axis-aligned box stored as centre and half size
///
/// `extents` is a half size and the box spans `centre ± extents`. A sphere's
/// extents are its scaled radius, so under this reading a radius-0.5 sphere
/// at unit scale has 1×1×1 bounds that enclose it. Halving the extents again
/// would leave spheres wider than their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Box centre
    pub centre: Vec3,
    /// Half size per axis; the box spans `centre ± extents`
    pub extents: Vec3,
}

impl Bounds {
    /// Create from centre and extents
    pub fn new(centre: Vec3, extents: Vec3) -> Self {
        Self { centre, extents }
    }

    /// Smallest bounds containing both corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            centre: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// (min, max) corners
    pub fn min_max(&self) -> MinMax {
        (self.centre - self.extents, self.centre + self.extents)
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: &Vec3) -> Self {
        Self {
            centre: self.centre + offset,
            extents: self.extents,
        }
    }
}

/// ECS collider component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr", into = "ShapeRepr")]
pub struct ColliderComponent {
    /// Owning entity
    pub entity: Entity,
    /// False once logically deleted
    pub valid: bool,
    /// Collision shape
    pub shape: ColliderShape,
    /// Cached local bounds
    pub bounds: Bounds,
}

impl_component!(ColliderComponent);

impl ColliderComponent {
    /// New collider; bounds are filled in by the first bounds pass
    pub fn new(entity: Entity, shape: ColliderShape) -> Self {
        Self {
            entity,
            valid: true,
            shape,
            bounds: Bounds::default(),
        }
    }

    /// Builder pattern: Set owning entity
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = entity;
        self
    }

    /// Persisted tag of the shape
    pub fn collision_type(&self) -> CollisionType {
        self.shape.collision_type()
    }
}

/// `Extents` comes in three arities
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ExtentsRepr {
    Radius(f32),
    Pair([f32; 2]),
    Triple([f32; 3]),
}

#[derive(Serialize, Deserialize)]
struct ShapeRepr {
    #[serde(rename = "CollisionType")]
    collision_type: u8,
    #[serde(rename = "Extents")]
    extents: ExtentsRepr,
}

impl From<ColliderComponent> for ShapeRepr {
    fn from(collider: ColliderComponent) -> Self {
        let collision_type = collider.collision_type() as u8;
        let extents = match collider.shape {
            ColliderShape::Aabb { half_extents } | ColliderShape::OrientedBox { half_extents } => {
                ExtentsRepr::Triple(half_extents.into())
            }
            ColliderShape::Sphere { radius } => ExtentsRepr::Radius(radius),
            ColliderShape::Capsule { radius, half_height } => ExtentsRepr::Pair([radius, half_height]),
        };
        Self { collision_type, extents }
    }
}

impl TryFrom<ShapeRepr> for ColliderComponent {
    type Error = String;

    fn try_from(repr: ShapeRepr) -> Result<Self, Self::Error> {
        let collision_type = CollisionType::try_from(repr.collision_type)?;
        let shape = match (collision_type, repr.extents) {
            (CollisionType::Aabb, ExtentsRepr::Triple(e)) => ColliderShape::aabb(Vec3::from(e)),
            (CollisionType::OrientedBox, ExtentsRepr::Triple(e)) => ColliderShape::oriented_box(Vec3::from(e)),
            (CollisionType::Sphere, ExtentsRepr::Radius(r)) => ColliderShape::sphere(r),
            // Older scenes store sphere extents as a vector with the radius first
            (CollisionType::Sphere, ExtentsRepr::Triple([r, _, _])) => ColliderShape::sphere(r),
            (CollisionType::Capsule, ExtentsRepr::Pair([r, h])) => ColliderShape::capsule(r, h),
            (ty, _) => return Err(format!("Extents do not match CollisionType {ty}")),
        };
        Ok(Self::new(Entity::default(), shape))
    }
}
