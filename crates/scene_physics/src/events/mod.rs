//! Hit events and their delivery to scripts
//! Key principles:
//! - One HitInfo per participant, each delivered exactly once
//! - Wire form is a JSON object with fixed field names
//! - Delivery order is by recipient entity, stable within one entity

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// Contact report addressed to one entity
///
/// Serialized for scripts as
/// `{"ID": n, "hitPoint": [x, y, z], "velocity": [x, y, z], "collidingNormal": [x, y, z]}`
/// where `ID` is the other entity. The recipient is not part of the payload;
/// it selects which script receives it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitInfo {
    /// Entity notified of the hit
    #[serde(skip)]
    pub entity: Entity,
    /// Entity that was hit
    #[serde(rename = "ID")]
    pub colliding_entity: Entity,
    /// World-space contact point
    #[serde(rename = "hitPoint")]
    pub hit_point: Vec3,
    /// Velocity of the other entity relative to the recipient
    pub velocity: Vec3,
    /// Contact normal pointing away from the recipient
    #[serde(rename = "collidingNormal")]
    pub normal: Vec3,
}

impl HitInfo {
    /// Hit on `entity` by `colliding_entity`; velocity starts at zero
    pub fn new(entity: Entity, colliding_entity: Entity, hit_point: Vec3, normal: Vec3) -> Self {
        Self {
            entity,
            colliding_entity,
            hit_point,
            velocity: Vec3::zeros(),
            normal,
        }
    }

    /// The same contact seen from the other entity
    pub fn mirrored(&self) -> Self {
        Self {
            entity: self.colliding_entity,
            colliding_entity: self.entity,
            hit_point: self.hit_point,
            velocity: -self.velocity,
            normal: -self.normal,
        }
    }

    /// Wire form handed to scripts
    pub fn to_json(&self) -> Result<serde_json::Value, DispatchError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Dispatch failures
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The hit could not be turned into JSON
    #[error("failed to serialize hit: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The script side rejected the hit
    #[error("script for {entity} failed: {message}")]
    Script {
        /// Recipient entity
        entity: Entity,
        /// Script error text
        message: String,
    },
}

/// Receiver of hit notifications on the scripting side
pub trait ScriptBridge {
    /// Deliver one hit to the script attached to `entity`
    fn on_hit(&mut self, entity: Entity, hit: &serde_json::Value) -> Result<(), DispatchError>;
}

/// Hits collected during a tick, waiting for dispatch
#[derive(Debug, Default, Clone)]
pub struct HitEventQueue {
    hits: Vec<HitInfo>,
}

impl HitEventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one hit
    pub fn push(&mut self, hit: HitInfo) {
        self.hits.push(hit);
    }

    /// Number of queued hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Queued hits in arrival order
    pub fn hits(&self) -> &[HitInfo] {
        &self.hits
    }

    /// Deliver and drain every queued hit
    ///
    /// Hits are ordered by recipient first (stable, so arrival order is kept
    /// per entity). On the first error dispatch stops and the remaining hits
    /// are discarded. Returns the number delivered.
    pub fn dispatch(&mut self, bridge: &mut dyn ScriptBridge) -> Result<usize, DispatchError> {
        self.hits.sort_by_key(|hit| hit.entity);

        let mut delivered = 0;
        for hit in self.hits.drain(..) {
            let payload = hit.to_json()?;
            bridge.on_hit(hit.entity, &payload)?;
            delivered += 1;
        }

        log::trace!("HitEventQueue: delivered {} hits", delivered);
        Ok(delivered)
    }
}

impl Extend<HitInfo> for HitEventQueue {
    fn extend<I: IntoIterator<Item = HitInfo>>(&mut self, iter: I) {
        self.hits.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingBridge {
        received: Vec<(Entity, serde_json::Value)>,
        fail_on: Option<Entity>,
    }

    impl ScriptBridge for RecordingBridge {
        fn on_hit(&mut self, entity: Entity, hit: &serde_json::Value) -> Result<(), DispatchError> {
            if self.fail_on == Some(entity) {
                return Err(DispatchError::Script {
                    entity,
                    message: "onHit threw".to_string(),
                });
            }
            self.received.push((entity, hit.clone()));
            Ok(())
        }
    }

    fn hit(entity: u32, other: u32) -> HitInfo {
        HitInfo::new(
            Entity::new(entity),
            Entity::new(other),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_wire_format() {
        let mut info = hit(4, 9);
        info.velocity = Vec3::new(-1.0, 0.0, 0.5);

        assert_eq!(
            info.to_json().unwrap(),
            json!({
                "ID": 9,
                "hitPoint": [1.0, 2.0, 3.0],
                "velocity": [-1.0, 0.0, 0.5],
                "collidingNormal": [0.0, 1.0, 0.0],
            })
        );
    }

    #[test]
    fn test_mirrored_flips_direction() {
        let mut info = hit(1, 2);
        info.velocity = Vec3::new(3.0, 0.0, 0.0);
        let other = info.mirrored();

        assert_eq!(other.entity, Entity::new(2));
        assert_eq!(other.colliding_entity, Entity::new(1));
        assert_eq!(other.normal, -info.normal);
        assert_eq!(other.velocity, -info.velocity);
        assert_eq!(other.hit_point, info.hit_point);
    }

    #[test]
    fn test_dispatch_orders_by_recipient_and_drains() {
        let mut queue = HitEventQueue::new();
        queue.extend([hit(3, 1), hit(1, 3), hit(3, 2), hit(2, 3)]);

        let mut bridge = RecordingBridge::default();
        assert_eq!(queue.dispatch(&mut bridge).unwrap(), 4);
        assert!(queue.is_empty());

        let order: Vec<(u32, u64)> = bridge
            .received
            .iter()
            .map(|(entity, json)| (entity.id(), json["ID"].as_u64().unwrap()))
            .collect();
        assert_eq!(order, vec![(1, 3), (2, 3), (3, 1), (3, 2)]);

        // Nothing is delivered twice
        assert_eq!(queue.dispatch(&mut bridge).unwrap(), 0);
        assert_eq!(bridge.received.len(), 4);
    }

    #[test]
    fn test_bridge_error_stops_dispatch() {
        let mut queue = HitEventQueue::new();
        queue.extend([hit(1, 2), hit(2, 1), hit(3, 1)]);

        let mut bridge = RecordingBridge {
            fail_on: Some(Entity::new(2)),
            ..Default::default()
        };
        let err = queue.dispatch(&mut bridge).unwrap_err();

        assert!(matches!(err, DispatchError::Script { entity, .. } if entity == Entity::new(2)));
        assert_eq!(bridge.received.len(), 1);
        assert!(queue.is_empty());
    }
}
