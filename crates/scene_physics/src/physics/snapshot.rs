//! Snapshot hand-off for running physics on its own thread
//!
//! The physics thread owns a private copy of the three component arrays.
//! When a tick finishes it publishes the whole copy; the consuming thread
//! takes the latest one at a safe point and swaps it in. Nothing is mutated
//! in place across the thread boundary.

use std::sync::{Arc, Mutex, PoisonError};

use crate::ecs::components::{ColliderComponent, PhysicsComponent, TransformComponent};
use crate::ecs::ComponentArray;

/// Owned copy of the arrays one physics tick works on
#[derive(Debug, Clone, Default)]
pub struct PhysicsSnapshot {
    /// Transform rows, entity-sorted
    pub transforms: Vec<TransformComponent>,
    /// Physics rows, entity-sorted
    pub physics: Vec<PhysicsComponent>,
    /// Collider rows, entity-sorted
    pub colliders: Vec<ColliderComponent>,
}

impl PhysicsSnapshot {
    /// Copy the current contents of the live arrays
    pub fn capture(
        transforms: &ComponentArray<TransformComponent>,
        physics: &ComponentArray<PhysicsComponent>,
        colliders: &ComponentArray<ColliderComponent>,
    ) -> Self {
        Self {
            transforms: transforms.as_slice().to_vec(),
            physics: physics.as_slice().to_vec(),
            colliders: colliders.as_slice().to_vec(),
        }
    }

    /// Split back into component arrays
    pub fn into_arrays(
        self,
    ) -> (
        ComponentArray<TransformComponent>,
        ComponentArray<PhysicsComponent>,
        ComponentArray<ColliderComponent>,
    ) {
        (self.transforms.into(), self.physics.into(), self.colliders.into())
    }
}

/// Single-slot mailbox between the physics thread and its consumer
///
/// Publishing replaces an unconsumed snapshot; only the newest state matters.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuffer {
    slot: Arc<Mutex<Option<PhysicsSnapshot>>>,
}

impl SnapshotBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand over a finished snapshot; returns the one it displaced, if any
    pub fn publish(&self, snapshot: PhysicsSnapshot) -> Option<PhysicsSnapshot> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let displaced = slot.replace(snapshot);
        if displaced.is_some() {
            log::debug!("SnapshotBuffer: consumer fell behind, dropping an unread snapshot");
        }
        displaced
    }

    /// Take the newest snapshot, leaving the buffer empty
    pub fn take_latest(&self) -> Option<PhysicsSnapshot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
