//! Sorted component storage
//!
//! One `Vec` per component type, kept in ascending entity order. Deleting a
//! component only clears its `valid` flag; the row stays in place until
//! [`ComponentArray::compact`] is called, so systems walking the array must
//! skip invalid rows rather than rely on the array being dense.

use super::{Component, Entity};

/// Entity-sorted array of one component type
#[derive(Debug, Clone)]
pub struct ComponentArray<T: Component> {
    components: Vec<T>,
}

impl<T: Component> Default for ComponentArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentArray<T> {
    /// Create an empty array
    pub fn new() -> Self {
        Self { components: Vec::new() }
    }

    /// Create an empty array with room for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self { components: Vec::with_capacity(capacity) }
    }

    /// Build from arbitrary rows, sorting them by entity
    pub fn from_unsorted(mut components: Vec<T>) -> Self {
        components.sort_by_key(Component::entity);
        Self { components }
    }

    /// Insert a component at its sorted position
    ///
    /// An existing row for the same entity (valid or not) is overwritten in
    /// place. Returns the row index.
    pub fn insert(&mut self, component: T) -> usize {
        let entity = component.entity();
        match self.position(entity) {
            Ok(index) => {
                self.components[index] = component;
                index
            }
            Err(index) => {
                self.components.insert(index, component);
                index
            }
        }
    }

    /// Logically delete the component of `entity`
    ///
    /// Returns false when the entity had no valid row.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.position(entity) {
            Ok(index) if self.components[index].is_valid() => {
                self.components[index].set_valid(false);
                true
            }
            _ => false,
        }
    }

    /// Drop every invalid row
    pub fn compact(&mut self) {
        let before = self.components.len();
        self.components.retain(Component::is_valid);
        let removed = before - self.components.len();
        if removed > 0 {
            log::trace!("ComponentArray: compacted {} invalid rows", removed);
        }
    }

    /// Get the valid component of `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.position(entity)
            .ok()
            .map(|index| &self.components[index])
            .filter(|component| component.is_valid())
    }

    /// Get the valid component of `entity` mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.position(entity) {
            Ok(index) if self.components[index].is_valid() => Some(&mut self.components[index]),
            _ => None,
        }
    }

    /// Whether `entity` has a valid row
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Number of rows, invalid ones included
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when there are no rows at all
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of valid rows
    pub fn valid_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_valid()).count()
    }

    /// Iterate valid rows in entity order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.components.iter().filter(|c| c.is_valid())
    }

    /// All rows, invalid ones included
    pub fn as_slice(&self) -> &[T] {
        &self.components
    }

    /// All rows mutably; callers must not reorder entities
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.components
    }

    /// Take the rows out, e.g. to hand them to another thread
    pub fn into_vec(self) -> Vec<T> {
        self.components
    }

    fn position(&self, entity: Entity) -> Result<usize, usize> {
        self.components.binary_search_by_key(&entity, Component::entity)
    }
}

impl<T: Component> From<Vec<T>> for ComponentArray<T> {
    fn from(components: Vec<T>) -> Self {
        Self::from_unsorted(components)
    }
}

/// Binary-search a sorted slice for the valid row of `entity`
pub fn find_sorted<T: Component>(components: &[T], entity: Entity) -> Option<&T> {
    components
        .binary_search_by_key(&entity, Component::entity)
        .ok()
        .map(|index| &components[index])
        .filter(|component| component.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PhysicsComponent;

    fn ids(array: &ComponentArray<PhysicsComponent>) -> Vec<u32> {
        array.as_slice().iter().map(|c| c.entity.id()).collect()
    }

    #[test]
    fn test_insert_keeps_entity_order() {
        let mut array = ComponentArray::new();
        for id in [5, 1, 3, 2] {
            array.insert(PhysicsComponent::new(Entity::new(id)));
        }

        assert_eq!(ids(&array), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_remove_is_logical() {
        let mut array = ComponentArray::new();
        for id in [1, 2, 3] {
            array.insert(PhysicsComponent::new(Entity::new(id)));
        }

        assert!(array.remove(Entity::new(2)));
        assert!(!array.remove(Entity::new(2)));
        assert_eq!(array.len(), 3);
        assert_eq!(array.valid_count(), 2);
        assert!(array.get(Entity::new(2)).is_none());

        array.compact();
        assert_eq!(ids(&array), vec![1, 3]);
    }

    #[test]
    fn test_insert_revives_deleted_row() {
        let mut array = ComponentArray::new();
        array.insert(PhysicsComponent::new(Entity::new(4)));
        array.remove(Entity::new(4));

        array.insert(PhysicsComponent::new(Entity::new(4)).with_mass(3.0));

        assert_eq!(array.len(), 1);
        assert_eq!(array.get(Entity::new(4)).map(|c| c.mass), Some(3.0));
    }

    #[test]
    fn test_find_sorted_skips_invalid() {
        let mut rows = vec![
            PhysicsComponent::new(Entity::new(1)),
            PhysicsComponent::new(Entity::new(2)),
        ];
        rows[1].valid = false;

        assert!(find_sorted(&rows, Entity::new(1)).is_some());
        assert!(find_sorted(&rows, Entity::new(2)).is_none());
        assert!(find_sorted(&rows, Entity::new(9)).is_none());
    }
}
