//! Component trait

use super::Entity;

/// Common surface of every component row
///
/// Rows live in arrays sorted by [`Component::entity`]. A row whose
/// [`Component::is_valid`] is false has been logically deleted and must be
/// skipped by every reader.
pub trait Component: 'static + Send + Sync {
    /// Owning entity
    fn entity(&self) -> Entity;

    /// False once the row has been logically deleted
    fn is_valid(&self) -> bool;

    /// Mark the row deleted (or revive it)
    fn set_valid(&mut self, valid: bool);
}

/// Implement [`Component`] for a struct with `entity` and `valid` fields
macro_rules! impl_component {
    ($ty:ty) => {
        impl $crate::ecs::Component for $ty {
            fn entity(&self) -> $crate::ecs::Entity {
                self.entity
            }

            fn is_valid(&self) -> bool {
                self.valid
            }

            fn set_valid(&mut self, valid: bool) {
                self.valid = valid;
            }
        }
    };
}

pub(crate) use impl_component;
