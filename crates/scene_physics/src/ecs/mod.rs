//! Entity-Component storage
//!
//! Components are kept as plain structs in per-type arrays sorted by entity
//! id (see [`ComponentArray`]); systems walk several arrays together with the
//! merge joins in [`join`].

pub mod entity;
pub mod component;
pub mod storage;
pub mod join;
pub mod components;

pub use entity::Entity;
pub use component::Component;
pub use storage::{ComponentArray, find_sorted};
pub use join::{join2, join2_mut, join3_mut};
