//! Spatial partitioning
//!
//! A generic integer-keyed [`Octree`] and the cube subdivision built on it
//! by the octree broad phase.

pub mod octree;
pub mod scene_tree;

pub use octree::{Octree, OctreeNode, NodeId, octant_index};
pub use scene_tree::{SceneTree, CubeNode, OctreeError};
