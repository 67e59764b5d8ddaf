//! Adaptive cube subdivision for the broad phase
//!
//! The root cube is centred on the origin and spans `±half_range` per axis.
//! It is always split into eight seed octants; after that any leaf holding
//! more than `split_threshold` entities is split again at its centre.
//! Entities go into every child cube their bounds touch, and children left
//! with one entity or none are pruned since nothing there can collide.
//!
//! Entities whose bounds are not fully inside the root cube are kept aside
//! in [`SceneTree::overflow`] so the caller can still test them against
//! everything else.

use std::collections::BTreeSet;

use thiserror::Error;

use super::octree::{NodeId, Octree};
use crate::core::config::OctreeSettings;
use crate::ecs::components::Bounds;
use crate::foundation::math::{ivec3_to_vec3, IVec3, MinMax, Vec3};

/// Fatal spatial partitioning errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OctreeError {
    /// The cube cannot be halved on the integer grid
    #[error("cube at {key:?} with half size {half_size} cannot be subdivided on the integer grid")]
    RangeNotSubdividable {
        /// Centre of the offending cube
        key: [i32; 3],
        /// Its half size
        half_size: i32,
    },
    /// A child cube landed on a key already in the tree
    #[error("octree already holds a node at {key:?}")]
    DuplicateKey {
        /// The clashing key
        key: [i32; 3],
    },
}

/// Payload of one cube: its half size and the entities touching it
#[derive(Debug, Clone, Default)]
pub struct CubeNode {
    /// Half the edge length
    pub half_size: i32,
    /// Candidate indices whose bounds touch this cube
    pub entities: Vec<usize>,
}

/// Octree of cubes built over one tick's candidate bounds
#[derive(Debug)]
pub struct SceneTree {
    tree: Octree<CubeNode>,
    overflow: Vec<usize>,
    split_threshold: usize,
}

impl SceneTree {
    /// Seed the eight top-level octants and subdivide until no leaf is over
    /// the threshold or leaves reach unit size
    pub fn build(bounds: &[Bounds], settings: &OctreeSettings) -> Result<Self, OctreeError> {
        let half_range = settings.half_range;
        let limit = half_range as f32;

        let (inside, overflow): (Vec<usize>, Vec<usize>) = (0..bounds.len()).partition(|&i| {
            let (min, max) = bounds[i].min_max();
            min.iter().all(|v| *v >= -limit) && max.iter().all(|v| *v <= limit)
        });
        if !overflow.is_empty() {
            log::debug!(
                "SceneTree: {} of {} entities outside ±{}",
                overflow.len(),
                bounds.len(),
                half_range
            );
        }

        let root_node = CubeNode {
            half_size: half_range,
            entities: inside,
        };
        let mut scene = Self {
            tree: Octree::new(IVec3::zeros(), root_node),
            overflow,
            split_threshold: settings.split_threshold,
        };

        let root = scene.tree.root();
        let mut work = scene.subdivide(root, bounds, false)?;
        while let Some(id) = work.pop() {
            let node = scene.tree.node(id).value();
            if node.entities.len() <= scene.split_threshold || node.half_size <= 1 {
                continue;
            }
            work.extend(scene.subdivide(id, bounds, true)?);
        }

        let nodes = scene.tree.update_count(root);
        log::trace!("SceneTree: {} nodes for {} entities", nodes, bounds.len());
        Ok(scene)
    }

    /// Split the cube at `id` into eight children and hand its entities down
    ///
    /// With `prune` set, children holding fewer than two entities are not
    /// inserted. Returns the ids of the inserted children.
    pub fn subdivide(&mut self, id: NodeId, bounds: &[Bounds], prune: bool) -> Result<Vec<NodeId>, OctreeError> {
        let node = self.tree.node(id);
        let key = node.key();
        let half_size = node.value().half_size;

        if half_size < 2 || half_size % 2 != 0 {
            return Err(OctreeError::RangeNotSubdividable {
                key: key.into(),
                half_size,
            });
        }

        let child_half = half_size / 2;
        let entities = std::mem::take(&mut self.tree.node_mut(id).value_mut().entities);
        let mut inserted = Vec::new();

        for octant in 0..8 {
            let sign = |bit: usize| if octant & bit != 0 { 1 } else { -1 };
            let child_key = key + IVec3::new(sign(1), sign(2), sign(4)) * child_half;
            let region = cube_min_max(&child_key, child_half);

            let members: Vec<usize> = entities
                .iter()
                .copied()
                .filter(|&i| overlaps(&bounds[i].min_max(), &region))
                .collect();
            if prune && members.len() <= 1 {
                continue;
            }

            let child = CubeNode {
                half_size: child_half,
                entities: members,
            };
            let child_id = self
                .tree
                .insert(child_key, child)
                .ok_or(OctreeError::DuplicateKey { key: child_key.into() })?;
            inserted.push(child_id);
        }

        Ok(inserted)
    }

    /// The underlying octree
    pub fn tree(&self) -> &Octree<CubeNode> {
        &self.tree
    }

    /// Entities not fully inside the root cube
    pub fn overflow(&self) -> &[usize] {
        &self.overflow
    }

    /// Index pairs `(i, j)`, `i < j`, sharing a leaf cube
    ///
    /// Overflow entities are paired with every other candidate. The pairs
    /// are not yet tested for overlap.
    pub fn candidate_pairs(&self, candidates: usize) -> BTreeSet<(usize, usize)> {
        let mut pairs = BTreeSet::new();

        for leaf in self.tree.roots() {
            let entities = &self.tree.node(leaf).value().entities;
            for (n, &a) in entities.iter().enumerate() {
                for &b in &entities[n + 1..] {
                    pairs.insert((a.min(b), a.max(b)));
                }
            }
        }

        for &a in &self.overflow {
            for b in (0..candidates).filter(|&b| b != a) {
                pairs.insert((a.min(b), a.max(b)));
            }
        }

        pairs
    }
}

/// Closed region covered by the cube centred at `key`
pub fn cube_min_max(key: &IVec3, half_size: i32) -> MinMax {
    let centre = ivec3_to_vec3(*key);
    let half = Vec3::repeat(half_size as f32);
    (centre - half, centre + half)
}

fn overlaps(a: &MinMax, b: &MinMax) -> bool {
    (0..3).all(|axis| a.0[axis] <= b.1[axis] && a.1[axis] >= b.0[axis])
}
