//! Broad-phase pair generation
//!
//! A broad phase turns the tick's candidate list into the index pairs whose
//! absolute bounds overlap. Both implementations return the same pairs;
//! the octree only avoids testing pairs that are far apart.

use std::collections::BTreeSet;

use super::bounds::CollisionEntity;
use super::intersection::aabb_aabb;
use crate::core::config::{BroadPhaseMode, OctreeSettings};
use crate::spatial::{OctreeError, SceneTree};

/// Candidate pair generator
pub trait BroadPhase: Send {
    /// Index pairs `(i, j)`, `i < j`, ascending, whose bounds overlap
    fn find_pairs(&mut self, candidates: &[CollisionEntity]) -> Result<Vec<(usize, usize)>, OctreeError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Build the broad phase selected by `mode`
pub fn create_broad_phase(mode: BroadPhaseMode, octree: OctreeSettings) -> Box<dyn BroadPhase> {
    match mode {
        BroadPhaseMode::BruteForce => Box::new(BruteForceBroadPhase),
        BroadPhaseMode::Octree => Box::new(OctreeBroadPhase::new(octree)),
    }
}

/// Every candidate against every other
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForceBroadPhase;

impl BroadPhase for BruteForceBroadPhase {
    fn find_pairs(&mut self, candidates: &[CollisionEntity]) -> Result<Vec<(usize, usize)>, OctreeError> {
        let boxes: Vec<_> = candidates.iter().map(|c| c.bounds.min_max()).collect();
        let mut pairs = Vec::new();

        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if aabb_aabb(&boxes[i], &boxes[j]) {
                    pairs.push((i, j));
                }
            }
        }

        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}

/// Pairs drawn from the leaves of a per-tick [`SceneTree`]
#[derive(Debug, Clone, Copy)]
pub struct OctreeBroadPhase {
    settings: OctreeSettings,
}

impl OctreeBroadPhase {
    /// Create with the given subdivision settings
    pub fn new(settings: OctreeSettings) -> Self {
        Self { settings }
    }
}

impl BroadPhase for OctreeBroadPhase {
    fn find_pairs(&mut self, candidates: &[CollisionEntity]) -> Result<Vec<(usize, usize)>, OctreeError> {
        let bounds: Vec<_> = candidates.iter().map(|c| c.bounds).collect();
        let scene = SceneTree::build(&bounds, &self.settings)?;

        let tested: BTreeSet<(usize, usize)> = scene.candidate_pairs(bounds.len());
        let total = tested.len();
        let pairs: Vec<_> = tested
            .into_iter()
            .filter(|&(i, j)| aabb_aabb(&bounds[i].min_max(), &bounds[j].min_max()))
            .collect();

        log::trace!(
            "OctreeBroadPhase: {} nodes, {} tested, {} overlapping",
            scene.tree().len(),
            total,
            pairs.len()
        );
        Ok(pairs)
    }

    fn name(&self) -> &'static str {
        "octree"
    }
}
