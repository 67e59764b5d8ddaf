//! Generic octree over integer keys
//!
//! Every node carries an integer key that doubles as its split point. A key
//! descends into one of eight child slots chosen per axis: the low side when
//! it is strictly smaller than the node key on that axis, the high side
//! otherwise. Nodes live in one `Vec` and refer to their children by
//! [`NodeId`], so dropping a deep tree never recurses.
//!
//! The tree does not rebalance. Callers shape it by inserting keys in a
//! deliberate order (see [`crate::spatial::scene_tree`]).

use crate::foundation::math::IVec3;

/// Index of a node inside its [`Octree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode<T> {
    key: IVec3,
    value: T,
    children: [Option<NodeId>; 8],
    count: usize,
}

impl<T> OctreeNode<T> {
    fn new(key: IVec3, value: T) -> Self {
        Self {
            key,
            value,
            children: [None; 8],
            count: 1,
        }
    }

    /// Split point of this node
    pub fn key(&self) -> IVec3 {
        self.key
    }

    /// Payload
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Payload, mutably
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Child in octant `slot` (0..8)
    pub fn child(&self, slot: usize) -> Option<NodeId> {
        self.children.get(slot).copied().flatten()
    }

    /// Occupied child slots, in octant order
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|child| *child)
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Subtree size as of the last [`Octree::update_count`]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Octant slot of `key` relative to a node keyed at `split`
///
/// Bit 0 is x, bit 1 is y, bit 2 is z; a set bit means the high side.
pub fn octant_index(key: &IVec3, split: &IVec3) -> usize {
    let x_bit = usize::from(key.x >= split.x);
    let y_bit = usize::from(key.y >= split.y);
    let z_bit = usize::from(key.z >= split.z);
    (z_bit << 2) | (y_bit << 1) | x_bit
}

/// Arena-backed octree
#[derive(Debug, Clone)]
pub struct Octree<T> {
    nodes: Vec<OctreeNode<T>>,
}

impl<T> Octree<T> {
    /// Create a tree holding only a root node
    pub fn new(root_key: IVec3, root_value: T) -> Self {
        Self {
            nodes: vec![OctreeNode::new(root_key, root_value)],
        }
    }

    /// The root node id
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: a tree always has its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node
    ///
    /// Ids are only handed out by this tree, and nodes are never removed, so
    /// an id from this tree is always in range.
    pub fn node(&self, id: NodeId) -> &OctreeNode<T> {
        &self.nodes[id.0]
    }

    /// Borrow a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> &mut OctreeNode<T> {
        &mut self.nodes[id.0]
    }

    /// Insert `value` at `key`
    ///
    /// Descends from the root. Returns the new node, or `None` when a node
    /// with the same key already exists on the path; the existing payload is
    /// left untouched.
    pub fn insert(&mut self, key: IVec3, value: T) -> Option<NodeId> {
        let mut current = self.root();
        loop {
            let node = &self.nodes[current.0];
            if node.key == key {
                return None;
            }

            let slot = octant_index(&key, &node.key);
            let next = node.children[slot];
            match next {
                Some(child) => current = child,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(OctreeNode::new(key, value));
                    self.nodes[current.0].children[slot] = Some(id);
                    return Some(id);
                }
            }
        }
    }

    /// Find the node keyed exactly at `key`
    pub fn find(&self, key: &IVec3) -> Option<NodeId> {
        let mut current = self.root();
        loop {
            let node = &self.nodes[current.0];
            if node.key == *key {
                return Some(current);
            }
            current = node.children[octant_index(key, &node.key)]?;
        }
    }

    /// Every node of the subtree at `from`, parent before children
    pub fn pre_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            order.push(id);
            // Reversed so that slot 0 is visited first
            stack.extend(self.nodes[id.0].children.iter().rev().filter_map(|c| *c));
        }

        order
    }

    /// Every childless node of the whole tree
    pub fn roots(&self) -> Vec<NodeId> {
        self.pre_order(self.root())
            .into_iter()
            .filter(|id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// Recompute cached subtree sizes below `from`; returns the size at `from`
    pub fn update_count(&mut self, from: NodeId) -> usize {
        // Reversed pre-order sees every child before its parent
        for id in self.pre_order(from).into_iter().rev() {
            let count = 1 + self.nodes[id.0]
                .children()
                .map(|child| self.nodes[child.0].count)
                .sum::<usize>();
            self.nodes[id.0].count = count;
        }
        self.nodes[from.0].count
    }
}
