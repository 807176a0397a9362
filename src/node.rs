use core::fmt::Debug;

use crate::GlobalOffset;
use crate::LevelOffset;

/// Index of a [`Node`] in the `items` of the level it was created in.
pub type NodeID = usize;

/// Stable identity of a node anywhere in a tower: its level and its coordinates within that
/// level's grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub level: usize,
    pub x: LevelOffset,
    pub y: LevelOffset,
}

impl NodeKey {
    pub const fn new(level: usize, x: LevelOffset, y: LevelOffset) -> Self {
        Self { level, x, y }
    }
}

impl Debug for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}({}, {})", self.level, self.x, self.y)
    }
}

/// A single node of the tower.
///
/// At level 0 a node is a cell: it has no children and spans exactly one unit. Above that a
/// node is an octant aggregating up to four nodes of the level below.
#[derive(Clone, PartialEq, Eq)]
pub struct Node {
    pub level_x: LevelOffset,
    pub level_y: LevelOffset,

    pub global_x: GlobalOffset,
    pub global_y: GlobalOffset,

    pub x_span: GlobalOffset,
    pub y_span: GlobalOffset,

    /// Indices into the level directly below, in `dx`-major order. These do not own anything,
    /// the children live in their own level.
    pub children: Vec<NodeID>,
}

impl Node {
    /// A unit cell at `(x, y)`.
    pub fn cell(x: LevelOffset, y: LevelOffset) -> Self {
        Node {
            level_x: x,
            level_y: y,
            global_x: x as GlobalOffset,
            global_y: y as GlobalOffset,
            x_span: 1,
            y_span: 1,
            children: vec![],
        }
    }

    /// An octant of level `level` at `(level_x, level_y)`, with no children yet.
    pub fn octant(level: usize, level_x: LevelOffset, level_y: LevelOffset) -> Self {
        Node {
            level_x,
            level_y,
            global_x: (level_x as GlobalOffset) << level,
            global_y: (level_y as GlobalOffset) << level,
            x_span: 0,
            y_span: 0,
            children: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Bottom-right corner (exclusive) of the region this node covers.
    pub fn max(&self) -> (GlobalOffset, GlobalOffset) {
        (self.global_x + self.x_span, self.global_y + self.y_span)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({}, {}) @ ({}, {}) span {}x{}, children: {:?}]",
            self.level_x,
            self.level_y,
            self.global_x,
            self.global_y,
            self.x_span,
            self.y_span,
            self.children
        )
    }
}

/// Running bottom-right bound of a set of nodes, anchored at some origin.
///
/// The bound starts at the origin itself, so a bound that never saw a node has a zero extent.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    origin: (GlobalOffset, GlobalOffset),
    max: (GlobalOffset, GlobalOffset),
}

impl Bound {
    pub fn new(x: GlobalOffset, y: GlobalOffset) -> Self {
        Bound {
            origin: (x, y),
            max: (x, y),
        }
    }

    /// Extend the bound to include `node`.
    pub fn add(&mut self, node: &Node) {
        let (x, y) = node.max();

        self.max.0 = self.max.0.max(x);
        self.max.1 = self.max.1.max(y);
    }

    /// Width and height covered between the origin and the running max.
    pub fn span(&self) -> (GlobalOffset, GlobalOffset) {
        (self.max.0 - self.origin.0, self.max.1 - self.origin.1)
    }
}
