use tracing::debug;

use crate::LevelOffset;
use crate::dimension::Dimensions;
use crate::level::Level;
use crate::node::Bound;
use crate::node::Node;
use crate::node::NodeID;
use crate::node::NodeKey;

/// Build level 0: one unit cell per `(x, y)`, outer loop over `x`.
pub fn build_level0(dims: Dimensions) -> Level<Node> {
    let mut level = Level::with_capacity(dims.x(), dims.y());

    for x in 0..dims.x() {
        for y in 0..dims.y() {
            level.items.push(Node::cell(x, y));
        }
    }

    level
}

/// Build level `index` (`index >= 1`) on top of `previous`.
///
/// The size of the new level comes from the level-0 dimensions `dims` divided by `2^index`,
/// rounded up, rather than from halving `previous`. Each octant collects the items of
/// `previous` in its 2×2 block that actually exist, so octants on the right and bottom edges
/// may have fewer than four children and a span narrower than `2^index`.
pub fn build_next_level(previous: &Level<Node>, index: usize, dims: Dimensions) -> Level<Node> {
    debug_assert!(index >= 1, "level 0 is built by build_level0");

    let divisor = 1u32 << index;
    let width = (dims.x() as u32).div_ceil(divisor) as LevelOffset;
    let height = (dims.y() as u32).div_ceil(divisor) as LevelOffset;

    let mut level = Level::with_capacity(width, height);

    for level_x in 0..width {
        for level_y in 0..height {
            let mut oct = Node::octant(index, level_x, level_y);
            let mut bound = Bound::new(oct.global_x, oct.global_y);

            for dx in 0..2 {
                for dy in 0..2 {
                    let x = level_x as i32 * 2 + dx;
                    let y = level_y as i32 * 2 + dy;

                    let Some((i, child)) = previous.get_indexed(x, y) else {
                        continue;
                    };

                    oct.children.push(i);
                    bound.add(child);
                }
            }

            (oct.x_span, oct.y_span) = bound.span();
            level.items.push(oct);
        }
    }

    debug!(index, width, height, "built level");

    level
}

/// The stack of levels built so far for a field, level 0 at the bottom.
#[derive(Debug, Clone)]
pub struct Tower {
    dims: Dimensions,
    levels: Vec<Level<Node>>,
}

impl Tower {
    /// A tower holding only level 0.
    pub fn new(dims: Dimensions) -> Self {
        Tower {
            dims,
            levels: vec![build_level0(dims)],
        }
    }

    /// A tower stepped all the way up to its `1×1` level.
    pub fn build_full(dims: Dimensions) -> Self {
        let mut tower = Tower::new(dims);
        while tower.step().is_some() {}

        tower
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn levels(&self) -> &[Level<Node>] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level<Node>> {
        self.levels.get(index)
    }

    /// The highest level built so far.
    pub fn top(&self) -> &Level<Node> {
        // `new` always builds level 0
        &self.levels[self.levels.len() - 1]
    }

    /// Index of the highest level built so far.
    pub fn top_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// Whether the top level has collapsed to a single node, or is empty.
    pub fn is_complete(&self) -> bool {
        self.top().is_root()
    }

    /// Build the next level regardless of whether the tower is already complete. Returns the
    /// index of the new level.
    pub fn push_level(&mut self) -> usize {
        let index = self.levels.len();
        let level = build_next_level(self.top(), index, self.dims);
        self.levels.push(level);

        index
    }

    /// Build the next level, unless the top level is already `1×1`.
    pub fn step(&mut self) -> Option<usize> {
        if self.is_complete() {
            return None;
        }

        Some(self.push_level())
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.level(key.level)?.get(key.x as i32, key.y as i32)
    }

    /// Keys of the children of the node at `key`, in insertion order.
    pub fn children(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        let children: &[NodeID] = match self.node(key) {
            Some(node) if key.level > 0 => &node.children,
            _ => &[],
        };

        let below = key.level.saturating_sub(1);

        children.iter().map(move |&i| {
            let (x, y) = self.levels[below].coords_of(i);

            NodeKey::new(below, x, y)
        })
    }

    /// Keys of every node in the top level.
    pub fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        let top = self.top_index();
        let level = self.top();

        (0..level.len()).map(move |i| {
            let (x, y) = level.coords_of(i);

            NodeKey::new(top, x, y)
        })
    }
}
