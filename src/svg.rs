use std::collections::HashMap;
use std::fmt;

use crate::node::NodeKey;
use crate::tower::Tower;

/// How far a cell's square is pulled in from each edge of its unit slot.
pub const CELL_INSET: f64 = 0.125;

/// Pixel length of the longer side of the document.
pub const MAX_SVG_DIMENSION: f64 = 500.0;

/// What a node is drawn as.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A filled square inside a cell's unit slot.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// A group holding the primitives of an octant's children.
    Group { children: Vec<NodeKey> },
}

/// The primitives of a tower, keyed by the node they stand for.
#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    primitives: HashMap<NodeKey, Primitive>,
    roots: Vec<NodeKey>,
}

impl Scene {
    pub fn from_tower(tower: &Tower) -> Self {
        let dims = tower.dimensions();
        let mut primitives = HashMap::with_capacity(tower.levels().iter().map(|l| l.len()).sum());

        for (index, level) in tower.levels().iter().enumerate() {
            for (i, node) in level.items.iter().enumerate() {
                let (x, y) = level.coords_of(i);
                let key = NodeKey::new(index, x, y);

                let primitive = if index == 0 {
                    Primitive::Rect {
                        x: node.global_x as f64 + CELL_INSET,
                        y: node.global_y as f64 + CELL_INSET,
                        width: 1.0 - 2.0 * CELL_INSET,
                        height: 1.0 - 2.0 * CELL_INSET,
                    }
                } else {
                    Primitive::Group {
                        children: tower.children(key).collect(),
                    }
                };

                primitives.insert(key, primitive);
            }
        }

        Self {
            width: dims.x() as u32,
            height: dims.y() as u32,
            primitives,
            roots: tower.roots().collect(),
        }
    }

    pub fn get(&self, key: NodeKey) -> Option<&Primitive> {
        self.primitives.get(&key)
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Pixel size of the document. The longer side is [`MAX_SVG_DIMENSION`] and the other keeps
    /// the field's aspect ratio.
    pub fn pixel_size(&self) -> (f64, f64) {
        let (w, h) = (self.width as f64, self.height as f64);

        if self.width > self.height {
            (MAX_SVG_DIMENSION, MAX_SVG_DIMENSION * h / w)
        } else {
            (MAX_SVG_DIMENSION * w / h, MAX_SVG_DIMENSION)
        }
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, key: NodeKey, depth: usize) -> fmt::Result {
        let Some(primitive) = self.primitives.get(&key) else {
            return Ok(());
        };

        let indent = "  ".repeat(depth);
        let id = format!("n-{}-{}-{}", key.level, key.x, key.y);

        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
            } => writeln!(
                f,
                r#"{indent}<rect id="{id}" x="{x}" y="{y}" width="{width}" height="{height}" fill="black"/>"#
            ),
            Primitive::Group { children } => {
                writeln!(f, r#"{indent}<g id="{id}">"#)?;

                for &child in children {
                    self.write_node(f, child, depth + 1)?;
                }

                writeln!(f, "{indent}</g>")
            }
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pw, ph) = self.pixel_size();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0, 0, {}, {}" width="{pw}" height="{ph}">"#,
            self.width, self.height
        )?;

        for &root in &self.roots {
            self.write_node(f, root, 1)?;
        }

        writeln!(f, "</svg>")
    }
}
