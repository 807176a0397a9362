pub mod app;
pub mod camera;
pub mod dimension;
pub mod events;
pub mod io;
pub mod level;
pub mod node;
pub mod render;
pub mod session;
pub mod svg;
pub mod tower;

mod parse_util;

/// Side length of a field, in cells.
pub type Dimension = u16;

/// Coordinate within one level's grid.
pub type LevelOffset = u16;

/// Position or extent in level-0 cell units, shared by every level.
pub type GlobalOffset = u32;

pub type ScreenSize = u16;
