use crate::camera::Camera;
use crate::node::Node;
use crate::tower::Tower;

/// Side length of one level-0 cell, in camera pixels.
pub const CELL_PX: i64 = 4;

/// Pixels a cell's square is pulled in from each edge of its slot.
pub const CELL_INSET_PX: i64 = 1;

/// Draws a level-0 cell as a filled square inset into its slot.
pub fn draw_cell(cam: &mut Camera, cell: &Node) {
    let side = CELL_PX - 2 * CELL_INSET_PX;

    cam.draw_rect(
        cell.global_x as i64 * CELL_PX + CELL_INSET_PX,
        cell.global_y as i64 * CELL_PX + CELL_INSET_PX,
        side,
        side,
    );
}

/// Draws an octant as the outline of the region its children actually cover.
pub fn draw_octant(cam: &mut Camera, oct: &Node) {
    cam.draw_outline(
        oct.global_x as i64 * CELL_PX,
        oct.global_y as i64 * CELL_PX,
        oct.x_span as i64 * CELL_PX,
        oct.y_span as i64 * CELL_PX,
    );
}

/// Draws every cell of `tower`, plus the outlines of the octants of `level` when `level >= 1`.
///
/// A `level` that hasn't been built yet draws the cells only.
pub fn draw_tower(cam: &mut Camera, tower: &Tower, level: usize) {
    let Some(cells) = tower.level(0) else {
        return;
    };

    for cell in &cells.items {
        draw_cell(cam, cell);
    }

    if level == 0 {
        return;
    }

    if let Some(octants) = tower.level(level) {
        for oct in &octants.items {
            draw_octant(cam, oct);
        }
    }
}
