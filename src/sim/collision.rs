//! Collision primitives
//!
//! Everything in this game is either a circle test (worm head vs
//! collectibles, bombs vs the bird) or an axis-aligned point-in-cell test
//! (worm head / bombs vs obstacle tiles).

use glam::Vec2;

use crate::consts::GRID_SIZE;

/// Circle/circle overlap with an optional extra margin
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, margin: f32) -> bool {
    a.distance(b) < ra + rb + margin
}

/// Point-in-rect test against one grid cell centered at `cell_center`,
/// expanded by `margin` on every side
#[inline]
pub fn point_in_cell(p: Vec2, cell_center: Vec2, margin: f32) -> bool {
    let half = GRID_SIZE / 2.0 + margin;
    p.x >= cell_center.x - half
        && p.x <= cell_center.x + half
        && p.y >= cell_center.y - half
        && p.y <= cell_center.y + half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap_boundary() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 0.0);
        // Touching exactly is not an overlap
        assert!(!circles_overlap(a, 10.0, b, 20.0, 0.0));
        assert!(circles_overlap(a, 10.0, b, 20.1, 0.0));
        // Margin extends the reach
        assert!(circles_overlap(a, 10.0, b, 15.0, 5.1));
    }

    #[test]
    fn test_point_in_cell() {
        let center = Vec2::new(60.0, 60.0);
        assert!(point_in_cell(Vec2::new(60.0, 60.0), center, 0.0));
        assert!(point_in_cell(Vec2::new(60.0 + GRID_SIZE / 2.0, 60.0), center, 0.0));
        assert!(!point_in_cell(
            Vec2::new(60.0 + GRID_SIZE / 2.0 + 1.0, 60.0),
            center,
            0.0
        ));
        // Margin expands the rect
        assert!(point_in_cell(
            Vec2::new(60.0 + GRID_SIZE / 2.0 + 1.0, 60.0),
            center,
            2.0
        ));
    }
}
