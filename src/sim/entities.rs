//! World entities: collectibles, the player's bombs, and wall obstacles
//!
//! Grid-anchored entities (food, bomb apples, obstacles) store a cell plus a
//! pixel x-offset that the world scroll decrements each tick; free-moving
//! bombs store a plain position. All of them share the scroll behavior
//! through [`Shiftable`].

use glam::Vec2;

use super::collision::{circles_overlap, point_in_cell};
use crate::color::{self, Rgb};
use crate::consts::*;
use crate::grid_to_pixel;

/// Per-tick leftward world shift, implemented by every world entity
pub trait Shiftable {
    fn shift_left(&mut self, amount: f32);
}

/// An apple the worm can eat
#[derive(Debug, Clone)]
pub struct Food {
    pub cell: (i32, i32),
    pub x_offset: f32,
    /// Spawn-in scale in [0, 1]
    pub scale: f32,
    pub radius: f32,
}

impl Food {
    pub fn new(gx: i32, gy: i32, x_offset: f32) -> Self {
        Self {
            cell: (gx, gy),
            x_offset,
            scale: 0.0,
            radius: FOOD_RADIUS,
        }
    }

    pub fn pos(&self) -> Vec2 {
        let base = grid_to_pixel(self.cell.0, self.cell.1);
        Vec2::new(base.x + self.x_offset, base.y)
    }

    pub fn update(&mut self) {
        if self.scale < 1.0 {
            self.scale = (self.scale + GROW_RATE).min(1.0);
        }
    }

    pub fn touches_head(&self, head: Vec2, head_radius: f32) -> bool {
        circles_overlap(
            head,
            head_radius,
            self.pos(),
            self.radius * self.scale,
            PICKUP_MARGIN,
        )
    }
}

impl Shiftable for Food {
    fn shift_left(&mut self, amount: f32) {
        self.x_offset -= amount;
    }
}

/// A hazard apple that detonates on contact and shrinks the worm
#[derive(Debug, Clone)]
pub struct BombApple {
    pub cell: (i32, i32),
    pub x_offset: f32,
    pub scale: f32,
    pub radius: f32,
    /// Visual pulse phase
    pub pulse: f32,
}

impl BombApple {
    pub fn new(gx: i32, gy: i32, x_offset: f32) -> Self {
        Self {
            cell: (gx, gy),
            x_offset,
            scale: 0.0,
            radius: BOMB_APPLE_RADIUS,
            pulse: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        let base = grid_to_pixel(self.cell.0, self.cell.1);
        Vec2::new(base.x + self.x_offset, base.y)
    }

    pub fn update(&mut self) {
        if self.scale < 1.0 {
            self.scale = (self.scale + GROW_RATE).min(1.0);
        }
        self.pulse += BOMB_APPLE_PULSE_STEP;
    }

    pub fn touches_head(&self, head: Vec2, head_radius: f32) -> bool {
        circles_overlap(head, head_radius, self.pos(), self.radius * self.scale, 0.0)
    }
}

impl Shiftable for BombApple {
    fn shift_left(&mut self, amount: f32) {
        self.x_offset -= amount;
    }
}

/// A bomb fired from the worm's head along its facing angle
#[derive(Debug, Clone)]
pub struct Bomb {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks since launch; detonates at [`BOMB_FUSE_TICKS`]
    pub ticks: u32,
    pub active: bool,
    pub radius: f32,
}

impl Bomb {
    pub fn new(pos: Vec2, facing_angle: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(facing_angle.cos(), facing_angle.sin()) * BOMB_SPEED,
            ticks: 0,
            active: true,
            radius: BOMB_RADIUS,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.ticks += 1;
    }

    pub fn fuse_expired(&self) -> bool {
        self.ticks >= BOMB_FUSE_TICKS
    }

    /// Contact test against any obstacle tile, with the shared margin
    pub fn touches_obstacle(&self, obstacles: &[Obstacle]) -> bool {
        obstacles
            .iter()
            .any(|obs| obs.hit_by_point(self.pos, PICKUP_MARGIN))
    }
}

impl Shiftable for Bomb {
    fn shift_left(&mut self, amount: f32) {
        self.pos.x -= amount;
    }
}

/// Color tag for obstacle tiles (drives both fill and break particles)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleColor {
    Gray,
    Orange,
    Purple,
}

impl ObstacleColor {
    pub const ALL: [ObstacleColor; 3] =
        [ObstacleColor::Gray, ObstacleColor::Orange, ObstacleColor::Purple];

    pub fn rgb(self) -> Rgb {
        match self {
            ObstacleColor::Gray => color::GRAY,
            ObstacleColor::Orange => color::ORANGE,
            ObstacleColor::Purple => color::PURPLE,
        }
    }
}

/// A wall of 1-3 vertically stacked grid tiles sharing one x-offset
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub cells: Vec<(i32, i32)>,
    pub x_offset: f32,
    pub color: ObstacleColor,
}

impl Obstacle {
    pub fn new(cells: Vec<(i32, i32)>, x_offset: f32, color: ObstacleColor) -> Self {
        Self {
            cells,
            x_offset,
            color,
        }
    }

    /// Pixel-space centers of every occupied tile
    pub fn cell_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cells.iter().map(|&(gx, gy)| {
            let base = grid_to_pixel(gx, gy);
            Vec2::new(base.x + self.x_offset, base.y)
        })
    }

    /// Average of the tile centers; target for the detonation radius test
    pub fn center(&self) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;
        for c in self.cell_centers() {
            sum += c;
            count += 1;
        }
        if count == 0 {
            Vec2::ZERO
        } else {
            sum / count as f32
        }
    }

    /// Point-in-rect test against every tile
    pub fn hit_by_point(&self, p: Vec2, margin: f32) -> bool {
        self.cell_centers().any(|c| point_in_cell(p, c, margin))
    }

    /// Grid rows this obstacle occupies (spawn placement avoids them)
    pub fn rows(&self) -> impl Iterator<Item = i32> + '_ {
        self.cells.iter().map(|&(_, gy)| gy)
    }
}

impl Shiftable for Obstacle {
    fn shift_left(&mut self, amount: f32) {
        self.x_offset -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_scale_reaches_one_exactly() {
        let mut food = Food::new(2, 3, 0.0);
        assert_eq!(food.scale, 0.0);
        let steps = (1.0 / GROW_RATE).ceil() as u32;
        for i in 0..steps {
            food.update();
            assert!(food.scale <= 1.0, "overshot at step {}", i);
        }
        assert_eq!(food.scale, 1.0);
        food.update();
        assert_eq!(food.scale, 1.0);
    }

    #[test]
    fn test_food_pickup_uses_scaled_radius() {
        let mut food = Food::new(0, 0, 0.0);
        let center = food.pos();
        // At scale 0 only the head radius + margin reach
        let near = center + Vec2::new(WORM_RADIUS + PICKUP_MARGIN - 1.0, 0.0);
        let far = center + Vec2::new(WORM_RADIUS + PICKUP_MARGIN + FOOD_RADIUS, 0.0);
        assert!(food.touches_head(near, WORM_RADIUS));
        assert!(!food.touches_head(far, WORM_RADIUS));
        for _ in 0..10 {
            food.update();
        }
        assert!(food.touches_head(far - Vec2::new(0.5, 0.0), WORM_RADIUS));
    }

    #[test]
    fn test_bomb_flies_along_facing() {
        let mut bomb = Bomb::new(Vec2::ZERO, 0.0);
        bomb.update();
        assert_eq!(bomb.pos, Vec2::new(BOMB_SPEED, 0.0));
        assert!(!bomb.fuse_expired());
        for _ in 1..BOMB_FUSE_TICKS {
            bomb.update();
        }
        assert!(bomb.fuse_expired());
    }

    #[test]
    fn test_obstacle_hit_and_center() {
        let obs = Obstacle::new(vec![(0, 2), (0, 3)], 0.0, ObstacleColor::Gray);
        let first = grid_to_pixel(0, 2);
        assert!(obs.hit_by_point(first, 0.0));
        assert!(!obs.hit_by_point(first - Vec2::new(GRID_SIZE, 0.0), 0.0));
        let center = obs.center();
        assert_eq!(center.x, first.x);
        assert_eq!(center.y, (grid_to_pixel(0, 2).y + grid_to_pixel(0, 3).y) / 2.0);
    }

    #[test]
    fn test_shift_left_moves_anchor_offset() {
        let mut food = Food::new(1, 1, 100.0);
        let before = food.pos();
        food.shift_left(SCROLL_SPEED);
        assert_eq!(food.pos().x, before.x - SCROLL_SPEED);
        assert_eq!(food.pos().y, before.y);
    }
}
