//! Drift Worm - a side-scrolling worm arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (locomotion, spawning, collisions, bird AI)
//! - `render`: Frame builder emitting renderer-agnostic draw primitives
//! - `audio`: Sound cue mapping for simulation events
//! - `quotes`: Bird taunt store with JSON persistence and background generation
//! - `color`: RGB palette and fade laws shared by effects and rendering

pub mod audio;
pub mod color;
pub mod quotes;
pub mod render;
pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen size (1080p play field)
    pub const SCREEN_W: f32 = 1920.0;
    pub const SCREEN_H: f32 = 1080.0;
    /// Fixed simulation rate; all per-tick constants assume this
    pub const TICK_HZ: u32 = 60;

    /// Leftward world shift per tick
    pub const SCROLL_SPEED: f32 = 8.0;
    /// Worm head/segment radius at full scale
    pub const WORM_RADIUS: f32 = 40.0;
    /// Grid cell size for spawn placement
    pub const GRID_SIZE: f32 = WORM_RADIUS * 3.0;
    pub const GRID_COLS: i32 = (SCREEN_W / GRID_SIZE) as i32;
    pub const GRID_ROWS: i32 = (SCREEN_H / GRID_SIZE) as i32;

    /// Worm locomotion
    pub const MOVE_SPEED: f32 = 24.0;
    pub const WORM_FRICTION: f32 = 0.7;
    pub const WORM_ACCEL: f32 = 0.2;
    pub const WORM_DRIFT_FORCE: f32 = 0.002;
    /// Horizontal rest position the worm drifts back to when idle
    pub const REST_X: f32 = SCREEN_W * 0.35;
    pub const REST_X_THRESHOLD: f32 = 10.0;
    /// Edge slowdown buffer = radius * this
    pub const EDGE_BUFFER_MULT: f32 = 5.0;
    /// Right edge of the movement zone
    pub const MOVEMENT_ZONE_END: f32 = SCREEN_W;
    /// Minimum distance between consecutive segments
    pub const MIN_SEG_DIST: f32 = SCROLL_SPEED;
    /// Maximum per-tick catch-up speed for trailing segments
    pub const SEG_CATCHUP_SPEED: f32 = MOVE_SPEED * 2.0;
    /// Spawn-in scale animation per tick (segments, food, bomb apples)
    pub const GROW_RATE: f32 = 0.1;
    pub const WORM_START_SEGMENTS: usize = 5;
    pub const SEGMENTS_PER_FOOD: usize = 3;
    /// Tail fraction removed on bomb-apple contact
    pub const SHRINK_FRACTION: f32 = 0.2;
    /// Red feedback tint duration after a bird bite
    pub const RED_TINT_TICKS: u32 = 15;

    /// Death animation
    pub const DYING_SEG_SPEED: f32 = 10.0;
    pub const DYING_DAMPING: f32 = 0.98;
    pub const DYING_FADE_PER_TICK: f32 = 3.0;
    pub const EYE_FALL_SPEED: f32 = 5.0;

    /// Eyes
    pub const EYE_RADIUS: f32 = 12.0;
    pub const PUPIL_RADIUS: f32 = 6.0;
    pub const EYE_OFFSET_FORWARD: f32 = 35.0;
    pub const EYE_OFFSET_SIDE: f32 = 14.0;
    pub const EYE_LERP_FACTOR: f32 = 0.15;
    pub const PUPIL_X_FREQ: f32 = 0.05;
    pub const PUPIL_X_AMP: f32 = 3.0;
    pub const PUPIL_Y_FREQ: f32 = 0.05;
    pub const PUPIL_Y_AMP: f32 = 2.0;

    /// Collectibles
    pub const FOOD_RADIUS: f32 = 20.0;
    pub const BOMB_APPLE_RADIUS: f32 = 28.0;
    pub const BOMB_APPLE_PULSE_STEP: f32 = 0.15;
    /// Extra reach on food pickup and bomb proximity checks
    pub const PICKUP_MARGIN: f32 = 20.0;

    /// Bombs (player projectile)
    pub const BOMB_RADIUS: f32 = 28.0;
    pub const BOMB_SPEED: f32 = 20.0;
    pub const BOMB_FUSE_TICKS: u32 = 3 * TICK_HZ;
    pub const BOMB_COST_SEGMENTS: usize = 2;
    /// Initial arming delay before the first bomb can be fired
    pub const BOMB_ARM_DELAY_TICKS: u32 = TICK_HZ;

    /// Detonation
    pub const EXPLOSION_RADIUS: f32 = 400.0;
    pub const EXPLOSION_LIFETIME: u32 = 20;
    pub const EXPLOSION_CORE_START: f32 = 0.3;
    pub const EXPLOSION_CORE_GROWTH: f32 = 0.7;
    pub const EXPLOSION_INNER_FADE_END: f32 = 0.6;
    pub const EXPLOSION_INNER_RADIUS_FACTOR: f32 = 0.4;
    pub const EXPLOSION_INNER_BOOST: f32 = 1.2;
    pub const EXPLOSION_RING_COUNT: u32 = 6;
    pub const EXPLOSION_RING_RADIUS_STEP: f32 = 15.0;
    pub const EXPLOSION_RING_PROGRESS_OFFSET: f32 = 0.1;
    pub const EXPLOSION_RING_THICKNESS_BASE: f32 = 14.0;
    pub const EXPLOSION_RING_THICKNESS_STEP: f32 = 2.0;

    /// Particles
    pub const FOOD_PARTICLE_COUNT: usize = 10;
    pub const FOOD_PARTICLE_SPEED: f32 = 10.0;
    pub const FOOD_PARTICLE_LIFETIME: u32 = 30;
    pub const FOOD_PARTICLE_SIZE: f32 = 4.0;
    pub const BOMB_PARTICLE_COUNT: usize = 20;
    pub const BOMB_PARTICLE_SPEED: f32 = 15.0;
    pub const BOMB_PARTICLE_LIFETIME: u32 = 40;
    pub const BOMB_PARTICLE_SIZE: f32 = 6.0;
    pub const BREAK_PARTICLE_COUNT: usize = 15;
    pub const BREAK_PARTICLE_SPEED: f32 = 15.0;
    pub const BREAK_PARTICLE_LIFETIME: u32 = 40;
    pub const BREAK_PARTICLE_SIZE: f32 = 6.0;
    pub const PARTICLE_GLOW_BRIGHTNESS: f32 = 0.5;
    pub const PARTICLE_GLOW_SIZE_OFFSET: f32 = 2.0;

    /// Obstacles
    pub const OBSTACLE_TILES_MIN: i32 = 1;
    pub const OBSTACLE_TILES_MAX: i32 = 3;
    pub const OBSTACLE_CULL_OFFSET: f32 = 3200.0;
    pub const OBSTACLE_RECT_BORDER: f32 = 4.0;

    /// Spawn scheduling (distance-traveled thresholds)
    pub const FOOD_SPAWN_DIST_MIN: f32 = 600.0;
    pub const FOOD_SPAWN_DIST_MAX: f32 = 1400.0;
    pub const BOMB_APPLE_SPAWN_DIST_MIN: f32 = 1200.0;
    pub const BOMB_APPLE_SPAWN_DIST_MAX: f32 = 2800.0;
    pub const OBSTACLE_SPAWN_DIST_MIN: f32 = 300.0;
    pub const OBSTACLE_SPAWN_DIST_MAX: f32 = 600.0;
    /// Grid cells between successive spawns of one category
    pub const SPAWN_INTERVAL_CELLS_MIN: u32 = 2;
    pub const SPAWN_INTERVAL_CELLS_MAX: u32 = 4;
    /// Rejection sampling budget before unchecked fallback placement
    pub const SPAWN_ATTEMPTS: u32 = 100;
    /// Entities are culled this far past the left edge (per-type multiplier)
    pub const CULL_RADIUS_MULT: f32 = 2.0;

    /// Bird
    pub const BIRD_SIZE: f32 = 240.0;
    pub const BIRD_HEALTH: i32 = 5;
    pub const BIRD_HOVER_AMPLITUDE: f32 = 100.0;
    pub const BIRD_HOVER_FREQ: f32 = 0.02;
    pub const BIRD_FLY_IN_SPEED: f32 = 15.0;
    pub const BIRD_CHARGE_SPEED: f32 = 15.0;
    pub const BIRD_CHARGE_DELAY_TICKS: u32 = 120;
    pub const BIRD_FALL_SPEED: f32 = 3.0;
    pub const BIRD_IMMUNITY_TICKS: u32 = TICK_HZ;
    pub const BIRD_SHAKE_TICKS: u32 = 10;
    pub const BIRD_SHAKE_AMP: f32 = 5.0;
    pub const BIRD_HEALTH_SHOW_TICKS: u32 = TICK_HZ;
    pub const BIRD_RESPAWN_TICKS: u32 = 10 * TICK_HZ;
    /// Hover anchor x; the bird flies in from 200 px further right
    pub const BIRD_ANCHOR_X: f32 = SCREEN_W - 100.0;
    pub const BIRD_FLY_IN_OFFSET: f32 = 200.0;

    /// Self-collision sampling: every 5th segment from index 25, once the
    /// worm is longer than 25. Deliberate leniency for coiled segments.
    pub const SELF_COLLISION_MIN_LEN: usize = 25;
    pub const SELF_COLLISION_START: usize = 25;
    pub const SELF_COLLISION_STRIDE: usize = 5;

    /// Scoring
    pub const BIRD_KILL_SCORE: i64 = 10;
}

/// Convert a grid cell to the pixel-space center of that cell
#[inline]
pub fn grid_to_pixel(gx: i32, gy: i32) -> Vec2 {
    Vec2::new(
        gx as f32 * consts::GRID_SIZE + consts::GRID_SIZE / 2.0,
        gy as f32 * consts::GRID_SIZE + consts::GRID_SIZE / 2.0,
    )
}

/// Convert a pixel position to the grid cell containing it
#[inline]
pub fn pixel_to_grid(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / consts::GRID_SIZE).floor() as i32,
        (pos.y / consts::GRID_SIZE).floor() as i32,
    )
}
