//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 Hz, per-tick constants)
//! - Seeded RNG only
//! - No rendering, audio, I/O or clock dependencies

pub mod bird;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod state;
pub mod tick;
pub mod worm;

pub use bird::{Bird, BirdState};
pub use collision::{circles_overlap, point_in_cell};
pub use effects::{Explosion, Particle, ParticleShape};
pub use entities::{Bomb, BombApple, Food, Obstacle, ObstacleColor, Shiftable};
pub use state::{GameEvent, GameState, RunStats};
pub use tick::{tick, TickInput};
pub use worm::{Segment, Worm};
