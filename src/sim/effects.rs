//! Time-bounded visual effects: expanding-ring explosions and particles
//!
//! Both are pure functions of a tick counter against a fixed lifetime and
//! are shifted by the world scroll like everything else. The explosion's
//! obstacle destruction happens once at detonation time in the tick loop;
//! nothing here feeds back into gameplay.

use glam::Vec2;

use super::entities::Shiftable;
use crate::color::{Rgb, EXPLOSION_ORANGE, WASHOUT_WHITE, WASHOUT_YELLOW};
use crate::consts::*;

/// An expanding layered-ring explosion
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub ticks: u32,
}

/// One ring layer of an explosion, ready for the renderer
#[derive(Debug, Clone, Copy)]
pub struct RingLayer {
    pub radius: f32,
    pub thickness: f32,
    pub color: Rgb,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, ticks: 0 }
    }

    /// Advance one tick; returns whether the explosion is still alive
    pub fn update(&mut self) -> bool {
        self.ticks += 1;
        self.ticks < EXPLOSION_LIFETIME
    }

    pub fn progress(&self) -> f32 {
        self.ticks as f32 / EXPLOSION_LIFETIME as f32
    }

    /// Time-interpolated outer radius of the visual (not the damage radius)
    pub fn rendered_radius(&self) -> f32 {
        EXPLOSION_RADIUS * (EXPLOSION_CORE_START + self.progress() * EXPLOSION_CORE_GROWTH)
    }

    /// Bright inner core, present only early in the effect
    pub fn inner_core(&self) -> Option<(f32, Rgb)> {
        let progress = self.progress();
        if progress >= EXPLOSION_INNER_FADE_END {
            return None;
        }
        let strength = 1.0 - progress / EXPLOSION_INNER_FADE_END;
        let color = EXPLOSION_ORANGE
            .scale(EXPLOSION_INNER_BOOST)
            .fade_toward(WASHOUT_YELLOW, 1.0 - strength);
        Some((self.rendered_radius() * EXPLOSION_INNER_RADIUS_FACTOR, color))
    }

    /// Concentric rings with decreasing radius/thickness and staggered fade
    pub fn rings(&self) -> Vec<RingLayer> {
        let progress = self.progress();
        let outer = self.rendered_radius();
        let mut layers = Vec::with_capacity(EXPLOSION_RING_COUNT as usize);
        for i in 0..EXPLOSION_RING_COUNT {
            let radius = outer - i as f32 * EXPLOSION_RING_RADIUS_STEP;
            if radius <= 0.0 {
                continue;
            }
            let ring_progress =
                (progress + i as f32 * EXPLOSION_RING_PROGRESS_OFFSET).min(1.0);
            let thickness = (EXPLOSION_RING_THICKNESS_BASE
                - i as f32 * EXPLOSION_RING_THICKNESS_STEP)
                .max(1.0);
            layers.push(RingLayer {
                radius,
                thickness,
                color: EXPLOSION_ORANGE.fade_toward(WASHOUT_YELLOW, ring_progress),
            });
        }
        layers
    }
}

impl Shiftable for Explosion {
    fn shift_left(&mut self, amount: f32) {
        self.pos.x -= amount;
    }
}

/// Decorative particle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Circle,
    Square,
    Triangle,
}

/// A short-lived decorative particle with constant velocity
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub lifetime: u32,
    pub ticks: u32,
    pub size: f32,
    pub shape: ParticleShape,
}

impl Particle {
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        color: Rgb,
        lifetime: u32,
        size: f32,
        shape: ParticleShape,
    ) -> Self {
        Self {
            pos,
            vel,
            color,
            lifetime,
            ticks: 0,
            size,
            shape,
        }
    }

    /// Advance one tick; returns whether the particle is still alive
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.ticks += 1;
        self.ticks < self.lifetime
    }

    fn washout(&self) -> f32 {
        (self.ticks as f32 / self.lifetime as f32).min(1.0)
    }

    /// Fill color: original color fading linearly toward white
    pub fn faded_color(&self) -> Rgb {
        self.color.fade_toward(WASHOUT_WHITE, self.washout())
    }

    /// Glow overlay color: a dimmer fade drawn at a larger size
    pub fn glow_color(&self) -> Rgb {
        let brightness = (1.0 - self.washout()) * PARTICLE_GLOW_BRIGHTNESS;
        self.color.fade_toward(WASHOUT_WHITE, 1.0 - brightness)
    }
}

impl Shiftable for Particle {
    fn shift_left(&mut self, amount: f32) {
        self.pos.x -= amount;
    }
}
