//! The bird boss: a scripted finite-state enemy
//!
//! appearing -> hovering -> charging -> (falling | knockback) -> hovering,
//! with falling ending in removal and a respawn countdown. Timers for
//! immunity, hit shake and the health bar run independently of the state.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entities::Bomb;
use super::state::GameEvent;
use super::worm::Worm;
use crate::consts::*;
use crate::quotes::QuoteEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdState {
    /// Sliding in from off-screen toward the hover anchor
    Appearing,
    /// Bobbing on a sine wave while the charge countdown runs
    Hovering,
    /// Dashing at the worm's head
    Charging,
    /// Easing back to the anchor after being stunned mid-charge
    Knockback,
    /// Shot down or done biting; descends until off-screen
    Falling,
}

#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Vec2,
    /// Hover anchor; `Appearing` flies toward it, `Knockback` returns to it
    pub anchor: Vec2,
    pub size: f32,
    pub health: i32,
    pub state: BirdState,
    /// Lifetime tick counter; drives the hover sine and animation frame
    pub ticks: u32,
    pub charge_countdown: u32,
    /// Suppresses new bomb hits while > 0
    pub immunity_ticks: u32,
    pub shake_ticks: u32,
    pub shake_offset: Vec2,
    pub show_health_ticks: u32,
    /// Taunt line currently displayed in the dialogue box
    pub taunt: String,
}

impl Bird {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            pos: anchor + Vec2::new(BIRD_FLY_IN_OFFSET, 0.0),
            anchor,
            size: BIRD_SIZE,
            health: BIRD_HEALTH,
            state: BirdState::Appearing,
            ticks: 0,
            charge_countdown: BIRD_CHARGE_DELAY_TICKS,
            immunity_ticks: 0,
            shake_ticks: 0,
            shake_offset: Vec2::ZERO,
            show_health_ticks: 0,
            taunt: String::new(),
        }
    }

    /// One tick of the state machine. Biting the worm happens here; shot
    /// resolution (damage/stun) is driven by the collision pass.
    pub fn update(&mut self, worm: &mut Worm, rng: &mut Pcg32, events: &mut Vec<GameEvent>) {
        self.ticks += 1;
        match self.state {
            BirdState::Appearing => {
                self.pos.x -= BIRD_FLY_IN_SPEED;
                if self.pos.x <= self.anchor.x {
                    self.pos.x = self.anchor.x;
                    self.state = BirdState::Hovering;
                    self.charge_countdown = BIRD_CHARGE_DELAY_TICKS;
                }
            }
            BirdState::Hovering => {
                self.pos.y = self.anchor.y
                    + (self.ticks as f32 * BIRD_HOVER_FREQ).sin() * BIRD_HOVER_AMPLITUDE;
                self.charge_countdown = self.charge_countdown.saturating_sub(1);
                if self.charge_countdown == 0 {
                    self.state = BirdState::Charging;
                    events.push(GameEvent::BirdScreech);
                }
            }
            BirdState::Charging => {
                let delta = worm.head() - self.pos;
                let dist = delta.length();
                if dist > 0.0 {
                    self.pos += delta / dist * BIRD_CHARGE_SPEED;
                }
                if dist < self.size / 2.0 + worm.radius {
                    worm.bite_half();
                    events.push(GameEvent::BirdBite);
                    events.push(GameEvent::Quote(QuoteEvent::Nibble));
                    self.state = BirdState::Falling;
                }
            }
            BirdState::Knockback => {
                let delta = self.anchor - self.pos;
                self.pos += delta * 0.1;
                if delta.x.abs() < 1.0 && delta.y.abs() < 1.0 {
                    self.pos = self.anchor;
                    self.state = BirdState::Hovering;
                    self.charge_countdown = BIRD_CHARGE_DELAY_TICKS;
                }
            }
            BirdState::Falling => {
                self.pos.y += BIRD_FALL_SPEED;
            }
        }

        if self.show_health_ticks > 0 {
            self.show_health_ticks -= 1;
        }
        if self.shake_ticks > 0 {
            self.shake_ticks -= 1;
            self.shake_offset = Vec2::new(
                rng.random_range(-BIRD_SHAKE_AMP..=BIRD_SHAKE_AMP),
                rng.random_range(-BIRD_SHAKE_AMP..=BIRD_SHAKE_AMP),
            );
        } else {
            self.shake_offset = Vec2::ZERO;
        }
        if self.immunity_ticks > 0 {
            self.immunity_ticks -= 1;
        }
    }

    /// A normal bomb hit outside of a charge
    pub fn take_damage(&mut self) {
        self.health -= 1;
        self.shake_ticks = BIRD_SHAKE_TICKS;
        self.immunity_ticks = BIRD_IMMUNITY_TICKS;
        self.show_health_ticks = BIRD_HEALTH_SHOW_TICKS;
        if self.health <= 0 {
            self.state = BirdState::Falling;
        }
    }

    /// A bomb hit mid-charge: heavier damage, interrupts the attack
    pub fn stun(&mut self, events: &mut Vec<GameEvent>) {
        self.health -= 2;
        self.shake_ticks = BIRD_SHAKE_TICKS;
        self.show_health_ticks = BIRD_HEALTH_SHOW_TICKS;
        events.push(GameEvent::Quote(QuoteEvent::Damaged));
        if self.health <= 0 {
            self.state = BirdState::Falling;
            events.push(GameEvent::BirdDowned);
        } else {
            self.state = BirdState::Knockback;
        }
    }

    /// Proximity test against a bomb; immunity suppresses registration
    pub fn hit_by(&self, bomb: &Bomb) -> bool {
        if self.immunity_ticks > 0 {
            return false;
        }
        bomb.pos.distance(self.pos) < self.size / 2.0 + bomb.radius + PICKUP_MARGIN
    }

    /// Fallen fully below the visible area
    pub fn off_screen(&self) -> bool {
        self.state == BirdState::Falling && self.pos.y > SCREEN_H + self.size
    }

    pub fn set_taunt(&mut self, line: String) {
        self.taunt = line;
    }
}
