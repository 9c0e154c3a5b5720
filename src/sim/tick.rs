//! Fixed-rate simulation step
//!
//! One call advances the world exactly one tick. Order matters and is kept
//! stable: scroll, timers, entity updates, movement, effects, bird, spawns,
//! pruning, firing, collisions, terminal checks. The worm's own displacement
//! re-adds the scroll component, so an idle worm holds its screen position
//! while the world slides past.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::bird::{Bird, BirdState};
use super::effects::{Explosion, Particle, ParticleShape};
use super::entities::{Bomb, Shiftable};
use super::state::{GameEvent, GameState};
use crate::color::{self, Rgb};
use crate::consts::*;
use crate::quotes::QuoteEvent;

/// Player input sampled for one tick. Directional axes are each -1, 0 or 1.
/// `quit` is for the host loop; the simulation ignores it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub dx: i32,
    pub dy: i32,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Advance the simulation one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.game_over {
        if input.restart {
            state.restart();
            return;
        }
        // Only the death animation and leftover effects keep running
        state.worm.update_dying();
        state.explosions.retain_mut(|e| e.update());
        state.particles.retain_mut(|p| p.update());
        state.ticks += 1;
        return;
    }

    state.ticks += 1;

    // World scroll
    state.worm.shift_left(SCROLL_SPEED);
    for f in &mut state.foods {
        f.shift_left(SCROLL_SPEED);
    }
    for b in &mut state.bomb_apples {
        b.shift_left(SCROLL_SPEED);
    }
    for b in &mut state.bombs {
        b.shift_left(SCROLL_SPEED);
    }
    for o in &mut state.obstacles {
        o.shift_left(SCROLL_SPEED);
    }
    for e in &mut state.explosions {
        e.shift_left(SCROLL_SPEED);
    }
    for p in &mut state.particles {
        p.shift_left(SCROLL_SPEED);
    }
    state.distance_traveled += SCROLL_SPEED;

    // Timers
    state.bomb_arm_ticks = state.bomb_arm_ticks.saturating_sub(1);
    if state.worm.red_tint_ticks > 0 {
        state.worm.red_tint_ticks -= 1;
    }

    // Entity updates
    state.worm.update_scales();
    for f in &mut state.foods {
        f.update();
    }
    for b in &mut state.bomb_apples {
        b.update();
    }
    for b in &mut state.bombs {
        b.update();
    }

    // Movement
    state.worm.steer(input.dx, input.dy);

    // Effects
    state.explosions.retain_mut(|e| e.update());
    state.particles.retain_mut(|p| p.update());

    // Bird lifecycle
    if let Some(bird) = &mut state.bird {
        bird.update(&mut state.worm, &mut state.rng, &mut state.events);
    }
    if state.bird.as_ref().is_some_and(|b| b.off_screen()) {
        state.bird = None;
        state.bird_respawn_ticks = BIRD_RESPAWN_TICKS;
    } else if state.bird.is_none() {
        state.bird_respawn_ticks = state.bird_respawn_ticks.saturating_sub(1);
        if state.bird_respawn_ticks == 0 {
            state.bird = Some(Bird::new(Vec2::new(BIRD_ANCHOR_X, SCREEN_H / 2.0)));
            state.events.push(GameEvent::BirdAppeared);
            state.events.push(GameEvent::Quote(QuoteEvent::Appeared));
        }
    }

    // Distance-driven spawning
    if state.distance_traveled >= state.next_food_spawn {
        state.spawn_food();
        state.next_food_spawn = state.distance_traveled + state.next_spawn_interval();
    }
    if state.distance_traveled >= state.next_bomb_apple_spawn {
        state.spawn_bomb_apple();
        state.next_bomb_apple_spawn = state.distance_traveled + state.next_spawn_interval();
    }
    if state.distance_traveled >= state.next_obstacle_spawn {
        state.spawn_obstacle();
        state.next_obstacle_spawn = state.distance_traveled + state.next_spawn_interval();
    }

    // Prune what has scrolled off the left edge
    state
        .foods
        .retain(|f| f.pos().x > -FOOD_RADIUS * CULL_RADIUS_MULT);
    state
        .bomb_apples
        .retain(|b| b.pos().x > -BOMB_APPLE_RADIUS * CULL_RADIUS_MULT);
    state.obstacles.retain(|o| o.x_offset > -OBSTACLE_CULL_OFFSET);

    // Firing: costs tail segments, gated by the arming delay and a minimum
    // body length
    if input.fire && state.bomb_arm_ticks == 0 && state.worm.len() > BOMB_COST_SEGMENTS {
        let head = state.worm.head();
        state.bombs.push(Bomb::new(head, state.worm.facing_angle));
        state.worm.consume_tail(BOMB_COST_SEGMENTS);
        state.stats.bombs_fired += 1;
    }

    resolve_food_pickups(state);
    resolve_bomb_apples(state);
    resolve_bombs(state);
    resolve_terminal_collisions(state);
}

fn resolve_food_pickups(state: &mut GameState) {
    let head = state.worm.head();
    let radius = state.worm.radius;
    let mut i = 0;
    while i < state.foods.len() {
        if state.foods[i].touches_head(head, radius) {
            let pos = state.foods[i].pos();
            state.foods.remove(i);
            for _ in 0..SEGMENTS_PER_FOOD {
                state.worm.grow();
            }
            burst(
                state,
                pos,
                color::GREEN,
                FOOD_PARTICLE_COUNT,
                FOOD_PARTICLE_SPEED,
                FOOD_PARTICLE_LIFETIME,
                FOOD_PARTICLE_SIZE,
                ParticleShape::Circle,
            );
            state.stats.apples_collected += 1;
            state.events.push(GameEvent::FoodEaten);
        } else {
            i += 1;
        }
    }
}

fn resolve_bomb_apples(state: &mut GameState) {
    let head = state.worm.head();
    let radius = state.worm.radius;
    let mut i = 0;
    while i < state.bomb_apples.len() {
        if state.bomb_apples[i].touches_head(head, radius) {
            let pos = state.bomb_apples[i].pos();
            state.bomb_apples.remove(i);
            detonate(state, pos);
            state.worm.shrink(SHRINK_FRACTION);
        } else {
            i += 1;
        }
    }
}

/// Bomb resolution: obstacle contact and fuse expiry resolve before the
/// bird check, so a bomb buried in a wall never reaches the bird. A bird
/// hit is spent on the bird alone and leaves obstacles standing.
fn resolve_bombs(state: &mut GameState) {
    let mut bombs = std::mem::take(&mut state.bombs);
    for bomb in &mut bombs {
        if bomb.touches_obstacle(&state.obstacles) || bomb.fuse_expired() {
            bomb.active = false;
            detonate(state, bomb.pos);
            continue;
        }
        let bird_hit = state
            .bird
            .as_ref()
            .is_some_and(|b| b.state != BirdState::Falling && b.hit_by(bomb));
        if bird_hit {
            bomb.active = false;
            let pos = bomb.pos;
            resolve_bird_hit(state);
            explode(state, pos);
        }
    }
    bombs.retain(|b| b.active);
    state.bombs = bombs;
}

fn resolve_bird_hit(state: &mut GameState) {
    let Some(bird) = &mut state.bird else {
        return;
    };
    if bird.state == BirdState::Charging {
        // Mid-charge hits stun: double damage and the attack is aborted
        bird.stun(&mut state.events);
    } else {
        bird.take_damage();
        if bird.health <= 0 {
            state.events.push(GameEvent::BirdDowned);
            state.events.push(GameEvent::Quote(QuoteEvent::Dying));
        } else {
            state.events.push(GameEvent::Quote(QuoteEvent::Damaged));
        }
    }
    if bird.health <= 0 {
        state.stats.birds_downed += 1;
    }
}

fn resolve_terminal_collisions(state: &mut GameState) {
    let head = state.worm.head();
    let mut dead = state
        .obstacles
        .iter()
        .any(|obs| obs.hit_by_point(head, 0.0));

    // Self-collision is sampled sparsely so a tight coil is survivable
    if !dead && state.worm.len() > SELF_COLLISION_MIN_LEN {
        let mut i = SELF_COLLISION_START;
        while i < state.worm.len() {
            if head.distance(state.worm.segments[i].pos) < state.worm.radius * 2.0 {
                dead = true;
                break;
            }
            i += SELF_COLLISION_STRIDE;
        }
    }

    if dead && !state.game_over {
        state.worm.start_dying(&mut state.rng);
        state.game_over = true;
        state.events.push(GameEvent::WormDied);
    }
}

/// Explosion visual, debris and sound, shared by every detonation
fn explode(state: &mut GameState, pos: Vec2) {
    state.events.push(GameEvent::Detonation);
    state.explosions.push(Explosion::new(pos));
    burst(
        state,
        pos,
        color::EXPLOSION_ORANGE,
        BOMB_PARTICLE_COUNT,
        BOMB_PARTICLE_SPEED,
        BOMB_PARTICLE_LIFETIME,
        BOMB_PARTICLE_SIZE,
        ParticleShape::Square,
    );
}

/// Full detonation: the explosion plus destruction of every obstacle whose
/// center lies within the blast radius
fn detonate(state: &mut GameState, pos: Vec2) {
    explode(state, pos);

    let mut i = 0;
    while i < state.obstacles.len() {
        if state.obstacles[i].center().distance(pos) < EXPLOSION_RADIUS {
            let obs = state.obstacles.remove(i);
            let rgb = obs.color.rgb();
            let centers: Vec<Vec2> = obs.cell_centers().collect();
            for center in centers {
                burst(
                    state,
                    center,
                    rgb,
                    BREAK_PARTICLE_COUNT,
                    BREAK_PARTICLE_SPEED,
                    BREAK_PARTICLE_LIFETIME,
                    BREAK_PARTICLE_SIZE,
                    ParticleShape::Triangle,
                );
            }
        } else {
            i += 1;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn burst(
    state: &mut GameState,
    pos: Vec2,
    color: Rgb,
    count: usize,
    max_speed: f32,
    lifetime: u32,
    size: f32,
    shape: ParticleShape,
) {
    for _ in 0..count {
        let angle = state.rng.random_range(0.0..TAU);
        let speed = state.rng.random_range(max_speed * 0.3..=max_speed);
        state.particles.push(Particle::new(
            pos,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            lifetime,
            size,
            shape,
        ));
    }
}
