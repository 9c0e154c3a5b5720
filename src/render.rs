//! Frame building: simulation state to renderer-agnostic draw commands
//!
//! Produces an ordered list of primitives per frame; any backend that can
//! fill circles, rects and polygons can display the game. Draw order is
//! back-to-front: world tiles, collectibles, projectiles, the bird, effects,
//! then the worm on top.

use glam::Vec2;

use crate::color::{self, Rgb};
use crate::consts::*;
use crate::sim::{BirdState, GameState, ParticleShape};

/// One draw primitive. `alpha` is 0-255 over the base color.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: u8,
    },
    Ring {
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: Rgb,
        alpha: u8,
    },
    Rect {
        center: Vec2,
        size: Vec2,
        color: Rgb,
        alpha: u8,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Rgb,
        alpha: u8,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Rgb,
    },
}

/// Build the full draw list for the current state
pub fn build_frame(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::new();
    push_obstacles(state, &mut cmds);
    push_foods(state, &mut cmds);
    push_bomb_apples(state, &mut cmds);
    push_bombs(state, &mut cmds);
    push_bird(state, &mut cmds);
    push_explosions(state, &mut cmds);
    push_particles(state, &mut cmds);
    push_worm(state, &mut cmds);
    cmds
}

fn push_obstacles(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for obs in &state.obstacles {
        let fill = obs.color.rgb();
        let border = fill.scale(0.5);
        for center in obs.cell_centers() {
            cmds.push(DrawCmd::Rect {
                center,
                size: Vec2::splat(GRID_SIZE),
                color: border,
                alpha: 255,
            });
            cmds.push(DrawCmd::Rect {
                center,
                size: Vec2::splat(GRID_SIZE - 2.0 * OBSTACLE_RECT_BORDER),
                color: fill,
                alpha: 255,
            });
        }
    }
}

fn push_foods(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for food in &state.foods {
        cmds.push(DrawCmd::Circle {
            center: food.pos(),
            radius: food.radius * food.scale,
            color: color::GREEN,
            alpha: 255,
        });
    }
}

fn push_bomb_apples(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for apple in &state.bomb_apples {
        // Pulse is a visual-only size wobble around full scale
        let pulse = 1.0 + 0.1 * apple.pulse.sin();
        let radius = apple.radius * apple.scale * pulse;
        cmds.push(DrawCmd::Circle {
            center: apple.pos(),
            radius,
            color: color::RED,
            alpha: 255,
        });
        cmds.push(DrawCmd::Ring {
            center: apple.pos(),
            radius,
            thickness: 3.0,
            color: color::BLACK,
            alpha: 255,
        });
    }
}

fn push_bombs(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for bomb in &state.bombs {
        cmds.push(DrawCmd::Circle {
            center: bomb.pos,
            radius: bomb.radius,
            color: color::BLACK,
            alpha: 255,
        });
        // Fuse indicator ring burns toward detonation
        let fuse = bomb.ticks as f32 / BOMB_FUSE_TICKS as f32;
        cmds.push(DrawCmd::Ring {
            center: bomb.pos,
            radius: bomb.radius,
            thickness: 4.0,
            color: color::EXPLOSION_ORANGE.fade_toward(color::RED, fuse),
            alpha: 255,
        });
    }
}

fn push_bird(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let Some(bird) = &state.bird else {
        return;
    };
    let pos = bird.pos + bird.shake_offset;
    let half = bird.size / 2.0;

    // Body, then a beak pointing at the worm
    cmds.push(DrawCmd::Circle {
        center: pos,
        radius: half,
        color: color::PURPLE,
        alpha: 255,
    });
    cmds.push(DrawCmd::Polygon {
        points: vec![
            pos + Vec2::new(-half, -20.0),
            pos + Vec2::new(-half, 20.0),
            pos + Vec2::new(-half - 40.0, 0.0),
        ],
        color: color::ORANGE,
        alpha: 255,
    });

    if bird.show_health_ticks > 0 && bird.state != BirdState::Falling {
        let bar_pos = pos - Vec2::new(0.0, half + 30.0);
        let width = bird.size;
        cmds.push(DrawCmd::Rect {
            center: bar_pos,
            size: Vec2::new(width, 14.0),
            color: color::BLACK,
            alpha: 200,
        });
        let frac = (bird.health.max(0) as f32 / BIRD_HEALTH as f32).clamp(0.0, 1.0);
        cmds.push(DrawCmd::Rect {
            center: bar_pos - Vec2::new(width * (1.0 - frac) / 2.0, 0.0),
            size: Vec2::new(width * frac, 10.0),
            color: color::RED,
            alpha: 255,
        });
    }

    if !bird.taunt.is_empty() && bird.state != BirdState::Falling {
        cmds.push(DrawCmd::Text {
            pos: pos - Vec2::new(0.0, half + 60.0),
            text: bird.taunt.clone(),
            color: color::WHITE,
        });
    }
}

fn push_explosions(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for explosion in &state.explosions {
        for ring in explosion.rings() {
            cmds.push(DrawCmd::Ring {
                center: explosion.pos,
                radius: ring.radius,
                thickness: ring.thickness,
                color: ring.color,
                alpha: 255,
            });
        }
        if let Some((radius, color)) = explosion.inner_core() {
            cmds.push(DrawCmd::Circle {
                center: explosion.pos,
                radius,
                color,
                alpha: 255,
            });
        }
    }
}

fn push_particles(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    for particle in &state.particles {
        cmds.push(particle_cmd(
            particle.pos,
            particle.size,
            particle.faded_color(),
            particle.shape,
        ));
    }
    // Soft glow pass drawn over the fills at a slightly larger size
    for particle in &state.particles {
        cmds.push(particle_cmd(
            particle.pos,
            particle.size + PARTICLE_GLOW_SIZE_OFFSET,
            particle.glow_color(),
            particle.shape,
        ));
    }
}

fn particle_cmd(pos: Vec2, size: f32, color: Rgb, shape: ParticleShape) -> DrawCmd {
    match shape {
        ParticleShape::Circle => DrawCmd::Circle {
            center: pos,
            radius: size,
            color,
            alpha: 255,
        },
        ParticleShape::Square => DrawCmd::Rect {
            center: pos,
            size: Vec2::splat(size * 2.0),
            color,
            alpha: 255,
        },
        ParticleShape::Triangle => DrawCmd::Polygon {
            points: vec![
                pos + Vec2::new(0.0, -size),
                pos + Vec2::new(size, size),
                pos + Vec2::new(-size, size),
            ],
            color,
            alpha: 255,
        },
    }
}

fn push_worm(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let worm = &state.worm;
    let alpha = worm.body_alpha();
    let tinted = worm.red_tint_ticks > 0;

    // Tail to head so the head overlaps its neighbors; alternating shades
    // make the segmentation readable
    let last = worm.len() - 1;
    for (i, seg) in worm.segments.iter().enumerate().rev() {
        let body = if tinted {
            color::RED
        } else if (last - i) % 2 == 0 {
            color::GREEN
        } else {
            color::DARK_GREEN
        };
        cmds.push(DrawCmd::Circle {
            center: seg.pos,
            radius: worm.radius * seg.scale,
            color: body,
            alpha,
        });
    }

    push_eyes(state, cmds);
}

fn push_eyes(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let worm = &state.worm;
    // Eyes detach and fall once the worm dies
    let anchor = if worm.dying {
        worm.eye_pos
    } else {
        worm.head()
    };
    let angle = worm.current_facing_angle;
    let forward = Vec2::new(angle.cos(), angle.sin());
    let side = Vec2::new(-forward.y, forward.x);

    let pupil_offset = Vec2::new(
        (worm.eye_ticks as f32 * PUPIL_X_FREQ).sin() * PUPIL_X_AMP,
        (worm.eye_ticks as f32 * PUPIL_Y_FREQ).cos() * PUPIL_Y_AMP,
    );

    for sign in [-1.0, 1.0] {
        let center = anchor + forward * EYE_OFFSET_FORWARD + side * (sign * EYE_OFFSET_SIDE);
        cmds.push(DrawCmd::Circle {
            center,
            radius: EYE_RADIUS,
            color: color::WHITE,
            alpha: 255,
        });
        cmds.push(DrawCmd::Circle {
            center: center + pupil_offset,
            radius: PUPIL_RADIUS,
            color: color::BLACK,
            alpha: 255,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bird, Explosion, Obstacle, ObstacleColor};

    #[test]
    fn test_fresh_state_draws_worm_and_eyes() {
        let state = GameState::new(1);
        let cmds = build_frame(&state);
        // Segments plus two eye whites and two pupils, nothing else yet
        assert_eq!(cmds.len(), WORM_START_SEGMENTS + 4);
        assert!(cmds
            .iter()
            .all(|cmd| matches!(cmd, DrawCmd::Circle { .. })));
    }

    #[test]
    fn test_world_draws_before_worm() {
        let mut state = GameState::new(1);
        state
            .obstacles
            .push(Obstacle::new(vec![(0, 0)], 0.0, ObstacleColor::Gray));
        let cmds = build_frame(&state);
        // The first command is the obstacle tile, the last the pupil
        assert!(matches!(cmds[0], DrawCmd::Rect { .. }));
        assert!(matches!(cmds[cmds.len() - 1], DrawCmd::Circle { .. }));
    }

    #[test]
    fn test_dying_worm_fades_and_drops_eyes() {
        let mut state = GameState::new(1);
        state.worm.start_dying(&mut state.rng.clone());
        let eye_y_before = state.worm.eye_pos.y;
        for _ in 0..30 {
            state.worm.update_dying();
        }
        let cmds = build_frame(&state);
        let body_alpha = cmds.iter().find_map(|cmd| match cmd {
            DrawCmd::Circle { alpha, .. } => Some(*alpha),
            _ => None,
        });
        assert!(body_alpha.expect("worm drawn") < 255);
        assert!(state.worm.eye_pos.y > eye_y_before);
    }

    #[test]
    fn test_red_tint_changes_body_color() {
        let mut state = GameState::new(1);
        state.worm.red_tint_ticks = RED_TINT_TICKS;
        let cmds = build_frame(&state);
        let body_color = cmds.iter().find_map(|cmd| match cmd {
            DrawCmd::Circle { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(body_color, Some(color::RED));
    }

    #[test]
    fn test_explosion_emits_rings_then_core() {
        let mut state = GameState::new(1);
        state.explosions.push(Explosion::new(Vec2::new(500.0, 500.0)));
        let cmds = build_frame(&state);
        let rings = cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Ring { .. }))
            .count();
        assert!(rings > 0);
        assert!(rings <= EXPLOSION_RING_COUNT as usize);
    }

    #[test]
    fn test_bird_health_bar_only_when_recently_hit() {
        let mut state = GameState::new(1);
        let mut bird = Bird::new(Vec2::new(BIRD_ANCHOR_X, SCREEN_H / 2.0));
        bird.taunt = "squawk".to_string();
        state.bird = Some(bird);

        let rects = |cmds: &[DrawCmd]| {
            cmds.iter()
                .filter(|cmd| matches!(cmd, DrawCmd::Rect { .. }))
                .count()
        };
        let cmds = build_frame(&state);
        assert_eq!(rects(&cmds), 0);
        assert!(cmds
            .iter()
            .any(|cmd| matches!(cmd, DrawCmd::Text { text, .. } if text == "squawk")));

        if let Some(bird) = &mut state.bird {
            bird.take_damage();
        }
        let cmds = build_frame(&state);
        assert_eq!(rects(&cmds), 2); // bar background + fill
    }

    #[test]
    fn test_particles_draw_fill_and_glow() {
        let mut state = GameState::new(1);
        state.particles.push(crate::sim::Particle::new(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            color::GREEN,
            30,
            FOOD_PARTICLE_SIZE,
            ParticleShape::Triangle,
        ));
        let cmds = build_frame(&state);
        let polys = cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Polygon { .. }))
            .count();
        assert_eq!(polys, 2);
    }
}
