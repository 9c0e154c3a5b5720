//! Worm locomotion
//!
//! The player creature is an ordered chain of segments, head first. The head
//! integrates a velocity with input easing, edge slowdown and a drift back
//! toward its rest column; trailing segments are pulled toward their
//! predecessor with a minimum link length and a capped catch-up speed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// One body segment. `vel` is only used during the death animation.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub pos: Vec2,
    /// Grow-in scale in [0, 1]
    pub scale: f32,
    pub vel: Vec2,
}

impl Segment {
    fn new(pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            scale,
            vel: Vec2::ZERO,
        }
    }
}

/// The player-controlled worm
#[derive(Debug, Clone)]
pub struct Worm {
    /// Head is always index 0; never empty
    pub segments: Vec<Segment>,
    pub radius: f32,
    /// Head velocity (excludes the constant scroll component)
    pub vel: Vec2,
    /// Facing from actual head displacement; drives bomb aim
    pub facing_angle: f32,
    pub target_facing_angle: f32,
    /// Eased angle used for eye placement only
    pub current_facing_angle: f32,
    /// Pupil animation counter
    pub eye_ticks: u32,
    /// Bite feedback tint countdown
    pub red_tint_ticks: u32,
    pub dying: bool,
    pub dying_ticks: u32,
    /// Eye anchor frozen at death; falls independently
    pub eye_pos: Vec2,
}

impl Worm {
    /// Create a worm at `pos` with the starting segment count
    pub fn new(pos: Vec2) -> Self {
        let mut worm = Self {
            segments: vec![Segment::new(pos, 1.0)],
            radius: WORM_RADIUS,
            vel: Vec2::ZERO,
            facing_angle: 0.0,
            target_facing_angle: 0.0,
            current_facing_angle: 0.0,
            eye_ticks: 0,
            red_tint_ticks: 0,
            dying: false,
            dying_ticks: 0,
            eye_pos: pos,
        };
        for _ in 1..WORM_START_SEGMENTS {
            worm.grow();
        }
        worm
    }

    /// Segment count; the chain invariant keeps this >= 1
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0].pos
    }

    /// Advance the head one tick from a directional input (each axis in
    /// {-1, 0, 1}), then pull the trailing segments along.
    ///
    /// The head displacement includes the constant scroll component, which
    /// cancels the world shift applied earlier in the tick and keeps the worm
    /// screen-stationary when idle.
    pub fn steer(&mut self, dx: i32, dy: i32) {
        let head = self.segments[0].pos;

        let input = Vec2::new(dx as f32, dy as f32);
        if input == Vec2::ZERO {
            self.vel *= WORM_FRICTION;
            if (head.x - REST_X).abs() > REST_X_THRESHOLD {
                self.vel.x += (REST_X - head.x) * WORM_DRIFT_FORCE;
            }
        } else {
            let target = input.normalize() * MOVE_SPEED;
            self.vel += (target - self.vel) * WORM_ACCEL;
        }

        let mut move_x = SCROLL_SPEED + self.vel.x;
        let mut move_y = self.vel.y;

        let buffer = self.radius * EDGE_BUFFER_MULT;
        let left_limit = self.radius;
        let right_limit = MOVEMENT_ZONE_END - self.radius;
        let top_limit = self.radius;
        let bottom_limit = SCREEN_H - self.radius;

        // Quadratic slowdown approaching each edge, then a hard clamp below
        if move_x < 0.0 {
            move_x *= edge_slowdown(head.x - left_limit, buffer);
        }
        if move_x > 0.0 {
            move_x *= edge_slowdown(right_limit - head.x, buffer);
        }
        if move_y < 0.0 {
            move_y *= edge_slowdown(head.y - top_limit, buffer);
        }
        if move_y > 0.0 {
            move_y *= edge_slowdown(bottom_limit - head.y, buffer);
        }

        let new_pos = Vec2::new(
            (head.x + move_x).clamp(left_limit, right_limit),
            (head.y + move_y).clamp(top_limit, bottom_limit),
        );

        let actual = new_pos - head;
        if actual != Vec2::ZERO {
            self.facing_angle = actual.y.atan2(actual.x);
            self.target_facing_angle = self.facing_angle;
        }
        self.current_facing_angle +=
            (self.target_facing_angle - self.current_facing_angle) * EYE_LERP_FACTOR;

        self.segments[0].pos = new_pos;

        // Elastic chain: each segment follows its predecessor with a minimum
        // link length and a capped per-tick catch-up
        for i in 1..self.segments.len() {
            let target = self.segments[i - 1].pos;
            let seg = &mut self.segments[i];
            let delta = target - seg.pos;
            let dist = delta.length();
            if dist > MIN_SEG_DIST {
                let step = (dist - MIN_SEG_DIST).min(SEG_CATCHUP_SPEED);
                seg.pos += delta / dist * step;
            }
        }

        self.eye_ticks += 1;
    }

    /// Apply the per-tick world scroll to every segment
    pub fn shift_left(&mut self, amount: f32) {
        for seg in &mut self.segments {
            seg.pos.x -= amount;
        }
    }

    /// Append a trailing segment at the tail position, growing in from scale 0
    pub fn grow(&mut self) {
        let tail = self.segments[self.segments.len() - 1].pos;
        self.segments.push(Segment::new(tail, 0.0));
    }

    /// Animate grow-in scales toward 1.0
    pub fn update_scales(&mut self) {
        for seg in &mut self.segments {
            if seg.scale < 1.0 {
                seg.scale = (seg.scale + GROW_RATE).min(1.0);
            }
        }
    }

    /// Remove `max(1, floor(len * fraction))` tail segments, keeping >= 1
    pub fn shrink(&mut self, fraction: f32) {
        let reduction = ((self.len() as f32 * fraction) as usize).max(1);
        let keep = self.len().saturating_sub(reduction).max(1);
        self.segments.truncate(keep);
    }

    /// Bird bite: lose half the body, flash red
    pub fn bite_half(&mut self) {
        let keep = (self.len() / 2).max(1);
        self.segments.truncate(keep);
        self.red_tint_ticks = RED_TINT_TICKS;
    }

    /// Pay the tail cost of firing a bomb
    pub fn consume_tail(&mut self, count: usize) {
        let keep = self.len().saturating_sub(count).max(1);
        self.segments.truncate(keep);
    }

    /// Enter the irrecoverable death animation. Idempotent: a second call
    /// leaves the segment velocities untouched.
    pub fn start_dying(&mut self, rng: &mut Pcg32) {
        if self.dying {
            return;
        }
        self.dying = true;
        self.dying_ticks = 0;
        for seg in &mut self.segments {
            seg.vel = Vec2::new(
                rng.random_range(-DYING_SEG_SPEED..DYING_SEG_SPEED),
                rng.random_range(-DYING_SEG_SPEED..DYING_SEG_SPEED),
            );
        }
        self.eye_pos = self.segments[0].pos;
    }

    /// One tick of the death animation: segments drift apart and damp out,
    /// the eye pair falls straight down
    pub fn update_dying(&mut self) {
        for seg in &mut self.segments {
            seg.pos += seg.vel;
            seg.vel *= DYING_DAMPING;
        }
        self.eye_pos.y += EYE_FALL_SPEED;
        self.dying_ticks += 1;
    }

    /// Body alpha while dying (255 when alive)
    pub fn body_alpha(&self) -> u8 {
        if self.dying {
            (255.0 - self.dying_ticks as f32 * DYING_FADE_PER_TICK).max(0.0) as u8
        } else {
            255
        }
    }
}

/// Quadratic attenuation of motion toward an edge:
/// `(max(0, dist)/buffer)^2`, 1.0 outside the buffer zone
#[inline]
fn edge_slowdown(dist_to_edge: f32, buffer: f32) -> f32 {
    if dist_to_edge < buffer {
        let proximity = dist_to_edge.max(0.0) / buffer;
        proximity * proximity
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn worm_at_rest() -> Worm {
        Worm::new(Vec2::new(REST_X, SCREEN_H / 2.0))
    }

    /// One full movement tick as the game loop performs it
    fn move_tick(worm: &mut Worm, dx: i32, dy: i32) {
        worm.shift_left(SCROLL_SPEED);
        worm.steer(dx, dy);
    }

    #[test]
    fn test_starts_with_five_segments() {
        assert_eq!(worm_at_rest().len(), WORM_START_SEGMENTS);
    }

    #[test]
    fn test_shrink_arithmetic() {
        let mut worm = worm_at_rest();
        for _ in 0..5 {
            worm.grow();
        }
        assert_eq!(worm.len(), 10);
        worm.shrink(SHRINK_FRACTION);
        assert_eq!(worm.len(), 8); // 10 - max(1, floor(10 * 0.2))

        let mut single = worm_at_rest();
        single.segments.truncate(1);
        single.shrink(SHRINK_FRACTION);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_shrink_never_empties() {
        let mut worm = worm_at_rest();
        for _ in 0..20 {
            worm.shrink(0.9);
            assert!(worm.len() >= 1);
        }
    }

    #[test]
    fn test_bite_half_keeps_at_least_one() {
        let mut worm = worm_at_rest();
        worm.segments.truncate(1);
        worm.bite_half();
        assert_eq!(worm.len(), 1);
        assert_eq!(worm.red_tint_ticks, RED_TINT_TICKS);
    }

    #[test]
    fn test_segment_spacing_once_settled() {
        let mut worm = worm_at_rest();
        // Spread the chain out with sustained input, then let it settle idle
        for _ in 0..60 {
            move_tick(&mut worm, 0, 1);
        }
        for _ in 0..60 {
            move_tick(&mut worm, 0, 0);
        }
        for i in 1..worm.len() {
            let dist = worm.segments[i - 1].pos.distance(worm.segments[i].pos);
            assert!(
                dist >= MIN_SEG_DIST - 1e-3,
                "segments {} overlap: {}",
                i,
                dist
            );
            assert!(
                dist <= MIN_SEG_DIST + SEG_CATCHUP_SPEED + 1e-3,
                "segment {} lags too far: {}",
                i,
                dist
            );
        }
    }

    #[test]
    fn test_rest_position_hold() {
        // At the rest column with no input the head must stay within the
        // drift threshold
        let mut worm = worm_at_rest();
        for _ in 0..60 {
            move_tick(&mut worm, 0, 0);
        }
        assert!((worm.head().x - REST_X).abs() <= REST_X_THRESHOLD);
    }

    #[test]
    fn test_rest_position_convergence_from_offset() {
        let mut worm = Worm::new(Vec2::new(REST_X + 200.0, SCREEN_H / 2.0));
        for _ in 0..600 {
            move_tick(&mut worm, 0, 0);
        }
        assert!(
            (worm.head().x - REST_X).abs() <= REST_X_THRESHOLD,
            "head did not drift back: {}",
            worm.head().x
        );
    }

    #[test]
    fn test_grow_scale_animates_in() {
        let mut worm = worm_at_rest();
        worm.grow();
        let tail = worm.len() - 1;
        assert_eq!(worm.segments[tail].scale, 0.0);
        let steps = (1.0 / GROW_RATE).ceil() as u32;
        for _ in 0..steps {
            worm.update_scales();
            assert!(worm.segments[tail].scale <= 1.0);
        }
        assert_eq!(worm.segments[tail].scale, 1.0);
    }

    #[test]
    fn test_start_dying_is_idempotent() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut worm = worm_at_rest();
        worm.start_dying(&mut rng);
        let vels: Vec<Vec2> = worm.segments.iter().map(|s| s.vel).collect();
        worm.start_dying(&mut rng);
        let after: Vec<Vec2> = worm.segments.iter().map(|s| s.vel).collect();
        assert_eq!(vels, after);
    }

    #[test]
    fn test_dying_damps_velocities() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut worm = worm_at_rest();
        worm.start_dying(&mut rng);
        let speed_before: f32 = worm.segments.iter().map(|s| s.vel.length()).sum();
        for _ in 0..120 {
            worm.update_dying();
        }
        let speed_after: f32 = worm.segments.iter().map(|s| s.vel.length()).sum();
        assert!(speed_after < speed_before * 0.2);
        assert_eq!(worm.dying_ticks, 120);
    }

    #[test]
    fn test_body_alpha_fades_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut worm = worm_at_rest();
        assert_eq!(worm.body_alpha(), 255);
        worm.start_dying(&mut rng);
        for _ in 0..200 {
            worm.update_dying();
        }
        assert_eq!(worm.body_alpha(), 0);
    }

    proptest! {
        #[test]
        fn head_always_clamped(
            inputs in proptest::collection::vec((-1i32..=1, -1i32..=1), 1..200)
        ) {
            let mut worm = worm_at_rest();
            for (dx, dy) in inputs {
                move_tick(&mut worm, dx, dy);
                let h = worm.head();
                prop_assert!(h.x >= WORM_RADIUS - 1e-3);
                prop_assert!(h.x <= MOVEMENT_ZONE_END - WORM_RADIUS + 1e-3);
                prop_assert!(h.y >= WORM_RADIUS - 1e-3);
                prop_assert!(h.y <= SCREEN_H - WORM_RADIUS + 1e-3);
            }
        }

        #[test]
        fn links_never_teleport(
            inputs in proptest::collection::vec((-1i32..=1, -1i32..=1), 1..100)
        ) {
            let mut worm = worm_at_rest();
            for (dx, dy) in inputs {
                let before: Vec<Vec2> = worm.segments.iter().map(|s| s.pos).collect();
                move_tick(&mut worm, dx, dy);
                for i in 1..worm.len() {
                    let step = before[i].distance(worm.segments[i].pos);
                    // scroll shift + capped catch-up is the most a trailing
                    // segment can travel in one tick
                    prop_assert!(step <= SCROLL_SPEED + SEG_CATCHUP_SPEED + 1e-3);
                }
            }
        }
    }
}
