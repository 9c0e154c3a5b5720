//! RGB palette and the linear fade laws used by effects and rendering

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `target`; `t` = 0 keeps self, `t` = 1 is fully target
    pub fn fade_toward(self, target: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 * (1.0 - t) + b as f32 * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, target.r), mix(self.g, target.g), mix(self.b, target.b))
    }

    /// Brighten channels by a multiplier, saturating at 255
    pub fn scale(self, factor: f32) -> Rgb {
        let s = |c: u8| -> u8 { (c as f32 * factor).clamp(0.0, 255.0) as u8 };
        Rgb::new(s(self.r), s(self.g), s(self.b))
    }
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(224, 224, 224);
pub const GREEN: Rgb = Rgb::new(50, 205, 50);
pub const RED: Rgb = Rgb::new(220, 20, 60);
pub const DARK_GREEN: Rgb = Rgb::new(60, 179, 113);
pub const ORANGE: Rgb = Rgb::new(255, 127, 80);
pub const GRAY: Rgb = Rgb::new(169, 169, 169);
pub const PURPLE: Rgb = Rgb::new(186, 85, 211);
pub const EXPLOSION_ORANGE: Rgb = Rgb::new(255, 140, 0);

/// Washout targets: particles fade to white, explosion rings to yellow-white
pub const WASHOUT_WHITE: Rgb = Rgb::new(255, 255, 255);
pub const WASHOUT_YELLOW: Rgb = Rgb::new(255, 255, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(GREEN.fade_toward(WASHOUT_WHITE, 0.0), GREEN);
        assert_eq!(GREEN.fade_toward(WASHOUT_WHITE, 1.0), WASHOUT_WHITE);
    }

    #[test]
    fn test_fade_is_monotonic_toward_target() {
        let a = RED.fade_toward(WASHOUT_WHITE, 0.25);
        let b = RED.fade_toward(WASHOUT_WHITE, 0.75);
        assert!(b.g >= a.g);
        assert!(b.b >= a.b);
    }

    #[test]
    fn test_scale_saturates() {
        assert_eq!(EXPLOSION_ORANGE.scale(2.0).r, 255);
    }
}
