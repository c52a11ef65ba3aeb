//! A single bouncing ball

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A circular body moving inside the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Body {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    /// Integrate one step and bounce off the arena walls
    pub fn update(&mut self, width: f64, height: f64) {
        self.vel.y += GRAVITY;
        self.pos += self.vel * FRICTION;

        if self.pos.x - self.radius <= 0.0 || self.pos.x + self.radius >= width {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.min(width - self.radius).max(self.radius);
        }

        if self.pos.y - self.radius <= 0.0 || self.pos.y + self.radius >= height {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.min(height - self.radius).max(self.radius);
        }
    }

    /// Parity of the integer distance from the arena origin
    pub fn position_bit(&self) -> bool {
        (self.pos.length().floor() as u64) % 2 == 1
    }

    /// Integer speed modulo 16, shown as a hex digit by the HUD
    pub fn speed_nibble(&self) -> u8 {
        ((self.vel.length().floor() as u64) % 16) as u8
    }

    /// Whether `point` lies on or inside the circle
    pub fn contains(&self, point: DVec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Launch the body away from `point` at `power`
    ///
    /// A kick at the exact centre has no direction and leaves velocity untouched.
    pub fn kick_from(&mut self, point: DVec2, power: f64) {
        let away = self.pos - point;
        let distance = away.length();
        if distance > 0.0 {
            self.vel = away / distance * power;
        }
    }
}
