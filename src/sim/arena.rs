//! Arena state: the body collection and its spawn parameters
//!
//! All state that drives the fingerprint lives here.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::resolve_all;
use crate::consts::*;

/// Arena dimensions and spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub body_count: usize,
    pub body_radius: f64,
    /// Inclusive range each velocity component is sampled from
    pub velocity_range: (f64, f64),
    /// Amount each bound moves outward on reseed
    pub velocity_step: f64,
    pub spawn_margin: f64,
    pub kick_power: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            body_count: BODY_COUNT,
            body_radius: BODY_RADIUS,
            velocity_range: INITIAL_VELOCITY_RANGE,
            velocity_step: VELOCITY_STEP,
            spawn_margin: SPAWN_MARGIN,
            kick_power: KICK_POWER,
        }
    }
}

impl ArenaConfig {
    /// Widen the velocity range symmetrically by one step
    pub fn widen_velocity_range(&mut self) {
        self.velocity_range.0 -= self.velocity_step;
        self.velocity_range.1 += self.velocity_step;
    }
}

/// Owned simulation state
#[derive(Debug, Clone)]
pub struct Arena {
    pub config: ArenaConfig,
    /// Bodies in insertion order (the fingerprint order)
    pub bodies: Vec<Body>,
    rng: Pcg32,
}

impl Arena {
    /// Create an arena and spawn its first batch of bodies
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let mut arena = Self::with_bodies(config, Vec::new(), seed);
        arena.spawn_bodies();
        arena
    }

    /// Create an arena around an explicit body layout
    pub fn with_bodies(config: ArenaConfig, bodies: Vec<Body>, seed: u64) -> Self {
        Self {
            config,
            bodies,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance every body by one step, then resolve collisions
    pub fn advance(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        for body in &mut self.bodies {
            body.update(width, height);
        }
        resolve_all(&mut self.bodies);
    }

    /// Widen the velocity range and replace every body
    pub fn reseed(&mut self) {
        self.config.widen_velocity_range();
        self.spawn_bodies();
        log::info!(
            "Reseeded {} bodies, velocity range [{}, {}]",
            self.bodies.len(),
            self.config.velocity_range.0,
            self.config.velocity_range.1
        );
    }

    /// Kick the first body containing `point`
    ///
    /// Returns true if a body was hit.
    pub fn apply_kick(&mut self, point: DVec2) -> bool {
        let power = self.config.kick_power;
        match self.bodies.iter_mut().find(|b| b.contains(point)) {
            Some(body) => {
                body.kick_from(point, power);
                true
            }
            None => false,
        }
    }

    fn spawn_bodies(&mut self) {
        let config = &self.config;
        let margin = config.spawn_margin as i64;
        let x_max = config.width as i64 - margin;
        let y_max = config.height as i64 - margin;
        let (v_min, v_max) = config.velocity_range;

        let rng = &mut self.rng;
        self.bodies = (0..config.body_count)
            .map(|_| {
                let x = rng.random_range(margin..=x_max) as f64;
                let y = rng.random_range(margin..=y_max) as f64;
                let vx = rng.random_range(v_min..=v_max);
                let vy = rng.random_range(v_min..=v_max);
                Body::new(DVec2::new(x, y), DVec2::new(vx, vy), config.body_radius)
            })
            .collect();
    }
}
