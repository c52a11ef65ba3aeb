//! Run configuration
//!
//! Fixed at start-up: loaded from an optional JSON file, then overridden by
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::ArenaConfig;

/// Search run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f64,
    pub height: f64,
    pub body_count: usize,
    pub body_radius: f64,
    /// Initial inclusive velocity component range
    pub velocity_range: (f64, f64),
    /// Widening applied to each bound on reseed
    pub velocity_step: f64,
    /// Ticks between reseeds
    pub reseed_interval: u64,

    // === Search ===
    pub target_address: String,
    /// Append-only log of matches
    pub result_log: PathBuf,
    /// RNG seed for body spawning
    pub seed: u64,

    // === Driver ===
    /// Frame rate cap (0 = unthrottled)
    pub frame_rate: u32,
    /// Stop after this many ticks (None = run until found)
    pub max_ticks: Option<u64>,
    /// Ticks between info-level progress lines
    pub progress_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            body_count: BODY_COUNT,
            body_radius: BODY_RADIUS,
            velocity_range: INITIAL_VELOCITY_RANGE,
            velocity_step: VELOCITY_STEP,
            reseed_interval: RESEED_INTERVAL,

            target_address: TARGET_ADDRESS.to_string(),
            result_log: PathBuf::from(RESULT_LOG_PATH),
            seed: 0,

            frame_rate: FRAME_RATE,
            max_ticks: None,
            progress_interval: 100,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the simulation or key encoding cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.body_count == 0 {
            return Err(Error::Config("body_count must be at least 1".into()));
        }
        if self.body_count > MAX_BODY_COUNT {
            return Err(Error::Config(format!(
                "body_count {} exceeds {} (keys must fit in 256 bits)",
                self.body_count, MAX_BODY_COUNT
            )));
        }
        if self.body_radius.is_nan() || self.body_radius <= 0.0 {
            return Err(Error::Config("body_radius must be positive".into()));
        }
        if self.width < 2.0 * SPAWN_MARGIN || self.height < 2.0 * SPAWN_MARGIN {
            return Err(Error::Config(format!(
                "arena {}x{} is smaller than twice the spawn margin ({})",
                self.width, self.height, SPAWN_MARGIN
            )));
        }
        // Walls clamp into [radius, extent - radius], which must not be empty
        if 2.0 * self.body_radius > self.width.min(self.height) {
            return Err(Error::Config(format!(
                "body_radius {} does not fit in a {}x{} arena",
                self.body_radius, self.width, self.height
            )));
        }
        let (min, max) = self.velocity_range;
        if min.is_nan() || max.is_nan() || min > max {
            return Err(Error::Config(format!("velocity range [{min}, {max}] is inverted")));
        }
        if self.velocity_step.is_nan() || self.velocity_step < 0.0 {
            return Err(Error::Config("velocity_step must not be negative".into()));
        }
        if self.reseed_interval == 0 {
            return Err(Error::Config("reseed_interval must be at least 1".into()));
        }
        if self.target_address.is_empty() {
            return Err(Error::Config("target_address is empty".into()));
        }
        Ok(())
    }

    /// Arena parameters derived from these settings
    pub fn arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            width: self.width,
            height: self.height,
            body_count: self.body_count,
            body_radius: self.body_radius,
            velocity_range: self.velocity_range,
            velocity_step: self.velocity_step,
            spawn_margin: SPAWN_MARGIN,
            kick_power: KICK_POWER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena_config(), ArenaConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "body_count": 8, "seed": 5 }"#).unwrap();
        assert_eq!(settings.body_count, 8);
        assert_eq!(settings.seed, 5);
        assert_eq!(settings.target_address, TARGET_ADDRESS);
        assert_eq!(settings.reseed_interval, RESEED_INTERVAL);
    }

    #[test]
    fn test_validate_rejects() {
        let cases: Vec<fn(&mut Settings)> = vec![
            |s: &mut Settings| s.body_count = 0,
            |s: &mut Settings| s.body_count = MAX_BODY_COUNT + 1,
            |s: &mut Settings| s.body_radius = 0.0,
            |s: &mut Settings| s.body_radius = f64::NAN,
            |s: &mut Settings| s.body_radius = 400.0,
            |s: &mut Settings| s.width = 60.0,
            |s: &mut Settings| s.velocity_range = (2.0, 1.0),
            |s: &mut Settings| s.velocity_range = (f64::NAN, 1.0),
            |s: &mut Settings| s.velocity_step = -1.0,
            |s: &mut Settings| s.velocity_step = f64::NAN,
            |s: &mut Settings| s.reseed_interval = 0,
            |s: &mut Settings| s.target_address.clear(),
        ];
        for mutate in cases {
            let mut settings = Settings::default();
            mutate(&mut settings);
            assert!(matches!(settings.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_oversized_body_stays_out_of_arena() {
        let settings = Settings {
            body_radius: 400.0,
            body_count: 1,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Config(_))));

        // Largest radius that still leaves a legal position on both axes
        let settings = Settings {
            body_radius: ARENA_HEIGHT / 2.0,
            body_count: 1,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_largest_body_count_accepted() {
        let settings = Settings {
            body_count: MAX_BODY_COUNT,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }
}
