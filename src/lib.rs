//! Ballkey - bouncing balls feeding a deterministic key-candidate search
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, per-tick driver)
//! - `search`: Fingerprint extraction, candidate enumeration, match checking
//! - `settings`: Run configuration
//! - `results`: Append-only log of found keys

pub mod error;
pub mod results;
pub mod search;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use results::{FoundRecord, ResultLog};
pub use settings::Settings;

/// Simulation and search constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 1200.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Ball defaults
    pub const BODY_RADIUS: f64 = 10.0;
    pub const BODY_COUNT: usize = 72;
    /// Spawn positions keep this distance from the arena edges
    pub const SPAWN_MARGIN: f64 = 50.0;

    /// Added to vertical velocity every tick (frictionless, no gravity)
    pub const GRAVITY: f64 = 0.0;
    /// Velocity multiplier applied when integrating position
    pub const FRICTION: f64 = 1.0;
    /// Extra separation added to every resolved overlap
    pub const COLLISION_EPSILON: f64 = 1.0;
    /// Speed given to a kicked ball
    pub const KICK_POWER: f64 = 50.0;

    /// Initial velocity range, widened on every reseed
    pub const INITIAL_VELOCITY_RANGE: (f64, f64) = (-1.0, 1.0);
    pub const VELOCITY_STEP: f64 = 1.0;
    /// Ticks between reseeds
    pub const RESEED_INTERVAL: u64 = 1000;

    /// Leading nibble of every candidate key
    pub const KEY_PREFIX: char = '1';
    /// Hex digits available in a 256-bit scalar
    pub const MAX_KEY_DIGITS: usize = 64;
    /// Largest body count whose candidate keys still fit in 256 bits
    pub const MAX_BODY_COUNT: usize = 252;

    /// Address version byte (mainnet P2PKH) and key compression
    pub const ADDRESS_VERSION: u8 = 0x00;
    pub const COMPRESSED_KEYS: bool = true;

    pub const TARGET_ADDRESS: &str = "12VVRNPi4SJqUTsp6FmqDqY5sGosDtysn4";
    pub const RESULT_LOG_PATH: &str = "found.txt";
    pub const FRAME_RATE: u32 = 60;
}
