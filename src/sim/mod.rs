//! Deterministic simulation module
//!
//! All body motion lives here. This module must be pure and deterministic:
//! - Fixed step only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod tick;

pub use arena::{Arena, ArenaConfig};
pub use body::Body;
pub use collision::{CollisionResult, body_body_collision, resolve_all, resolve_pair};
pub use tick::{BodyView, Progress, RenderSnapshot, Session, TickInput, TickOutcome};
