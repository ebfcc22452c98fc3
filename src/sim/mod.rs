//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Session clock only, advanced explicitly
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::check_collision;
pub use geometry::{Aabb, BoundingBoxes, Entity, Playfield};
pub use state::{GameEvent, Obstacle, Player, Session, SessionPhase, SessionStats};
pub use timer::Timer;
