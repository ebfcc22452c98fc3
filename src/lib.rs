//! Cactus Dash - a side-scrolling jump-the-cactus reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, obstacles, collisions, session lifecycle)
//! - `input`: Maps raw key/pointer events to session actions
//! - `view`: Rendering surface abstraction fed by simulation events
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod sim;
pub mod tuning;
pub mod view;

pub use input::{InputEvent, InputHandler};
pub use sim::{Session, SessionPhase};
pub use tuning::{HeightRange, Tuning, TuningError};
pub use view::{Surface, present};

/// Default game balance, mirrored by `Tuning::default()`
pub mod consts {
    /// Length of one jump, must match the CSS `jump` animation
    pub const JUMP_DURATION_MS: u64 = 600;
    /// Peak height of the jump arc (pixels)
    pub const JUMP_HEIGHT: f32 = 100.0;

    /// Obstacle motion tick
    pub const MOTION_TICK_MS: u64 = 20;
    /// Scoring tick (one point per firing)
    pub const SCORE_TICK_MS: u64 = 100;

    /// Obstacle speed (pixels per motion tick)
    pub const INITIAL_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const MAX_SPEED: f32 = 15.0;
    /// Difficulty escalates every this many points
    pub const ESCALATION_SCORE_STEP: u64 = 100;

    /// Spawn cadence
    pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 2000;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 800;

    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 600.0;
    pub const PLAYFIELD_HEIGHT: f32 = 200.0;
    /// Obstacles start this far beyond the right edge
    pub const SPAWN_MARGIN: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Player box, standing on the ground line
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Upper bound for any tuned duration (one hour)
    pub const MAX_DURATION_MS: u64 = 60 * 60 * 1000;

    /// Key code that triggers a jump
    pub const JUMP_KEY_CODE: &str = "Space";
}
