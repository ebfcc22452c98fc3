//! Session state and core simulation types
//!
//! One `Session` owns everything a play session mutates: score, speed, spawn
//! cadence, the player, live obstacles and every timer.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timer::Timer;
use crate::tuning::Tuning;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first jump input
    NotStarted,
    /// Timers running
    Playing,
    /// Collision happened, waiting for restart
    Over,
}

/// The jumping character
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Player {
    pub(crate) jumping: bool,
    pub(crate) jump_started_ms: u64,
}

impl Player {
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Height above the ground line at `now_ms`.
    ///
    /// Follows half a sine wave over the jump window, peaking at `jump_height`
    /// halfway through.
    pub fn jump_offset(&self, now_ms: u64, tuning: &Tuning) -> f32 {
        if !self.jumping {
            return 0.0;
        }
        let elapsed = now_ms.saturating_sub(self.jump_started_ms) as f32;
        let t = (elapsed / tuning.jump_duration_ms as f32).clamp(0.0, 1.0);
        tuning.jump_height * (std::f32::consts::PI * t).sin()
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// X of the right edge, measured from the playfield's left edge
    pub position: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Fully past the left edge by at least its own width
    pub fn is_off_screen(&self) -> bool {
        self.position < -self.width
    }
}

/// Notifications for the rendering surface, drained each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    JumpStarted,
    JumpEnded,
    InstructionsHidden,
    InstructionsShown,
    ObstacleSpawned { id: u32, width: f32, height: f32 },
    ObstacleRemoved { id: u32 },
    ScoreChanged { score: u64 },
    Escalated { speed: f32, spawn_interval_ms: u64 },
    GameOver { score: u64 },
}

/// Running counters, reset on restart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub obstacles_spawned: u32,
    /// Obstacles that scrolled off screen (dodged)
    pub obstacles_cleared: u32,
    pub collision_checks: u64,
    pub jumps: u32,
}

/// Every timer the session owns
#[derive(Debug, Clone, Default)]
pub(crate) struct Timers {
    pub jump_reset: Timer,
    pub motion: Timer,
    pub spawn: Timer,
    pub score: Timer,
}

impl Timers {
    pub fn cancel_all(&mut self) {
        self.jump_reset.cancel();
        self.motion.cancel();
        self.spawn.cancel();
        self.score.cancel();
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Session clock
    pub(crate) now_ms: u64,
    pub(crate) phase: SessionPhase,
    pub(crate) score: u64,
    /// Pixels per motion tick, shared by every obstacle
    pub(crate) speed: f32,
    pub(crate) spawn_interval_ms: u64,
    pub(crate) player: Player,
    /// Live obstacles, ascending id
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) timers: Timers,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) stats: SessionStats,
    pub(crate) instructions_visible: bool,
    next_id: u32,
}

impl Session {
    /// Create a session in `NotStarted`. Tuning is taken as-is; validate it first.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0,
            phase: SessionPhase::NotStarted,
            score: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            timers: Timers::default(),
            events: Vec::new(),
            stats: SessionStats::default(),
            instructions_visible: true,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn_interval_ms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.obstacles[i])
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }

    pub fn spawn_timer_active(&self) -> bool {
        self.timers.spawn.is_active()
    }

    pub fn score_timer_active(&self) -> bool {
        self.timers.score.is_active()
    }

    pub fn motion_timer_active(&self) -> bool {
        self.timers.motion.is_active()
    }

    /// Take all pending view events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a jump unless already airborne or the game is over.
    /// Returns whether a jump started.
    pub fn request_jump(&mut self) -> bool {
        if self.player.jumping || self.is_over() {
            return false;
        }
        self.player.jumping = true;
        self.player.jump_started_ms = self.now_ms;
        self.timers
            .jump_reset
            .start_once(self.now_ms, self.tuning.jump_duration_ms);
        self.stats.jumps += 1;
        self.events.push(GameEvent::JumpStarted);

        if self.instructions_visible {
            self.instructions_visible = false;
            self.events.push(GameEvent::InstructionsHidden);
        }
        true
    }

    /// Jump window elapsed
    pub(crate) fn land(&mut self) {
        if self.player.jumping {
            self.player.jumping = false;
            self.events.push(GameEvent::JumpEnded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(1, Tuning::default());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 5.0);
        assert_eq!(session.spawn_interval_ms(), 2000);
        assert!(!session.player().is_jumping());
        assert!(session.obstacles().is_empty());
        assert!(session.instructions_visible());
    }

    #[test]
    fn test_jump_offset_arc() {
        let tuning = Tuning::default();
        let player = Player {
            jumping: true,
            jump_started_ms: 1000,
        };
        assert_eq!(player.jump_offset(1000, &tuning), 0.0);
        assert!((player.jump_offset(1300, &tuning) - tuning.jump_height).abs() < 0.01);
        assert!(player.jump_offset(1600, &tuning).abs() < 0.01);
        assert_eq!(Player::default().jump_offset(1300, &tuning), 0.0);
    }

    #[test]
    fn test_request_jump_hides_instructions_once() {
        let mut session = Session::new(1, Tuning::default());
        assert!(session.request_jump());
        assert!(session.player().is_jumping());
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::JumpStarted, GameEvent::InstructionsHidden]
        );
    }

    #[test]
    fn test_request_jump_while_jumping_is_noop() {
        let mut session = Session::new(1, Tuning::default());
        assert!(session.request_jump());
        session.drain_events();
        let timer_before = session.timers.jump_reset.clone();

        for _ in 0..5 {
            assert!(!session.request_jump());
        }
        assert!(session.player().is_jumping());
        assert_eq!(session.timers.jump_reset, timer_before);
        assert_eq!(session.stats().jumps, 1);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_obstacle_off_screen_threshold() {
        let mut o = Obstacle {
            id: 1,
            position: -20.0,
            width: 20.0,
            height: 40.0,
        };
        assert!(!o.is_off_screen());
        o.position = -20.5;
        assert!(o.is_off_screen());
    }
}
