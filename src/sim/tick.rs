//! Session lifecycle and the timer-driven game loop
//!
//! `advance` moves the session clock forward and fires every timer that comes
//! due, in chronological order.

use super::collision::check_collision;
use super::geometry::{BoundingBoxes, Playfield};
use super::state::{GameEvent, Obstacle, Player, Session, SessionPhase, SessionStats};

/// Which timer fired. Declaration order breaks ties at the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimerSlot {
    JumpReset,
    Motion,
    Spawn,
    Score,
}

impl Session {
    /// Begin play: arm the spawn, scoring and motion timers.
    /// Only acts from `NotStarted`.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.phase = SessionPhase::Playing;

        let now = self.now_ms;
        self.timers
            .spawn
            .start_repeating(now, self.spawn_interval_ms);
        self.timers
            .score
            .start_repeating(now, self.tuning.score_tick_ms);
        self.timers
            .motion
            .start_repeating(now, self.tuning.motion_tick_ms);

        self.events.push(GameEvent::Started);
        log::info!("Game started");
    }

    /// Stop the run after a collision.
    ///
    /// Obstacles stay where they are. The motion timer notices on its next
    /// firing and cancels itself.
    pub fn end(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.phase = SessionPhase::Over;
        self.timers.score.cancel();
        self.timers.spawn.cancel();

        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over! Final score: {}", self.score);
    }

    /// Reset everything to initial values, purge obstacles and start again
    pub fn restart(&mut self) {
        self.timers.cancel_all();

        for obstacle in std::mem::take(&mut self.obstacles) {
            self.events.push(GameEvent::ObstacleRemoved { id: obstacle.id });
        }
        if self.player.jumping {
            self.events.push(GameEvent::JumpEnded);
        }
        self.player = Player::default();

        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.spawn_interval_ms = self.tuning.initial_spawn_interval_ms;
        self.stats = SessionStats::default();
        self.phase = SessionPhase::NotStarted;

        self.instructions_visible = true;
        self.events.push(GameEvent::Restarted);
        self.events.push(GameEvent::InstructionsShown);
        log::info!("Game restarted");

        self.start();
    }

    /// Add one obstacle just beyond the right edge. No-op once over.
    pub fn spawn_obstacle(&mut self) -> Option<u32> {
        if self.is_over() {
            return None;
        }
        let id = self.next_entity_id();
        let width = self.tuning.obstacle_width;
        let height = self.tuning.obstacle_height.sample(&mut self.rng);
        self.obstacles.push(Obstacle {
            id,
            position: self.tuning.playfield_width + self.tuning.spawn_margin,
            width,
            height,
        });
        self.stats.obstacles_spawned += 1;
        self.events
            .push(GameEvent::ObstacleSpawned { id, width, height });
        log::debug!("Spawned obstacle {} (h={:.0})", id, height);
        Some(id)
    }

    /// One scoring firing: add a point and escalate on thresholds
    pub fn on_score_tick(&mut self) {
        if self.is_over() {
            return;
        }
        self.score += 1;
        self.events.push(GameEvent::ScoreChanged { score: self.score });

        // A zero step (unvalidated tuning) never escalates
        let on_threshold = self.score.checked_rem(self.tuning.escalation_score_step) == Some(0);
        if !on_threshold || self.speed >= self.tuning.max_speed {
            return;
        }
        self.speed = (self.speed + self.tuning.speed_step).min(self.tuning.max_speed);

        if self.spawn_interval_ms > self.tuning.min_spawn_interval_ms {
            self.spawn_interval_ms = self
                .spawn_interval_ms
                .saturating_sub(self.tuning.spawn_interval_step_ms)
                .max(self.tuning.min_spawn_interval_ms);
            // New cadence applies from now, not after the current period
            if self.phase == SessionPhase::Playing {
                self.timers
                    .spawn
                    .start_repeating(self.now_ms, self.spawn_interval_ms);
            }
        }

        self.events.push(GameEvent::Escalated {
            speed: self.speed,
            spawn_interval_ms: self.spawn_interval_ms,
        });
        log::info!(
            "Speed increased to {} (spawn every {} ms)",
            self.speed,
            self.spawn_interval_ms
        );
    }

    /// One motion firing: move every obstacle, drop the ones off screen and
    /// check each against the player.
    pub fn on_motion_tick<G: BoundingBoxes + ?Sized>(&mut self, geometry: &G) {
        if self.is_over() {
            self.timers.motion.cancel();
            return;
        }

        let mut removed = Vec::new();
        for i in 0..self.obstacles.len() {
            let speed = self.speed;
            let obstacle = &mut self.obstacles[i];
            obstacle.position -= speed;
            let id = obstacle.id;
            if obstacle.is_off_screen() {
                removed.push(id);
            }

            check_collision(self, id, geometry);
            // Remaining obstacles see the game over and stay put
            if self.is_over() {
                break;
            }
        }

        if !removed.is_empty() {
            self.obstacles.retain(|o| !removed.contains(&o.id));
            for id in removed {
                self.stats.obstacles_cleared += 1;
                self.events.push(GameEvent::ObstacleRemoved { id });
                log::debug!("Obstacle {} cleared", id);
            }
        }
    }

    /// Advance the clock by `dt_ms`, using the tuned playfield for collisions
    pub fn advance(&mut self, dt_ms: u64) {
        let playfield = Playfield::from_tuning(&self.tuning);
        self.advance_with(dt_ms, &playfield);
    }

    /// Advance the clock by `dt_ms`, firing due timers in order
    pub fn advance_with<G: BoundingBoxes + ?Sized>(&mut self, dt_ms: u64, geometry: &G) {
        let target = self.now_ms.saturating_add(dt_ms);
        while let Some((due, slot)) = self.next_due(target) {
            self.now_ms = due;
            self.fire(slot, geometry);
        }
        self.now_ms = target;
    }

    fn next_due(&self, limit: u64) -> Option<(u64, TimerSlot)> {
        [
            (TimerSlot::JumpReset, &self.timers.jump_reset),
            (TimerSlot::Motion, &self.timers.motion),
            (TimerSlot::Spawn, &self.timers.spawn),
            (TimerSlot::Score, &self.timers.score),
        ]
        .into_iter()
        .filter_map(|(slot, timer)| timer.due_at().map(|due| (due, slot)))
        .filter(|(due, _)| *due <= limit)
        .min()
    }

    fn fire<G: BoundingBoxes + ?Sized>(&mut self, slot: TimerSlot, geometry: &G) {
        match slot {
            TimerSlot::JumpReset => {
                self.timers.jump_reset.fire();
                self.land();
            }
            TimerSlot::Motion => {
                self.timers.motion.fire();
                self.on_motion_tick(geometry);
            }
            TimerSlot::Spawn => {
                self.timers.spawn.fire();
                self.spawn_obstacle();
            }
            TimerSlot::Score => {
                self.timers.score.fire();
                self.on_score_tick();
            }
        }
    }
}
