//! Game balance and layout tuning
//!
//! Loaded from an optional JSON block on the page; every field falls back to
//! the values in [`crate::consts`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning input
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} ({value} ms) exceeds {max} ms")]
    DurationTooLong {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("initial_speed ({initial}) exceeds max_speed ({max})")]
    SpeedAboveCeiling { initial: f32, max: f32 },
    #[error("min_spawn_interval_ms ({floor}) exceeds initial_spawn_interval_ms ({initial})")]
    SpawnFloorAboveInitial { floor: u64, initial: u64 },
    #[error("obstacle height range {min}..={max} is inverted")]
    InvertedHeightRange { min: f32, max: f32 },
}

/// Inclusive range obstacle heights are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    pub fn fixed(height: f32) -> Self {
        Self {
            min: height,
            max: height,
        }
    }

    /// Draw a height; a degenerate range always yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }
}

impl Default for HeightRange {
    fn default() -> Self {
        Self::fixed(OBSTACLE_HEIGHT)
    }
}

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub jump_duration_ms: u64,
    pub jump_height: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Timers ===
    pub motion_tick_ms: u64,
    pub score_tick_ms: u64,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub escalation_score_step: u64,
    pub initial_spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,
    pub min_spawn_interval_ms: u64,

    // === Layout ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub spawn_margin: f32,
    pub obstacle_width: f32,
    pub obstacle_height: HeightRange,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jump_duration_ms: JUMP_DURATION_MS,
            jump_height: JUMP_HEIGHT,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            motion_tick_ms: MOTION_TICK_MS,
            score_tick_ms: SCORE_TICK_MS,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            max_speed: MAX_SPEED,
            escalation_score_step: ESCALATION_SCORE_STEP,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: HeightRange::default(),
        }
    }
}

impl Tuning {
    /// Cacti of random height between 30 and 50 pixels
    pub fn classic_random_cactus() -> Self {
        Self {
            obstacle_height: HeightRange {
                min: 30.0,
                max: 50.0,
            },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning block; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.escalation_score_step == 0 {
            return Err(TuningError::NotPositive {
                field: "escalation_score_step",
            });
        }

        let durations = [
            ("jump_duration_ms", self.jump_duration_ms),
            ("motion_tick_ms", self.motion_tick_ms),
            ("score_tick_ms", self.score_tick_ms),
            ("initial_spawn_interval_ms", self.initial_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(TuningError::NotPositive { field });
            }
            if value > MAX_DURATION_MS {
                return Err(TuningError::DurationTooLong {
                    field,
                    value,
                    max: MAX_DURATION_MS,
                });
            }
        }
        if self.spawn_interval_step_ms > MAX_DURATION_MS {
            return Err(TuningError::DurationTooLong {
                field: "spawn_interval_step_ms",
                value: self.spawn_interval_step_ms,
                max: MAX_DURATION_MS,
            });
        }

        let numbers = [
            ("jump_height", self.jump_height),
            ("player_x", self.player_x),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("initial_speed", self.initial_speed),
            ("speed_step", self.speed_step),
            ("max_speed", self.max_speed),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("spawn_margin", self.spawn_margin),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height.min", self.obstacle_height.min),
            ("obstacle_height.max", self.obstacle_height.max),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field });
            }
        }

        let lengths = [
            ("jump_height", self.jump_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("initial_speed", self.initial_speed),
            ("speed_step", self.speed_step),
            ("max_speed", self.max_speed),
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height.min", self.obstacle_height.min),
        ];
        for (field, value) in lengths {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field });
            }
        }

        if self.initial_speed > self.max_speed {
            return Err(TuningError::SpeedAboveCeiling {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(TuningError::SpawnFloorAboveInitial {
                floor: self.min_spawn_interval_ms,
                initial: self.initial_spawn_interval_ms,
            });
        }
        if self.obstacle_height.max < self.obstacle_height.min {
            return Err(TuningError::InvertedHeightRange {
                min: self.obstacle_height.min,
                max: self.obstacle_height.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.initial_speed, 5.0);
        assert_eq!(tuning.initial_spawn_interval_ms, 2000);
        assert_eq!(tuning.jump_duration_ms, 600);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_speed": 7.5, "playfield_width": 800 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.initial_speed, 7.5);
        assert_eq!(tuning.playfield_width, 800.0);
        assert_eq!(tuning.max_speed, MAX_SPEED);
        assert_eq!(tuning.obstacle_height, HeightRange::fixed(OBSTACLE_HEIGHT));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = Tuning::from_json(r#"{ "motion_tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "motion_tick_ms"
            }
        ));
    }

    #[test]
    fn test_overflowing_height_rejected() {
        // 1e39 does not fit in an f32 and parses as infinity
        let err = Tuning::from_json(r#"{ "obstacle_height": { "min": 30, "max": 1e39 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotFinite {
                field: "obstacle_height.max"
            }
        ));
    }

    #[test]
    fn test_non_finite_layout_rejected() {
        let tuning = Tuning {
            spawn_margin: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite {
                field: "spawn_margin"
            })
        ));

        let tuning = Tuning {
            player_x: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite { field: "player_x" })
        ));
    }

    #[test]
    fn test_huge_duration_rejected() {
        let err = Tuning::from_json(r#"{ "jump_duration_ms": 18446744073709551615 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::DurationTooLong {
                field: "jump_duration_ms",
                ..
            }
        ));

        let tuning = Tuning {
            spawn_interval_step_ms: MAX_DURATION_MS + 1,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::DurationTooLong { .. })
        ));
    }

    #[test]
    fn test_zero_escalation_step_rejected() {
        let err = Tuning::from_json(r#"{ "escalation_score_step": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "escalation_score_step"
            }
        ));
    }

    #[test]
    fn test_spawn_floor_above_initial_rejected() {
        let tuning = Tuning {
            min_spawn_interval_ms: 3000,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::SpawnFloorAboveInitial { .. })
        ));
    }

    #[test]
    fn test_speed_above_ceiling_rejected() {
        let tuning = Tuning {
            initial_speed: 20.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::SpeedAboveCeiling { .. })
        ));
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let tuning = Tuning {
            obstacle_height: HeightRange {
                min: 50.0,
                max: 30.0,
            },
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedHeightRange { .. })
        ));
    }

    #[test]
    fn test_random_cactus_heights_in_range() {
        let range = Tuning::classic_random_cactus().obstacle_height;
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let h = range.sample(&mut rng);
            assert!((30.0..=50.0).contains(&h), "height {} out of range", h);
        }
    }

    #[test]
    fn test_fixed_height_never_touches_rng() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(HeightRange::fixed(42.0).sample(&mut rng), 42.0);
    }
}
