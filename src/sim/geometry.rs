//! Axis-aligned bounding boxes and the providers that produce them
//!
//! Coordinates follow the page: origin at the playfield's top-left corner,
//! y grows downward, the ground line is at `playfield_height`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Session;
use crate::tuning::Tuning;

/// Axis-aligned box given by its top-left and bottom-right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from DOM-style edges
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap on both axes; shared edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Something that can be asked for a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Player,
    Obstacle(u32),
}

/// Source of bounding boxes for collision tests.
///
/// Returns `None` for entities it cannot place (e.g. an obstacle that no
/// longer exists).
pub trait BoundingBoxes {
    fn bounding_box(&self, session: &Session, entity: Entity) -> Option<Aabb>;
}

/// Computes boxes from the tuned playfield layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub ground_y: f32,
    pub player_x: f32,
    pub player_size: Vec2,
}

impl Playfield {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            ground_y: tuning.playfield_height,
            player_x: tuning.player_x,
            player_size: Vec2::new(tuning.player_width, tuning.player_height),
        }
    }
}

impl BoundingBoxes for Playfield {
    fn bounding_box(&self, session: &Session, entity: Entity) -> Option<Aabb> {
        match entity {
            Entity::Player => {
                let offset = session.player().jump_offset(session.now_ms(), session.tuning());
                let bottom = self.ground_y - offset;
                Some(Aabb::from_edges(
                    self.player_x,
                    bottom - self.player_size.y,
                    self.player_x + self.player_size.x,
                    bottom,
                ))
            }
            Entity::Obstacle(id) => session.obstacle(id).map(|o| {
                Aabb::from_edges(
                    o.position - o.width,
                    self.ground_y - o.height,
                    o.position,
                    self.ground_y,
                )
            }),
        }
    }
}
