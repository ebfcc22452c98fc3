//! Rendering surface abstraction
//!
//! The simulation never touches the page. Each frame `present` drains the
//! session's events into a [`Surface`] and pushes current obstacle offsets.

use crate::sim::{GameEvent, Session};

/// Whatever draws the game (the DOM in the browser)
pub trait Surface {
    fn create_obstacle_view(&mut self, id: u32, width: f32, height: f32);
    fn destroy_obstacle_view(&mut self, id: u32);
    /// Distance from the playfield's right edge to the obstacle's right edge
    fn set_obstacle_offset(&mut self, id: u32, right_offset: f32);
    fn set_player_jumping(&mut self, jumping: bool);
    fn set_score_text(&mut self, score: u64);
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_instructions_visible(&mut self, visible: bool);
}

/// Apply pending session events and obstacle positions to `surface`
pub fn present<S: Surface + ?Sized>(surface: &mut S, session: &mut Session) {
    for event in session.drain_events() {
        match event {
            GameEvent::Started => {}
            GameEvent::Restarted => {
                surface.set_score_text(0);
                surface.set_game_over_visible(false);
            }
            GameEvent::JumpStarted => surface.set_player_jumping(true),
            GameEvent::JumpEnded => surface.set_player_jumping(false),
            GameEvent::InstructionsHidden => surface.set_instructions_visible(false),
            GameEvent::InstructionsShown => surface.set_instructions_visible(true),
            GameEvent::ObstacleSpawned { id, width, height } => {
                surface.create_obstacle_view(id, width, height)
            }
            GameEvent::ObstacleRemoved { id } => surface.destroy_obstacle_view(id),
            GameEvent::ScoreChanged { score } => surface.set_score_text(score),
            GameEvent::Escalated { .. } => {}
            GameEvent::GameOver { .. } => {
                surface.set_game_over_visible(true);
                surface.set_instructions_visible(false);
            }
        }
    }

    let width = session.tuning().playfield_width;
    for obstacle in session.obstacles() {
        surface.set_obstacle_offset(obstacle.id, width - obstacle.position);
    }
}
