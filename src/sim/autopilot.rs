//! Demo/idle mode bot
//!
//! Jumps when the nearest obstacle ahead will reach the player just as the
//! jump arc clears its height.

use super::geometry::{BoundingBoxes, Entity};
use super::state::Session;
use crate::tuning::Tuning;

/// Milliseconds into a jump before the player's feet rise above `height`
pub fn clearance_ms(tuning: &Tuning, height: f32) -> f32 {
    let duration = tuning.jump_duration_ms as f32;
    if height >= tuning.jump_height {
        // Can't clear it; jump so the apex lines up
        return duration / 2.0;
    }
    (height / tuning.jump_height).asin() / std::f32::consts::PI * duration
}

/// Whether the bot would jump right now
pub fn should_jump<G: BoundingBoxes + ?Sized>(session: &Session, geometry: &G) -> bool {
    if session.is_over() || session.player().is_jumping() {
        return false;
    }
    let Some(player) = geometry.bounding_box(session, Entity::Player) else {
        return false;
    };

    let tuning = session.tuning();
    let tick = tuning.motion_tick_ms as f32;
    let px_per_ms = session.speed() / tick;

    session
        .obstacles()
        .iter()
        .filter_map(|o| geometry.bounding_box(session, Entity::Obstacle(o.id)))
        .filter(|b| b.right() > player.left())
        .any(|b| {
            let ms_until_contact = (b.left() - player.right()) / px_per_ms;
            ms_until_contact <= clearance_ms(tuning, b.size().y) + tick
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputHandler};
    use crate::sim::Playfield;

    #[test]
    fn test_clearance_for_default_cactus() {
        let tuning = Tuning::default();
        let ms = clearance_ms(&tuning, 40.0);
        assert!((ms - 78.6).abs() < 0.5, "clearance was {}", ms);
        assert_eq!(clearance_ms(&tuning, 150.0), 300.0);
    }

    #[test]
    fn test_waits_for_distant_obstacle() {
        let mut session = Session::new(1, Tuning::default());
        session.start();
        session.spawn_obstacle();
        let playfield = Playfield::from_tuning(session.tuning());
        assert!(!should_jump(&session, &playfield));
    }

    #[test]
    fn test_jumps_for_close_obstacle() {
        let mut session = Session::new(1, Tuning::default());
        session.start();
        session.spawn_obstacle();
        // Left edge 20 px from the player: 80 ms away at 5 px / 20 ms
        session.obstacles[0].position = 130.0;
        let playfield = Playfield::from_tuning(session.tuning());
        assert!(should_jump(&session, &playfield));

        session.request_jump();
        assert!(!should_jump(&session, &playfield));
    }

    #[test]
    fn test_autopilot_survives_thirty_seconds() {
        let mut session = Session::new(2024, Tuning::default());
        let mut input = InputHandler::new();
        let playfield = Playfield::from_tuning(session.tuning());
        input.handle(&mut session, &InputEvent::PointerActivate);

        for _ in 0..(30_000 / 20) {
            if should_jump(&session, &playfield) {
                input.handle(&mut session, &InputEvent::PointerActivate);
            }
            session.advance(20);
        }
        assert!(!session.is_over());
        assert_eq!(session.score(), 300);
        assert!(session.stats().obstacles_cleared > 0);
    }
}
