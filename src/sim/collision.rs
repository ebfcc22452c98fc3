//! Player vs. obstacle collision check
//!
//! Run once per obstacle on every motion tick. A hit ends the session on the spot.

use super::geometry::{BoundingBoxes, Entity};
use super::state::Session;

/// Test the player against obstacle `id`, ending the session on overlap.
///
/// No-op once the session is over. Returns true if this check ended it.
pub fn check_collision<G: BoundingBoxes + ?Sized>(
    session: &mut Session,
    id: u32,
    geometry: &G,
) -> bool {
    if session.is_over() {
        return false;
    }
    session.stats.collision_checks += 1;

    let player = geometry.bounding_box(session, Entity::Player);
    let obstacle = geometry.bounding_box(session, Entity::Obstacle(id));
    let (Some(player), Some(obstacle)) = (player, obstacle) else {
        return false;
    };

    if player.overlaps(&obstacle) {
        log::debug!(
            "Collision with obstacle {} at x={:.1}",
            id,
            obstacle.left()
        );
        session.end();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{Aabb, Playfield};
    use crate::sim::SessionPhase;
    use crate::tuning::Tuning;

    /// Fixed boxes regardless of session state
    struct StaticBoxes {
        player: Aabb,
        obstacle: Aabb,
    }

    impl BoundingBoxes for StaticBoxes {
        fn bounding_box(&self, _session: &Session, entity: Entity) -> Option<Aabb> {
            match entity {
                Entity::Player => Some(self.player),
                Entity::Obstacle(_) => Some(self.obstacle),
            }
        }
    }

    fn playing_session() -> Session {
        let mut session = Session::new(9, Tuning::default());
        session.start();
        session
    }

    #[test]
    fn test_overlap_ends_session() {
        let mut session = playing_session();
        let boxes = StaticBoxes {
            player: Aabb::from_edges(50.0, 160.0, 90.0, 200.0),
            obstacle: Aabb::from_edges(80.0, 160.0, 100.0, 200.0),
        };
        assert!(check_collision(&mut session, 1, &boxes));
        assert_eq!(session.phase(), SessionPhase::Over);
    }

    #[test]
    fn test_touching_is_not_collision() {
        let mut session = playing_session();
        let boxes = StaticBoxes {
            player: Aabb::from_edges(50.0, 160.0, 90.0, 200.0),
            obstacle: Aabb::from_edges(90.0, 160.0, 110.0, 200.0),
        };
        assert!(!check_collision(&mut session, 1, &boxes));
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.stats().collision_checks, 1);
    }

    #[test]
    fn test_noop_after_game_over() {
        let mut session = playing_session();
        session.end();
        let boxes = StaticBoxes {
            player: Aabb::from_edges(0.0, 0.0, 10.0, 10.0),
            obstacle: Aabb::from_edges(0.0, 0.0, 10.0, 10.0),
        };
        assert!(!check_collision(&mut session, 1, &boxes));
        assert_eq!(session.stats().collision_checks, 0);
    }

    #[test]
    fn test_jumping_player_clears_obstacle() {
        let mut session = playing_session();
        let id = session.spawn_obstacle().expect("playing");
        // Park the obstacle right under the player
        session.obstacles[0].position = 80.0;
        let playfield = Playfield::from_tuning(session.tuning());

        session.request_jump();
        session.now_ms += 300; // apex
        assert!(!check_collision(&mut session, id, &playfield));

        session.now_ms += 290; // nearly landed
        assert!(check_collision(&mut session, id, &playfield));
        assert!(session.is_over());
    }

    #[test]
    fn test_missing_obstacle_is_ignored() {
        let mut session = playing_session();
        let playfield = Playfield::from_tuning(session.tuning());
        assert!(!check_collision(&mut session, 42, &playfield));
        assert!(!session.is_over());
    }
}
