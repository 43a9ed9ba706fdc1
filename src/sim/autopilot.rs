//! Idle/demo autopilot
//!
//! Steers toward the nearest uncollected star using the same four
//! directional inputs a player has.

use glam::Vec2;

use super::movement::Directions;
use super::state::GameState;
use super::tick::TickInput;

/// Axis deltas smaller than this are ignored to avoid jittering
const DEAD_ZONE: f32 = 4.0;

/// Position of the nearest uncollected star
pub fn nearest_star(state: &GameState) -> Option<Vec2> {
    state
        .stars
        .iter()
        .filter(|s| !s.collected)
        .map(|s| s.pos)
        .min_by(|a, b| {
            a.distance_squared(state.player.pos)
                .partial_cmp(&b.distance_squared(state.player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Input that moves the player toward the nearest star
pub fn steer(state: &GameState) -> TickInput {
    let Some(target) = nearest_star(state) else {
        return TickInput {
            idle_mode: true,
            ..Default::default()
        };
    };
    let delta = target - state.player.pos;

    TickInput {
        directions: Directions {
            up: delta.y < -DEAD_ZONE,
            down: delta.y > DEAD_ZONE,
            left: delta.x < -DEAD_ZONE,
            right: delta.x > DEAD_ZONE,
        },
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickConfig, TickOutcome, tick};

    #[test]
    fn test_steers_toward_nearest() {
        let mut state = GameState::new(4, 800.0, 600.0, 10);
        for star in &mut state.stars {
            star.collected = true;
        }
        state.stars[0].collected = false;
        state.stars[0].pos = Vec2::new(100.0, 500.0);
        state.player.pos = Vec2::new(400.0, 300.0);

        let input = steer(&state);
        assert!(input.directions.left && input.directions.down);
        assert!(!input.directions.right && !input.directions.up);
    }

    #[test]
    fn test_no_stars_no_movement() {
        let mut state = GameState::new(4, 800.0, 600.0, 10);
        state.stars.clear();
        assert_eq!(steer(&state).directions, Directions::default());
    }

    #[test]
    fn test_autopilot_clears_a_round() {
        let mut state = GameState::new(8, 800.0, 600.0, 10);
        let cfg = TickConfig::default();
        let dt = 1.0 / 60.0;
        let mut outcome = TickOutcome::Continue;
        let mut frame = 0u32;
        while outcome == TickOutcome::Continue {
            let input = steer(&state);
            outcome = tick(&mut state, &input, dt, f64::from(frame) * 1000.0 / 60.0, &cfg);
            frame += 1;
        }
        assert_eq!(outcome, TickOutcome::Ended { won: true });
        assert_eq!(state.score, 10);
    }
}
