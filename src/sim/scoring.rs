//! Combo and boost rules
//!
//! All timestamps are timer-clock milliseconds (see `TickConfig::pausable_timers`).

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Combo value after a collection at `now_ms`
pub fn next_combo(combo: u32, last_collected_ms: f64, now_ms: f64) -> u32 {
    if now_ms - last_collected_ms < COMBO_WINDOW_MS {
        combo + 1
    } else {
        1
    }
}

/// Speed granted by a collection at the given combo
pub fn collect_boost_speed(combo: u32) -> f32 {
    let boost_amount = 1.0 + combo.saturating_sub(1) as f32 * 0.5;
    BASE_SPEED + boost_amount
}

/// Apply the scoring side of a star collection (score, combo, boost)
pub fn register_collection(state: &mut GameState, now_ms: f64) {
    state.score += 1;
    state.combo = next_combo(state.combo, state.last_star_collected_ms, now_ms);
    state.max_combo = state.max_combo.max(state.combo);
    state.last_star_collected_ms = now_ms;

    state.player_speed = collect_boost_speed(state.combo);
    state.boost_active = true;
    state.boost_end_ms = now_ms + COLLECT_BOOST_MS;
}

/// Manual boost; only honoured while the run is active and unpaused
pub fn activate_manual_boost(state: &mut GameState, now_ms: f64) -> bool {
    if !state.is_running() || state.is_paused() {
        return false;
    }
    state.player_speed = MANUAL_BOOST_SPEED;
    state.boost_active = true;
    state.boost_end_ms = now_ms + MANUAL_BOOST_MS;
    state.events.push(GameEvent::BoostActivated);
    true
}

/// Manual boost released; speed drops only if the boost already expired
pub fn release_manual_boost(state: &mut GameState) {
    if !state.boost_active {
        state.player_speed = BASE_SPEED;
    }
}

/// Clear an expired boost. Returns true if it expired this call.
pub fn expire_boost(state: &mut GameState, now_ms: f64) -> bool {
    if state.boost_active && now_ms > state.boost_end_ms {
        state.boost_active = false;
        state.player_speed = BASE_SPEED;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_combo_window() {
        assert_eq!(next_combo(0, 0.0, 10_000.0), 1);
        assert_eq!(next_combo(1, 10_000.0, 11_999.0), 2);
        assert_eq!(next_combo(2, 10_000.0, 12_000.0), 1);
        assert_eq!(next_combo(4, 10_000.0, 13_000.0), 1);
    }

    #[test]
    fn test_collect_boost_speed_grows_with_combo() {
        assert_eq!(collect_boost_speed(1), 4.0);
        assert_eq!(collect_boost_speed(2), 4.5);
        assert_eq!(collect_boost_speed(5), 6.0);
    }

    #[test]
    fn test_register_collection_tracks_max_combo() {
        let mut state = GameState::new(1, 800.0, 600.0, 10);
        register_collection(&mut state, 10_000.0);
        assert_eq!((state.score, state.combo, state.max_combo), (1, 1, 1));
        register_collection(&mut state, 10_500.0);
        assert_eq!((state.score, state.combo, state.max_combo), (2, 2, 2));
        register_collection(&mut state, 20_000.0);
        assert_eq!((state.score, state.combo, state.max_combo), (3, 1, 2));
        assert!(state.boost_active);
        assert_eq!(state.boost_end_ms, 21_500.0);
        assert_eq!(state.player_speed, 4.0);
    }

    #[test]
    fn test_manual_boost_requires_active_run() {
        let mut state = GameState::new(1, 800.0, 600.0, 10);
        assert!(activate_manual_boost(&mut state, 1000.0));
        assert_eq!(state.player_speed, MANUAL_BOOST_SPEED);
        assert_eq!(state.boost_end_ms, 1800.0);
        assert_eq!(state.events, vec![GameEvent::BoostActivated]);

        state.phase = GamePhase::Paused;
        state.boost_end_ms = 0.0;
        assert!(!activate_manual_boost(&mut state, 2000.0));
        assert_eq!(state.boost_end_ms, 0.0);
    }

    #[test]
    fn test_release_keeps_speed_while_boosted() {
        let mut state = GameState::new(1, 800.0, 600.0, 10);
        activate_manual_boost(&mut state, 0.0);
        release_manual_boost(&mut state);
        assert_eq!(state.player_speed, MANUAL_BOOST_SPEED);

        assert!(expire_boost(&mut state, 801.0));
        assert_eq!(state.player_speed, BASE_SPEED);
        state.player_speed = 5.0;
        release_manual_boost(&mut state);
        assert_eq!(state.player_speed, BASE_SPEED);
    }

    #[test]
    fn test_expire_boost_is_strictly_after_end() {
        let mut state = GameState::new(1, 800.0, 600.0, 10);
        register_collection(&mut state, 1000.0);
        assert!(!expire_boost(&mut state, 2500.0));
        assert!(state.boost_active);
        assert!(expire_boost(&mut state, 2500.5));
        assert!(!state.boost_active);
    }
}
