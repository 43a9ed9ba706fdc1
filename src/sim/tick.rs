//! Per-frame simulation step
//!
//! Core game loop that advances a run by one rendered frame. Logic runs in
//! a fixed order; decorative animation runs last, even while paused.

use super::collision::touching_stars;
use super::effects;
use super::movement::{Directions, MovementReport, move_player};
use super::scoring;
use super::state::{GameEvent, GamePhase, GameState};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub directions: Directions,
    /// Idle/demo mode - autopilot steers instead of the player
    pub idle_mode: bool,
}

/// Per-frame knobs derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    /// Subtract paused time from the timer clock (boost/combo freeze while paused)
    pub pausable_timers: bool,
    pub trails: bool,
    pub max_particles: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            pausable_timers: false,
            trails: true,
            max_particles: 2000,
        }
    }
}

/// How a frame finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running; render this frame
    Continue,
    /// The run is over; show results instead of rendering
    Ended { won: bool },
    /// Nothing to simulate (idle or already ended)
    Inactive,
}

/// Clock used for boost and combo timers
pub fn timer_now(state: &GameState, now_ms: f64, config: &TickConfig) -> f64 {
    if config.pausable_timers {
        now_ms - state.paused_ms
    } else {
        now_ms
    }
}

/// Advance the game state by one frame of `dt` seconds at wall clock `now_ms`
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    now_ms: f64,
    config: &TickConfig,
) -> TickOutcome {
    match state.phase {
        GamePhase::Idle | GamePhase::Ended => return TickOutcome::Inactive,
        // Pause length is measured on resume, not from frame deltas
        GamePhase::Paused => {}
        GamePhase::Running => {
            if let Some(outcome) = step(state, input, dt, now_ms, config) {
                return outcome;
            }
        }
    }

    effects::animate(state, config.trails, config.max_particles);
    TickOutcome::Continue
}

/// Gameplay half of a frame; `Some` when the run ended
fn step(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    now_ms: f64,
    config: &TickConfig,
) -> Option<TickOutcome> {
    state.time_left -= dt;
    if state.time_left <= 0.0 {
        return Some(TickOutcome::Ended { won: false });
    }

    let report: MovementReport = move_player(
        &mut state.player,
        input.directions,
        state.player_speed,
        dt,
        state.width,
        state.height,
    );
    if report.hit_wall {
        log::trace!("Wall bounce, damped direction {:?}", report.bounced_dir);
    }

    let now = timer_now(state, now_ms, config);
    if scoring::expire_boost(state, now) {
        log::trace!("Boost expired");
    }

    for index in touching_stars(&state.player, &state.stars) {
        state.stars[index].collected = true;
        scoring::register_collection(state, now);
        effects::spawn_star_explosion(&mut state.rng, &state.stars[index], &mut state.particles);
        state.events.push(GameEvent::StarCollected {
            index,
            combo: state.combo,
        });
        log::debug!(
            "Star {} collected: score {}, combo {}",
            index,
            state.score,
            state.combo
        );
    }

    if state.score as usize >= state.star_count() && state.star_count() > 0 {
        return Some(TickOutcome::Ended { won: true });
    }

    None
}
