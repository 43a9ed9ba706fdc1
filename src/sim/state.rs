//! Game state and core simulation types
//!
//! Everything a single run mutates lives in `GameState`. Records and
//! achievements that outlive a run belong to the session instead.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::layout::star_ring;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing started yet, start screen visible
    Idle,
    /// Active gameplay
    Running,
    /// Run is paused (still counts as running)
    Paused,
    /// Run ended, results visible
    Ended,
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub size: f32,
}

/// The player-controlled orb
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<TrailPoint>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record current position to trail (call once per animated frame)
    pub fn record_trail(&mut self) {
        self.trail.push_back(TrailPoint {
            pos: self.pos,
            size: self.size,
        });
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Fade alpha for trail entry `index` (0 = oldest)
    pub fn trail_alpha(&self, index: usize) -> f32 {
        if self.trail.is_empty() {
            return 0.0;
        }
        index as f32 / self.trail.len() as f32 * 0.7
    }
}

/// A collectable star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Base radius in [12, 18)
    pub size: f32,
    /// Once true, never false again for this run
    pub collected: bool,
    /// Breathing animation phase (radians)
    pub pulse: f32,
    /// HSL hue in degrees, saturation 100% and lightness 65%
    pub hue: f32,
    pub rotation: f32,
}

impl Star {
    /// Glow strength in [0.4, 1.0]
    pub fn glow(&self) -> f32 {
        self.pulse.sin() * 0.3 + 0.7
    }

    /// Animated outer radius
    pub fn animated_size(&self) -> f32 {
        self.size + (self.pulse * 2.0).sin() * 2.0
    }
}

/// Particle colour source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleColor {
    /// Same hue as the star that spawned it
    Star { hue: f32 },
    /// Boost gold
    Boost,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, decreases every frame
    pub life: f32,
    pub color: ParticleColor,
}

/// Things the host reacts to (sound cues, HUD refresh)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    StarCollected { index: usize, combo: u32 },
    BoostActivated,
    Paused,
    Resumed,
    SessionEnded { won: bool },
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Canvas dimensions in pixels
    pub width: f32,
    pub height: f32,
    pub time_left: f32,
    pub score: u32,
    pub player_speed: f32,
    pub combo: u32,
    pub max_combo: u32,
    pub player: Player,
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
    pub boost_active: bool,
    /// Timer-clock timestamp when the current boost expires
    pub boost_end_ms: f64,
    /// Timer-clock timestamp of the previous collection
    pub last_star_collected_ms: f64,
    /// Time spent paused, subtracted from the wall clock in pausable-timer mode
    pub paused_ms: f64,
    /// Wall clock when the current pause began
    pub pause_started_ms: Option<f64>,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state with no stars (start screen backdrop)
    pub fn idle(width: f32, height: f32) -> Self {
        let mut state = Self::new(0, width, height, 0);
        state.phase = GamePhase::Idle;
        state
    }

    /// Create a fresh running state with `star_count` stars in a ring
    pub fn new(seed: u64, width: f32, height: f32, star_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let center = Vec2::new(width / 2.0, height / 2.0);
        let stars = star_ring(&mut rng, width, height, star_count);

        Self {
            seed,
            rng,
            phase: GamePhase::Running,
            width,
            height,
            time_left: ROUND_SECONDS,
            score: 0,
            player_speed: BASE_SPEED,
            combo: 0,
            max_combo: 0,
            player: Player::new(center),
            stars,
            particles: Vec::new(),
            boost_active: false,
            boost_end_ms: 0.0,
            last_star_collected_ms: 0.0,
            paused_ms: 0.0,
            pause_started_ms: None,
            events: Vec::new(),
        }
    }

    /// Number of stars in this run
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Enter the paused phase at wall clock `now_ms`
    pub fn pause(&mut self, now_ms: f64) {
        self.phase = GamePhase::Paused;
        self.pause_started_ms = Some(now_ms);
    }

    /// Leave the paused phase, adding the wall-clock pause length to `paused_ms`
    pub fn resume(&mut self, now_ms: f64) {
        self.phase = GamePhase::Running;
        if let Some(started) = self.pause_started_ms.take() {
            self.paused_ms += (now_ms - started).max(0.0);
        }
    }

    /// True while a run is in progress (paused or not)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Canvas resized; the player is re-clamped on the next movement step
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
