//! Cosmic Collector - A single-screen star collection arcade game
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, collisions, combos, effects)
//! - `session`: Run lifecycle (start, pause, end, records, achievements)
//! - `renderer`: Scene geometry and WebGPU pipeline
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Key/value storage for records and settings
//! - `ui`: HUD and end-screen view models

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::Records;
pub use session::{FrameStatus, Session, SessionResult};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Length of a round in seconds
    pub const ROUND_SECONDS: f32 = 60.0;
    /// Stars placed per round unless settings override it
    pub const DEFAULT_STAR_COUNT: usize = 10;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 24.0;
    /// Base speed in pixels per 1/60 s tick
    pub const BASE_SPEED: f32 = 3.0;
    /// Speed while the manual boost is held
    pub const MANUAL_BOOST_SPEED: f32 = 8.0;
    /// Reference frame rate the speed units are expressed in
    pub const SPEED_REFERENCE_FPS: f32 = 60.0;
    /// Wall bounce damping (reported only, never fed back)
    pub const BOUNCE_DAMPING: f32 = 0.7;

    /// Collections closer together than this extend the combo
    pub const COMBO_WINDOW_MS: f64 = 2000.0;
    /// Boost duration after collecting a star
    pub const COLLECT_BOOST_MS: f64 = 1500.0;
    /// Boost duration of the manual boost
    pub const MANUAL_BOOST_MS: f64 = 800.0;

    /// Star layout
    pub const STAR_MIN_SIZE: f32 = 12.0;
    pub const STAR_SIZE_SPREAD: f32 = 6.0;
    pub const STAR_RING_FACTOR: f32 = 0.3;
    pub const STAR_RING_JITTER: f32 = 25.0;
    pub const STAR_PULSE_STEP: f32 = 0.03;
    pub const STAR_ROTATION_STEP: f32 = 0.01;

    /// Particles spawned when a star is collected
    pub const EXPLOSION_PARTICLES: usize = 25;
    /// Particles spawned per frame while boosted
    pub const BOOST_PARTICLES_PER_FRAME: usize = 2;
    /// Life lost per frame (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Trail history length
    pub const TRAIL_LENGTH: usize = 15;

    /// Achievement thresholds
    pub const SPEED_DEMON_COMBO: u32 = 5;
    pub const TIME_MASTER_SECONDS: f32 = 30.0;

    /// HUD thresholds
    pub const LOW_TIME_WARNING: f32 = 10.0;
}
