//! Frame simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Wall-clock timestamps and frame deltas come in as plain numbers
//! - Seeded RNG only
//! - Stable iteration order (star index order)

pub mod achievements;
pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod layout;
pub mod movement;
pub mod scoring;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, AchievementSet, FinalStats, evaluate};
pub use collision::{CollisionResult, circle_collision};
pub use movement::{Directions, MovementReport};
pub use state::{GameEvent, GamePhase, GameState, Particle, ParticleColor, Player, Star, TrailPoint};
pub use tick::{TickConfig, TickInput, TickOutcome, tick};
