//! Collision detection between the player orb and stars
//!
//! Everything is a circle here, so a hit is just centre distance against
//! the sum of radii.

use glam::Vec2;

use super::state::{Player, Star};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Centre-to-centre distance
    pub distance: f32,
    /// Overlap depth (positive when hit)
    pub penetration: f32,
}

/// Check overlap between two circles (strictly less than the radius sum)
pub fn circle_collision(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> CollisionResult {
    let distance = a.distance(b);
    let reach = a_radius + b_radius;
    CollisionResult {
        hit: distance < reach,
        distance,
        penetration: reach - distance,
    }
}

/// Check the player against one star; collected stars never hit
pub fn player_star_collision(player: &Player, star: &Star) -> bool {
    !star.collected && circle_collision(player.pos, player.size, star.pos, star.size).hit
}

/// Indices of uncollected stars the player currently overlaps, in star order
pub fn touching_stars(player: &Player, stars: &[Star]) -> Vec<usize> {
    stars
        .iter()
        .enumerate()
        .filter(|(_, star)| player_star_collision(player, star))
        .map(|(i, _)| i)
        .collect()
}
