//! Player movement integration
//!
//! Speeds are expressed in pixels per 1/60 s tick and scaled by the real
//! frame delta, so movement is frame-rate independent.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::state::Player;
use crate::consts::{BOUNCE_DAMPING, SPEED_REFERENCE_FPS};

/// Directional input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Unit-speed movement vector; diagonals are scaled so their length is 1
    pub fn vector(&self) -> Vec2 {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.up {
            y -= 1.0;
        }
        if self.down {
            y += 1.0;
        }
        if self.left {
            x -= 1.0;
        }
        if self.right {
            x += 1.0;
        }
        if x != 0.0 && y != 0.0 {
            x *= FRAC_1_SQRT_2;
            y *= FRAC_1_SQRT_2;
        }
        Vec2::new(x, y)
    }
}

/// What happened during one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementReport {
    pub displacement: Vec2,
    /// Direction after wall damping; reported for the frame only
    pub bounced_dir: Vec2,
    pub hit_wall: bool,
}

/// Clamp one axis into `[size, extent - size]`.
///
/// The lower bound is applied first, so a canvas smaller than the player
/// pins it to the upper bound instead of panicking like `f32::clamp`.
/// Returns the clamped value and the damped direction component.
fn clamp_axis(value: f32, dir: f32, size: f32, extent: f32) -> (f32, f32, bool) {
    let mut value = value;
    let mut dir = dir;
    let mut hit = false;
    if value < size {
        value = size;
        hit = true;
        if dir < 0.0 {
            dir = -dir * BOUNCE_DAMPING;
        }
    }
    if value > extent - size {
        value = extent - size;
        hit = true;
        if dir > 0.0 {
            dir = -dir * BOUNCE_DAMPING;
        }
    }
    (value, dir, hit)
}

/// Move the player and keep it inside the canvas
pub fn move_player(
    player: &mut Player,
    directions: Directions,
    speed: f32,
    dt: f32,
    width: f32,
    height: f32,
) -> MovementReport {
    let dir = directions.vector();
    let displacement = dir * speed * dt * SPEED_REFERENCE_FPS;
    let moved = player.pos + displacement;

    let (x, dir_x, hit_x) = clamp_axis(moved.x, dir.x, player.size, width);
    let (y, dir_y, hit_y) = clamp_axis(moved.y, dir.y, player.size, height);
    player.pos = Vec2::new(x, y);

    MovementReport {
        displacement,
        bounced_dir: Vec2::new(dir_x, dir_y),
        hit_wall: hit_x || hit_y,
    }
}
