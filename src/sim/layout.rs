//! Star placement
//!
//! Stars sit on a ring around the canvas centre, evenly spaced by angle,
//! with a little radial jitter so no two runs look the same.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Star;
use crate::consts::*;

/// Generate `count` stars in a jittered ring
pub fn star_ring<R: Rng>(rng: &mut R, width: f32, height: f32, count: usize) -> Vec<Star> {
    let center = Vec2::new(width / 2.0, height / 2.0);
    let radius = width.min(height) * STAR_RING_FACTOR;

    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            let distance = radius + rng.random_range(-STAR_RING_JITTER..STAR_RING_JITTER);
            Star {
                pos: center + Vec2::new(angle.cos(), angle.sin()) * distance,
                size: STAR_MIN_SIZE + rng.random::<f32>() * STAR_SIZE_SPREAD,
                collected: false,
                pulse: rng.random::<f32>() * TAU,
                hue: 45.0 + rng.random::<f32>() * 30.0,
                rotation: 0.0,
            }
        })
        .collect()
}
