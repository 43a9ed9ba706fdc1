//! Decorative per-frame animation
//!
//! Star pulse, particles, trail and boost sparks. None of this feeds back
//! into scoring; it runs every animated frame, paused or not.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleColor, Star};
use crate::consts::*;

/// Spawn an explosion of particles at a collected star
pub fn spawn_star_explosion<R: Rng>(rng: &mut R, star: &Star, particles: &mut Vec<Particle>) {
    for _ in 0..EXPLOSION_PARTICLES {
        let angle = rng.random::<f32>() * TAU;
        let speed = 2.0 + rng.random::<f32>() * 6.0;
        particles.push(Particle {
            pos: star.pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: 1.0 + rng.random::<f32>() * 5.0,
            life: 1.0,
            color: ParticleColor::Star { hue: star.hue },
        });
    }
}

/// Advance star pulse and rotation (uncollected stars only)
pub fn animate_stars(stars: &mut [Star]) {
    for star in stars.iter_mut().filter(|s| !s.collected) {
        star.pulse += STAR_PULSE_STEP;
        star.rotation += STAR_ROTATION_STEP;
    }
}

/// Move particles, decay their life and drop dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Spawn the sparks trailing a boosted player
pub fn spawn_boost_particles(state: &mut GameState) {
    let player = &state.player;
    let anchor = player.trail.front().map(|t| t.pos).unwrap_or(player.pos);
    let drift = (player.pos - anchor) * 0.5;

    for _ in 0..BOOST_PARTICLES_PER_FRAME {
        let offset = Vec2::new(
            state.rng.random::<f32>() - 0.5,
            state.rng.random::<f32>() - 0.5,
        ) * player.size;
        let jitter = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 10.0,
            (state.rng.random::<f32>() - 0.5) * 10.0,
        );
        state.particles.push(Particle {
            pos: player.pos + offset,
            vel: jitter - drift,
            size: 2.0 + state.rng.random::<f32>() * 4.0,
            life: 1.0,
            color: ParticleColor::Boost,
        });
    }
}

/// Drop the oldest particles beyond `max`
pub fn cap_particles(particles: &mut Vec<Particle>, max: usize) {
    if particles.len() > max {
        let excess = particles.len() - max;
        particles.drain(..excess);
    }
}

/// Run every decorative pass for one frame, in draw order
pub fn animate(state: &mut GameState, record_trail: bool, max_particles: usize) {
    animate_stars(&mut state.stars);
    update_particles(&mut state.particles);
    if record_trail {
        state.player.record_trail();
    } else {
        state.player.trail.clear();
    }
    if state.boost_active {
        spawn_boost_particles(state);
    }
    cap_particles(&mut state.particles, max_particles);
}
