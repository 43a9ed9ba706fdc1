//! Scene geometry
//!
//! Turns a `GameState` into one triangle list in canvas pixels, painted
//! back to front: background, stars, particles, trail, player, overlay.

use glam::Vec2;

use super::color::{hsl, mix, rgba8, with_alpha};
use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GameState, ParticleColor, Player, Star};

const CIRCLE_SEGMENTS: u32 = 24;
const SMALL_SEGMENTS: u32 = 8;
const NEBULA_SEGMENTS: u32 = 32;
const BOOST_RING_DASHES: u32 = 14;
/// Star body lightness in HSL
const STAR_LIGHTNESS: f32 = 0.65;

/// What the background and effects are allowed to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub distant_stars: usize,
    pub nebula: bool,
    /// Animate distant stars and nebula drift
    pub motion: bool,
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            distant_stars: settings.quality.distant_stars(),
            nebula: settings.quality.nebula_enabled(),
            motion: !settings.reduced_motion,
        }
    }
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Build the full frame at animation time `time_ms`
pub fn build_scene(state: &GameState, time_ms: f64, options: &SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);
    if state.width <= 0.0 || state.height <= 0.0 {
        return vertices;
    }
    let time_ms = if options.motion { time_ms } else { 0.0 };

    background(&mut vertices, state.width, state.height, time_ms, options);
    for star in state.stars.iter().filter(|s| !s.collected) {
        star_body(&mut vertices, star);
    }
    particles(&mut vertices, state);
    trail(&mut vertices, &state.player);
    player(&mut vertices, &state.player, state.boost_active);

    if state.is_paused() {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(state.width, state.height),
            colors::PAUSE_OVERLAY,
        ));
    }

    vertices
}

fn background(out: &mut Vec<Vertex>, w: f32, h: f32, time_ms: f64, options: &SceneOptions) {
    // Diagonal gradient: edge colour in two corners, mid colour on the other diagonal
    out.extend(shapes::gradient_quad(
        Vec2::ZERO,
        Vec2::new(w, h),
        [
            colors::BACKGROUND_EDGE,
            colors::BACKGROUND_MID,
            colors::BACKGROUND_EDGE,
            colors::BACKGROUND_MID,
        ],
    ));

    let t = (time_ms / 1000.0) as f32;
    for i in 0..options.distant_stars {
        let pos = Vec2::new((i as f32 * 37.0) % w, (i as f32 * 23.0) % h);
        let radius = (t + i as f32).sin() * 0.5 + 0.5;
        let alpha = 0.2 + radius * 0.3;
        out.extend(shapes::circle(
            pos,
            radius,
            with_alpha(colors::DISTANT_STAR, alpha),
            SMALL_SEGMENTS,
        ));
    }

    if options.nebula {
        let t = (time_ms / 10_000.0) as f32;
        for i in 0..3 {
            let fi = i as f32;
            let center = Vec2::new(
                (t + fi).sin() * 100.0 + w / 2.0,
                (t + fi * 1.3).cos() * 100.0 + h / 2.0,
            );
            let radius = 150.0 + (t * 2.0 + fi).sin() * 50.0;
            let color = rgba8(64.0 + fi * 30.0, 201.0 - fi * 50.0, 255.0, 0.1);
            out.extend(shapes::radial_gradient(
                center,
                radius,
                color,
                with_alpha(color, 0.0),
                NEBULA_SEGMENTS,
            ));
        }
    }
}

fn star_body(out: &mut Vec<Vertex>, star: &Star) {
    let size = star.animated_size();
    let glow = star.glow();
    let tint = hsl(star.hue, 1.0, STAR_LIGHTNESS, 1.0);

    // Soft halo standing in for a canvas shadow blur
    let halo = size + 20.0 + glow * 15.0;
    out.extend(shapes::ring_gradient(
        star.pos,
        size * 0.5,
        halo,
        with_alpha(tint, 0.35 * glow),
        with_alpha(tint, 0.0),
        CIRCLE_SEGMENTS,
    ));

    let tip = mix(tint, colors::STAR_RIM, 0.3);
    out.extend(shapes::star_polygon(
        star.pos,
        size,
        0.4,
        4,
        star.rotation,
        colors::PLAYER_CORE,
        tip,
    ));
}

fn particles(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        let base = match p.color {
            ParticleColor::Star { hue } => hsl(hue, 1.0, STAR_LIGHTNESS, 1.0),
            ParticleColor::Boost => colors::BOOST,
        };
        out.extend(shapes::circle(
            p.pos,
            p.size * p.life,
            with_alpha(base, p.life),
            SMALL_SEGMENTS,
        ));
    }
}

fn trail(out: &mut Vec<Vertex>, player: &Player) {
    let len = player.trail.len() as f32;
    for (i, point) in player.trail.iter().enumerate() {
        let size = point.size * (i as f32 / len);
        out.extend(shapes::circle(
            point.pos,
            size,
            with_alpha(colors::PLAYER, player.trail_alpha(i)),
            CIRCLE_SEGMENTS,
        ));
    }
}

fn player(out: &mut Vec<Vertex>, player: &Player, boosted: bool) {
    out.extend(shapes::ring_gradient(
        player.pos,
        player.size,
        player.size + 20.0,
        with_alpha(colors::PLAYER, 0.4),
        with_alpha(colors::PLAYER, 0.0),
        CIRCLE_SEGMENTS,
    ));
    out.extend(shapes::radial_gradient3(
        player.pos,
        player.size,
        [colors::PLAYER_CORE, colors::PLAYER, colors::PLAYER_RIM],
        0.5,
        CIRCLE_SEGMENTS,
    ));

    let eye = player.pos + Vec2::new(-6.0, -6.0);
    out.extend(shapes::circle(eye, 5.0, colors::PLAYER_EYE, SMALL_SEGMENTS * 2));
    out.extend(shapes::circle(eye, 2.0, colors::PLAYER_PUPIL, SMALL_SEGMENTS));

    if boosted {
        out.extend(shapes::dashed_ring(
            player.pos,
            player.size + 10.0,
            3.0,
            colors::BOOST,
            BOOST_RING_DASHES,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn run() -> GameState {
        GameState::new(5, 800.0, 600.0, 10)
    }

    #[test]
    fn test_zero_size_canvas_draws_nothing() {
        let state = GameState::new(5, 0.0, 0.0, 10);
        assert!(build_scene(&state, 0.0, &SceneOptions::default()).is_empty());
    }

    #[test]
    fn test_background_covers_canvas() {
        let v = build_scene(&run(), 0.0, &SceneOptions::default());
        assert!(v.len() % 3 == 0);
        assert_eq!(v[0].position, [0.0, 0.0]);
        assert_eq!(v[0].color, colors::BACKGROUND_EDGE);
        assert!(v.iter().any(|p| p.position == [800.0, 600.0]));
    }

    #[test]
    fn test_collected_stars_are_skipped() {
        let options = SceneOptions {
            distant_stars: 0,
            nebula: false,
            motion: false,
        };
        let mut state = run();
        let all = build_scene(&state, 0.0, &options).len();
        for star in &mut state.stars {
            star.collected = true;
        }
        let none = build_scene(&state, 0.0, &options).len();
        assert!(none < all);

        // One star's geometry
        let per_star = (all - none) / 10;
        assert_eq!(per_star * 10, all - none);
    }

    #[test]
    fn test_low_quality_draws_less_background() {
        let state = run();
        let high = build_scene(&state, 1000.0, &SceneOptions::default()).len();
        let low = build_scene(
            &state,
            1000.0,
            &SceneOptions::from_settings(&Settings::from_preset(
                crate::settings::QualityPreset::Low,
            )),
        )
        .len();
        assert!(low < high);
    }

    #[test]
    fn test_pause_overlay_is_last() {
        let mut state = run();
        state.phase = GamePhase::Paused;
        let v = build_scene(&state, 0.0, &SceneOptions::default());
        let last = v[v.len() - 1];
        assert_eq!(last.color, colors::PAUSE_OVERLAY);
    }

    #[test]
    fn test_boost_ring_adds_geometry() {
        let mut state = run();
        let options = SceneOptions::default();
        let plain = build_scene(&state, 0.0, &options).len();
        state.boost_active = true;
        let boosted = build_scene(&state, 0.0, &options).len();
        assert_eq!(boosted - plain, BOOST_RING_DASHES as usize * 12);
    }

    #[test]
    fn test_reduced_motion_freezes_background() {
        let state = run();
        let options = SceneOptions {
            motion: false,
            ..SceneOptions::default()
        };
        assert_eq!(
            build_scene(&state, 0.0, &options),
            build_scene(&state, 12_345.0, &options)
        );
    }
}
