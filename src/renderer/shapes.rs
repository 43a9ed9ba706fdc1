//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in pixel coordinates.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

fn point_on(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

fn push_tri(out: &mut Vec<Vertex>, a: Vec2, ca: [f32; 4], b: Vec2, cb: [f32; 4], c: Vec2, cc: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, color, segments)
}

/// Filled circle whose colour blends from `inner` at the centre to `outer`
/// at the edge
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    if radius <= 0.0 || segments < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        push_tri(
            &mut vertices,
            center,
            inner,
            point_on(center, radius, theta1),
            outer,
            point_on(center, radius, theta2),
            outer,
        );
    }

    vertices
}

/// Radial gradient with a middle colour stop at `mid_at` (0..1 of the radius)
pub fn radial_gradient3(
    center: Vec2,
    radius: f32,
    stops: [[f32; 4]; 3],
    mid_at: f32,
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = radial_gradient(center, radius * mid_at, stops[0], stops[1], segments);
    vertices.extend(ring_gradient(
        center,
        radius * mid_at,
        radius,
        stops[1],
        stops[2],
        segments,
    ));
    vertices
}

/// Ring whose colour blends from the inner edge to the outer edge
pub fn ring_gradient(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(
        center,
        inner_radius,
        outer_radius,
        0.0,
        TAU,
        (inner_color, outer_color),
        segments,
    )
}

/// Thick arc between two angles
fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    theta_end: f32,
    (inner_color, outer_color): ([f32; 4], [f32; 4]),
    segments: u32,
) -> Vec<Vertex> {
    if outer_radius <= inner_radius || segments == 0 {
        return Vec::new();
    }
    let span = theta_end - theta_start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = theta_start + (i as f32 / segments as f32) * span;
        let theta2 = theta_start + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = point_on(center, inner_radius, theta1);
        let outer1 = point_on(center, outer_radius, theta1);
        let inner2 = point_on(center, inner_radius, theta2);
        let outer2 = point_on(center, outer_radius, theta2);

        // Two triangles per segment
        push_tri(&mut vertices, inner1, inner_color, outer1, outer_color, inner2, inner_color);
        push_tri(&mut vertices, inner2, inner_color, outer1, outer_color, outer2, outer_color);
    }

    vertices
}

/// Stroked circle broken into `dashes` equal dashes with equal gaps
pub fn dashed_ring(center: Vec2, radius: f32, width: f32, color: [f32; 4], dashes: u32) -> Vec<Vertex> {
    if dashes == 0 {
        return Vec::new();
    }
    let step = TAU / dashes as f32;
    let half = width / 2.0;
    let mut vertices = Vec::new();

    for i in 0..dashes {
        let start = i as f32 * step;
        vertices.extend(arc_band(
            center,
            (radius - half).max(0.0),
            radius + half,
            start,
            start + step / 2.0,
            (color, color),
            2,
        ));
    }

    vertices
}

/// Star polygon with `points` tips alternating between `outer` and
/// `outer * inner_ratio`, rotated by `rotation` radians.
///
/// Filled as a fan from the centre so the body can carry a gradient.
pub fn star_polygon(
    center: Vec2,
    outer: f32,
    inner_ratio: f32,
    points: u32,
    rotation: f32,
    core_color: [f32; 4],
    tip_color: [f32; 4],
) -> Vec<Vertex> {
    let corners = points * 2;
    if outer <= 0.0 || corners < 4 {
        return Vec::new();
    }
    let corner = |i: u32| {
        let radius = if i % 2 == 0 { outer } else { outer * inner_ratio };
        point_on(center, radius, rotation + i as f32 * PI / points as f32)
    };

    let mut vertices = Vec::with_capacity((corners * 3) as usize);
    for i in 0..corners {
        push_tri(
            &mut vertices,
            center,
            core_color,
            corner(i),
            tip_color,
            corner((i + 1) % corners),
            tip_color,
        );
    }
    vertices
}

/// Axis-aligned quad with one colour per corner (top-left, top-right,
/// bottom-right, bottom-left)
pub fn gradient_quad(min: Vec2, max: Vec2, corners: [[f32; 4]; 4]) -> Vec<Vertex> {
    let [tl, tr, br, bl] = corners;
    let p_tl = min;
    let p_tr = Vec2::new(max.x, min.y);
    let p_br = max;
    let p_bl = Vec2::new(min.x, max.y);

    // Split along the TR-BL diagonal so a matching colour there interpolates
    // as a true diagonal gradient
    let mut vertices = Vec::with_capacity(6);
    push_tri(&mut vertices, p_tl, tl, p_tr, tr, p_bl, bl);
    push_tri(&mut vertices, p_tr, tr, p_br, br, p_bl, bl);
    vertices
}

/// Solid axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_quad(min, max, [color; 4])
}
