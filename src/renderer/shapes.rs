//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

fn on_circle(center: Vec2, radius: Vec2, theta: f32) -> Vec2 {
    Vec2::new(
        center.x + radius.x * theta.cos(),
        center.y + radius.y * theta.sin(),
    )
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_circle(center, radius, color, color, segments)
}

/// Filled circle shaded from `center_color` to `edge_color`
pub fn radial_circle(
    center: Vec2,
    radius: f32,
    center_color: [f32; 4],
    edge_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    ellipse_shaded(center, Vec2::splat(radius), center_color, edge_color, segments)
}

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, rx: f32, ry: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse_shaded(center, Vec2::new(rx, ry), color, color, segments)
}

fn ellipse_shaded(
    center: Vec2,
    radius: Vec2,
    center_color: [f32; 4],
    edge_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, center_color));
        vertices.push(Vertex::new(p1.x, p1.y, edge_color));
        vertices.push(Vertex::new(p2.x, p2.y, edge_color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    radial_ring(center, inner_radius, outer_radius, color, color, segments)
}

/// Ring shaded from `inner_color` at the inner edge to `outer_color` outside
pub fn radial_ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let inner = Vec2::splat(inner_radius);
    let outer = Vec2::splat(outer_radius);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = on_circle(center, inner, theta1);
        let outer1 = on_circle(center, outer, theta1);
        let inner2 = on_circle(center, inner, theta2);
        let outer2 = on_circle(center, outer, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Axis-aligned rectangle with a top-to-bottom color gradient
pub fn gradient_rect(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}
