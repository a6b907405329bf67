//! Turns a session snapshot into triangles, back to front

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::{FoodItem, GameState, Hole, Particle};

const SEGMENTS: u32 = 40;
const SMALL_SEGMENTS: u32 = 12;
/// Height of the sky band behind the HUD
const SKY_HEIGHT: f32 = 100.0;
/// Idle bob amplitude (playfield units)
const BOB: f32 = 3.5;

/// Build the frame in playfield coordinates
pub fn build_scene(state: &GameState, pointer: Option<Vec2>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(8192);

    vertices.extend(shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::new(state.playfield.width, SKY_HEIGHT),
        colors::SKY,
        colors::GRASS,
    ));

    push_trail(&mut vertices, &state.hole);
    for item in &state.items {
        push_item(&mut vertices, item);
    }
    push_hole(&mut vertices, &state.hole);
    for particle in &state.particles {
        push_particle(&mut vertices, particle);
    }

    if let Some(p) = pointer {
        vertices.extend(shapes::circle(p, 8.0, colors::CURSOR_OUTER, SMALL_SEGMENTS));
        vertices.extend(shapes::circle(p, 3.5, colors::CURSOR_INNER, SMALL_SEGMENTS));
    }

    vertices
}

fn push_trail(out: &mut Vec<Vertex>, hole: &Hole) {
    let len = hole.trail.len() as f32;
    for (i, pt) in hole.trail.iter().enumerate() {
        let i = i as f32;
        let alpha = (1.0 - i / len) * 0.09;
        let radius = hole.radius * (1.0 - i * 0.045);
        out.extend(shapes::circle(
            *pt,
            radius,
            with_alpha(colors::TRAIL, alpha),
            SEGMENTS,
        ));
    }
}

fn push_item(out: &mut Vec<Vertex>, item: &FoodItem) {
    let s = item.scale;
    if s <= 0.0 {
        return;
    }
    let r = item.radius();
    let bob = item.wobble.sin() * BOB;
    let center = item.pos + Vec2::new(0.0, bob * s);

    out.extend(shapes::ellipse(
        item.pos + Vec2::new(0.0, (bob + r * 1.3) * s),
        r * 0.9 * s,
        r * 0.28 * s,
        colors::SHADOW,
        SEGMENTS,
    ));
    out.extend(shapes::circle(center, r * 1.2 * s, colors::PLATE, SEGMENTS));
    out.extend(shapes::ring(
        center,
        (r * 1.2 - 1.0) * s,
        (r * 1.2 + 1.0) * s,
        colors::PLATE_EDGE,
        SEGMENTS,
    ));
    out.extend(shapes::circle(center, r * 0.8 * s, item.food.color, SEGMENTS));
}

fn push_hole(out: &mut Vec<Vertex>, hole: &Hole) {
    let r = hole.radius;
    let pos = hole.pos;

    // Pulsing glow, fading out through a midpoint
    let glow = 7.0 + hole.glow_phase.sin() * 4.0;
    let outer = r + glow + 28.0;
    let mid = (r + outer) / 2.0;
    out.extend(shapes::radial_ring(
        pos,
        r,
        mid,
        colors::GLOW_INNER,
        colors::GLOW_MID,
        SEGMENTS,
    ));
    out.extend(shapes::radial_ring(
        pos,
        mid,
        outer,
        colors::GLOW_MID,
        with_alpha(colors::GLOW_MID, 0.0),
        SEGMENTS,
    ));

    out.extend(shapes::ring(pos, r + 3.5, r + 10.5, colors::RIM_WHITE, SEGMENTS));
    out.extend(shapes::ring(pos, r + 0.25, r + 3.75, colors::RIM_TEAL, SEGMENTS));
    out.extend(shapes::radial_circle(
        pos,
        r,
        colors::HOLE_CENTER,
        colors::HOLE,
        SEGMENTS,
    ));
    out.extend(shapes::circle(
        pos - Vec2::splat(r * 0.3),
        r * 0.18,
        colors::HOLE_HIGHLIGHT,
        SEGMENTS,
    ));
}

fn push_particle(out: &mut Vec<Vertex>, p: &Particle) {
    out.extend(shapes::circle(
        p.pos,
        p.radius,
        with_alpha(colors::PARTICLE, p.alpha.clamp(0.0, 1.0)),
        SMALL_SEGMENTS,
    ));
}
