//! Jelly Hole - a hole that eats its way across a picnic lawn
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hole motion, consumption, particles)
//! - `input`: Pointer/touch/keyboard state folded into a per-step intent
//! - `controller`: Session lifecycle and frame pacing
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Playfield and session configuration
//! - `share`: Win summary text for the share button

pub mod config;
pub mod controller;
pub mod input;
pub mod renderer;
pub mod share;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use controller::{ControllerPhase, FrameOutcome, GameController};
pub use input::InputState;

use rand::Rng;

/// Game tuning constants
pub mod consts {
    /// Largest timestep a single step will integrate (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Hole radius bounds
    pub const HOLE_START_RADIUS: f32 = 40.0;
    pub const HOLE_MAX_RADIUS: f32 = 160.0;
    /// Radius gained per point eaten
    pub const GROWTH_PER_POINT: f32 = 0.9;
    /// Hole spawns this far below the playfield center
    pub const HOLE_START_OFFSET_Y: f32 = 80.0;

    /// Hole is kept this far from the left/right/bottom edges
    pub const EDGE_MARGIN: f32 = 20.0;
    /// Band at the top reserved for the HUD
    pub const TOP_MARGIN: f32 = 105.0;

    /// Pointer mode: fraction of the remaining distance covered per step
    pub const POINTER_EASE: f32 = 0.25;
    /// Directional mode acceleration per held axis (units/s²)
    pub const KEY_ACCEL: f32 = 800.0;
    /// Directional mode velocity multiplier applied once per step
    pub const KEY_VELOCITY_DECAY: f32 = 0.75;
    /// Directional mode speed cap (units/s)
    pub const KEY_MAX_SPEED: f32 = 520.0;

    /// Glow phase advance rate (radians/s)
    pub const GLOW_RATE: f32 = 3.0;
    /// Number of past hole positions kept for the trail
    pub const TRAIL_LENGTH: usize = 14;

    /// Consumption reach as a fraction of the item radius
    pub const EAT_REACH: f32 = 0.3;
    /// Eat progress gained per second once swallowed
    pub const EAT_SHRINK_RATE: f32 = 6.0;
    /// Rate at which swallowed items are pulled to the hole center
    pub const EAT_PULL_RATE: f32 = 14.0;

    /// Particles emitted per consumption
    pub const PARTICLE_BURST: usize = 12;
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 8.0;
    pub const PARTICLE_MIN_RADIUS: f32 = 3.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 9.0;
    /// Added to particle vertical velocity once per step
    pub const PARTICLE_GRAVITY: f32 = 0.14;
    /// Alpha lost per second
    pub const PARTICLE_FADE_RATE: f32 = 1.8;

    /// Extra clearance between a spawned item and the playfield edge
    pub const SPAWN_PADDING: f32 = 8.0;
    /// Idle bob speed range (radians/s)
    pub const WOBBLE_MIN_SPEED: f32 = 1.2;
    pub const WOBBLE_MAX_SPEED: f32 = 2.8;

    /// Size level bands
    pub const SIZE_LEVEL_STEP: f32 = 9.0;
}

/// Uniform sample in `[lo, hi)`. Degenerate ranges return `lo`.
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Badge number shown for a hole of the given radius
#[inline]
pub fn size_level(radius: f32) -> u32 {
    let level = (1.0 + (radius - consts::HOLE_START_RADIUS) / consts::SIZE_LEVEL_STEP).floor();
    level.max(1.0) as u32
}
