//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Events returned from `tick`, never dispatched from inside it

pub mod error;
pub mod food;
pub mod state;
pub mod tick;

pub use error::SimError;
pub use food::{FOOD_TYPES, FoodCounts, FoodKind, FoodType, Spawner, WeightedPool};
pub use state::{
    FoodItem, GameEvent, GamePhase, GameState, Hole, Particle, Trail, WinSummary,
};
pub use tick::{Directions, MoveIntent, StepOutcome, TickInput, sanitize_dt, tick};
