//! Session state and entity types
//!
//! Everything a play-through mutates lives in `GameState`; the step function
//! and controller receive it explicitly.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::food::{FoodCounts, FoodKind, FoodType, Spawner};
use crate::config::{GameConfig, Playfield};
use crate::consts::*;
use crate::size_level;

/// Phase of a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stepping every frame
    Running,
    /// Every item eaten; no more steps
    Won,
}

/// Bounded history of hole positions, newest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record a position, evicting the oldest past `TRAIL_LENGTH`
    pub fn push(&mut self, pos: Vec2) {
        self.points.push_front(pos);
        self.points.truncate(TRAIL_LENGTH);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        self.points.iter()
    }
}

/// The player's hole
#[derive(Debug, Clone)]
pub struct Hole {
    pub pos: Vec2,
    pub radius: f32,
    /// Only used by directional input
    pub vel: Vec2,
    /// Drives the rim glow pulse
    pub glow_phase: f32,
    pub trail: Trail,
}

impl Hole {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: HOLE_START_RADIUS,
            vel: Vec2::ZERO,
            glow_phase: 0.0,
            trail: Trail::new(),
        }
    }

    /// Grow by the points just eaten, never past the cap
    pub fn grow(&mut self, points: u32) {
        self.radius = (self.radius + points as f32 * GROWTH_PER_POINT).min(HOLE_MAX_RADIUS);
    }

    pub fn size_level(&self) -> u32 {
        size_level(self.radius)
    }
}

/// A food item on the lawn
#[derive(Debug, Clone)]
pub struct FoodItem {
    pub food: &'static FoodType,
    pub pos: Vec2,
    /// Idle bob phase
    pub wobble: f32,
    pub wobble_speed: f32,
    pub eaten: bool,
    /// 0 when swallowed, removed at 1
    pub eat_progress: f32,
    /// Render scale, `1 - eat_progress` floored at 0
    pub scale: f32,
}

impl FoodItem {
    pub fn new(food: &'static FoodType, pos: Vec2, wobble: f32, wobble_speed: f32) -> Self {
        Self {
            food,
            pos,
            wobble,
            wobble_speed,
            eaten: false,
            eat_progress: 0.0,
            scale: 1.0,
        }
    }

    pub fn kind(&self) -> FoodKind {
        self.food.kind
    }

    pub fn radius(&self) -> f32 {
        self.food.radius
    }

    /// Fully shrunk and ready to drop from the active set
    pub fn is_gone(&self) -> bool {
        self.eaten && self.eat_progress >= 1.0
    }
}

/// A crumb thrown off when something is eaten (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// End-of-session summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinSummary {
    pub total_items: usize,
    pub score: u32,
    pub counts: FoodCounts,
    pub final_size_level: u32,
}

/// Discrete things that happened during a step
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An item was swallowed; `pos`/`hole_radius` place the score popup
    ItemConsumed {
        kind: FoodKind,
        pos: Vec2,
        hole_radius: f32,
        value: u32,
        size_level: u32,
    },
    /// The last item was swallowed
    SessionWon(WinSummary),
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub hole: Hole,
    /// Active items in spawn order
    pub items: Vec<FoodItem>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u32,
    pub counts: FoodCounts,
    /// Item count right after spawning
    pub total_items: usize,
    /// Simulation step counter
    pub steps: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session: hole below center, `config.food_count` items scattered
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let playfield = config.playfield;
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::default();
        let items: Vec<FoodItem> = (0..config.food_count)
            .map(|_| spawner.spawn(&mut rng, playfield.width, playfield.height, TOP_MARGIN))
            .collect();
        let total_items = items.len();

        log::info!(
            "New session: seed={}, items={}, playfield={}x{}",
            seed,
            total_items,
            playfield.width,
            playfield.height
        );

        Self {
            phase: GamePhase::Running,
            playfield,
            hole: Hole::new(Vec2::new(
                playfield.width / 2.0,
                playfield.height / 2.0 + HOLE_START_OFFSET_Y,
            )),
            items,
            particles: Vec::new(),
            score: 0,
            counts: FoodCounts::default(),
            total_items,
            steps: 0,
            rng,
        }
    }

    /// Items still waiting to be eaten
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|it| !it.eaten).count()
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn summary(&self) -> WinSummary {
        WinSummary {
            total_items: self.total_items,
            score: self.score,
            counts: self.counts,
            final_size_level: self.hole.size_level(),
        }
    }

    /// Hole position limits: side/bottom margins and the HUD band
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(EDGE_MARGIN, TOP_MARGIN),
            Vec2::new(
                self.playfield.width - EDGE_MARGIN,
                self.playfield.height - EDGE_MARGIN,
            ),
        )
    }

    /// Verify the invariants that must hold between steps
    pub fn check_invariants(&self) -> Result<(), SimError> {
        if !(HOLE_START_RADIUS..=HOLE_MAX_RADIUS).contains(&self.hole.radius) {
            return Err(SimError::RadiusOutOfRange {
                radius: self.hole.radius,
            });
        }
        if self.hole.trail.len() > TRAIL_LENGTH {
            return Err(SimError::TrailOverflow {
                len: self.hole.trail.len(),
            });
        }
        Ok(())
    }
}
