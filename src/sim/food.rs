//! Food catalogue and the spawner that scatters it over the lawn

use std::ops::{Index, IndexMut};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::FoodItem;
use crate::consts::{SPAWN_PADDING, WOBBLE_MAX_SPEED, WOBBLE_MIN_SPEED};
use crate::rand_range;

/// Food kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Burger,
    Pizza,
    Sushi,
    Chicken,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Burger,
        FoodKind::Pizza,
        FoodKind::Sushi,
        FoodKind::Chicken,
    ];

    /// Static descriptor for this kind
    pub fn food_type(self) -> &'static FoodType {
        &FOOD_TYPES[self as usize]
    }
}

/// Immutable description of a food kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodType {
    pub kind: FoodKind,
    pub symbol: &'static str,
    /// Collision/visual radius
    pub radius: f32,
    /// Glyph size for text-based renderers
    pub font_size: f32,
    /// Points awarded when eaten
    pub value: u32,
    /// Relative spawn frequency
    pub weight: u32,
    /// Core color for the GPU renderer
    pub color: [f32; 4],
}

/// Catalogue, indexed by `FoodKind as usize`
pub static FOOD_TYPES: [FoodType; 4] = [
    FoodType {
        kind: FoodKind::Burger,
        symbol: "🍔",
        radius: 20.0,
        font_size: 44.0,
        value: 1,
        weight: 4,
        color: [0.78, 0.45, 0.16, 1.0],
    },
    FoodType {
        kind: FoodKind::Pizza,
        symbol: "🍕",
        radius: 20.0,
        font_size: 44.0,
        value: 1,
        weight: 4,
        color: [0.95, 0.75, 0.25, 1.0],
    },
    FoodType {
        kind: FoodKind::Sushi,
        symbol: "🍣",
        radius: 18.0,
        font_size: 38.0,
        value: 2,
        weight: 3,
        color: [0.98, 0.5, 0.42, 1.0],
    },
    FoodType {
        kind: FoodKind::Chicken,
        symbol: "🍗",
        radius: 18.0,
        font_size: 38.0,
        value: 2,
        weight: 3,
        color: [0.65, 0.35, 0.18, 1.0],
    },
];

/// Per-kind eaten counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodCounts([u32; 4]);

impl FoodCounts {
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodKind, u32)> + '_ {
        FoodKind::ALL.iter().map(move |&k| (k, self[k]))
    }
}

impl Index<FoodKind> for FoodCounts {
    type Output = u32;

    fn index(&self, kind: FoodKind) -> &u32 {
        &self.0[kind as usize]
    }
}

impl IndexMut<FoodKind> for FoodCounts {
    fn index_mut(&mut self, kind: FoodKind) -> &mut u32 {
        &mut self.0[kind as usize]
    }
}

/// Weighted selection over food types via a cumulative-weight table.
///
/// Equivalent to drawing uniformly from a pool where each type is repeated
/// `weight` times.
#[derive(Debug, Clone)]
pub struct WeightedPool {
    types: Vec<&'static FoodType>,
    cumulative: Vec<u32>,
}

impl WeightedPool {
    pub fn new(types: &'static [FoodType]) -> Self {
        let mut cumulative = Vec::with_capacity(types.len());
        let mut running = 0;
        let mut kept = Vec::with_capacity(types.len());
        for food in types.iter().filter(|f| f.weight > 0) {
            running += food.weight;
            cumulative.push(running);
            kept.push(food);
        }
        Self {
            types: kept,
            cumulative,
        }
    }

    /// Sum of all weights (size of the equivalent duplicated pool)
    pub fn total_weight(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Type occupying slot `slot` of the equivalent duplicated pool
    pub fn at_slot(&self, slot: u32) -> Option<&'static FoodType> {
        let idx = self.cumulative.partition_point(|&c| c <= slot);
        self.types.get(idx).copied()
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&'static FoodType> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        self.at_slot(rng.random_range(0..total))
    }
}

impl Default for WeightedPool {
    fn default() -> Self {
        Self::new(&FOOD_TYPES)
    }
}

/// Scatters food over the playfield
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    pool: WeightedPool,
}

impl Spawner {
    /// Create one item somewhere below the HUD band
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        width: f32,
        height: f32,
        top_margin: f32,
    ) -> FoodItem {
        let food = self.pool.pick(rng).unwrap_or(&FOOD_TYPES[0]);
        let margin = food.radius + SPAWN_PADDING;
        let pos = Vec2::new(
            rand_range(rng, margin, width - margin),
            rand_range(rng, top_margin, height - margin),
        );
        let wobble = rand_range(rng, 0.0, std::f32::consts::TAU);
        let wobble_speed = rand_range(rng, WOBBLE_MIN_SPEED, WOBBLE_MAX_SPEED);
        FoodItem::new(food, pos, wobble, wobble_speed)
    }
}
