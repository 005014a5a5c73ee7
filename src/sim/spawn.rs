//! Item spawning: cadence accumulator and weighted kind rolls
//!
//! All randomness flows through the round's seeded `Pcg32`, so the spawn
//! sequence of a round is fully determined by its seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{FallingItem, ItemKind};
use crate::consts::*;

/// Fixed-cadence spawn accumulator.
///
/// Resets to zero on trigger instead of carrying the remainder, so spawn
/// intervals stretch slightly under uneven frame times.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPolicy {
    accumulator: f32,
}

impl SpawnPolicy {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Advance by `dt`; returns true when a spawn is due this tick
    pub fn advance(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= SPAWN_INTERVAL {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted kind roll: 5% bonus, 10% penalty, remainder split evenly
/// over the common subtypes
pub fn roll_kind(rng: &mut Pcg32) -> ItemKind {
    let r: f32 = rng.random();
    if r < BONUS_CHANCE {
        ItemKind::GoldenBell
    } else if r < BONUS_CHANCE + PENALTY_CHANCE {
        ItemKind::SmellySock
    } else {
        ItemKind::COMMON[rng.random_range(0..ItemKind::COMMON.len())]
    }
}

/// Construct a new item just above the visible area
pub fn spawn_item(rng: &mut Pcg32, playfield_width: f32) -> FallingItem {
    let kind = roll_kind(rng);
    let x = rng.random_range(ITEM_RADIUS..playfield_width - ITEM_RADIUS);
    let vx = rng.random_range(-SWAY_MAX..SWAY_MAX);
    let vy = rng.random_range(MIN_FALL_SPEED..MAX_FALL_SPEED);
    let rotation_step = rng.random_range(-ROTATION_STEP_MAX..ROTATION_STEP_MAX);

    FallingItem {
        kind,
        pos: Vec2::new(x, -ITEM_RADIUS),
        vel: Vec2::new(vx, vy),
        radius: ITEM_RADIUS,
        rotation: 0.0,
        rotation_step,
        caught: false,
    }
}
