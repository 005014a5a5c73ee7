//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering, DOM, audio, or storage dependencies
//! - State in, state out - side effects surface as drained `GameEvent`s

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::rect_circle_overlap;
pub use spawn::SpawnPolicy;
pub use state::{
    CaughtTally, Catcher, FallingItem, GameEvent, ItemKind, KindClass, KindProfile, RoundPhase,
    RoundState,
};
pub use tick::{TickInput, tick};
