//! School Rush - catch falling school supplies before the bell rings
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, round state)
//! - `renderer`: Canvas2D presentation sink
//! - `platform`: Browser/native platform abstraction (storage)
//! - `audio`: Procedural WebAudio sound effects
//! - `scores`: Persistent best-score tracking

pub mod audio;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::BestScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Longest frame delta the simulation will accept (seconds).
    /// Caps the catch-up step after a tab switch or long GC pause.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield logical size used when the canvas size is unknown (tests, native)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Seconds between item spawns
    pub const SPAWN_INTERVAL: f32 = 0.9;
    /// Falling item radius (pixels)
    pub const ITEM_RADIUS: f32 = 20.0;
    /// Downward acceleration applied to every item (pixels/s²)
    pub const GRAVITY: f32 = 400.0;
    /// Initial fall speed range (pixels/s)
    pub const MIN_FALL_SPEED: f32 = 140.0;
    pub const MAX_FALL_SPEED: f32 = 180.0;
    /// Maximum horizontal sway speed at spawn (pixels/s)
    pub const SWAY_MAX: f32 = 25.0;
    /// Rotation step range is ±ROTATION_STEP_MAX, applied once per tick
    /// (a per-frame increment, deliberately not scaled by dt)
    pub const ROTATION_STEP_MAX: f32 = 0.05;

    /// Chance a spawn is the bonus kind
    pub const BONUS_CHANCE: f32 = 0.05;
    /// Chance a spawn is the penalty kind
    pub const PENALTY_CHANCE: f32 = 0.10;

    /// Round countdown budget (seconds)
    pub const ROUND_SECONDS: f32 = 60.0;
    /// Lives at round start
    pub const STARTING_LIVES: i32 = 3;

    /// Catcher dimensions (pixels)
    pub const CATCHER_WIDTH: f32 = 60.0;
    pub const CATCHER_HEIGHT: f32 = 60.0;
    /// Catcher horizontal step per tick (pixels, unscaled by dt)
    pub const CATCHER_STEP: f32 = 5.0;
    /// Gap between the catcher and the bottom edge (pixels)
    pub const CATCHER_BOTTOM_MARGIN: f32 = 20.0;

    /// Screen-shake timer set on a penalty catch (seconds)
    pub const SHAKE_DURATION: f32 = 0.3;

    /// Score awarded per common / bonus catch
    pub const COMMON_SCORE: u64 = 1;
    pub const BONUS_SCORE: u64 = 5;
}
