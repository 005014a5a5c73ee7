//! Round state and core simulation types
//!
//! Everything a single play session owns lives in `RoundState`. The only
//! state that outlives a round is the best score, which is handled by the
//! `scores` module outside the sim.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::SpawnPolicy;
use crate::consts::*;

/// The closed set of things that can fall from the sky
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Notebook,
    Pencil,
    Apple,
    Ruler,
    /// Bonus: big score, rare
    GoldenBell,
    /// Penalty: costs a life
    SmellySock,
}

/// Behavioral class an item kind resolves to when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindClass {
    Common,
    Bonus,
    Penalty,
}

/// Per-kind behavior, looked up from a static table rather than branched
/// on at every call site
#[derive(Debug, Clone, Copy)]
pub struct KindProfile {
    pub class: KindClass,
    /// Score delta applied on catch (0 for the penalty kind)
    pub score: u64,
    /// Glyph drawn by the renderer
    pub glyph: &'static str,
    /// Human-readable name for the tally readout
    pub label: &'static str,
}

const PROFILES: [KindProfile; ItemKind::COUNT] = [
    KindProfile {
        class: KindClass::Common,
        score: COMMON_SCORE,
        glyph: "\u{1F4D3}", // notebook
        label: "Notebook",
    },
    KindProfile {
        class: KindClass::Common,
        score: COMMON_SCORE,
        glyph: "\u{270F}\u{FE0F}", // pencil
        label: "Pencil",
    },
    KindProfile {
        class: KindClass::Common,
        score: COMMON_SCORE,
        glyph: "\u{1F34E}", // apple
        label: "Apple",
    },
    KindProfile {
        class: KindClass::Common,
        score: COMMON_SCORE,
        glyph: "\u{1F4CF}", // ruler
        label: "Ruler",
    },
    KindProfile {
        class: KindClass::Bonus,
        score: BONUS_SCORE,
        glyph: "\u{1F514}", // bell
        label: "Golden Bell",
    },
    KindProfile {
        class: KindClass::Penalty,
        score: 0,
        glyph: "\u{1F9E6}", // sock
        label: "Smelly Sock",
    },
];

impl ItemKind {
    pub const COUNT: usize = 6;

    /// All kinds, in tally order
    pub const ALL: [ItemKind; Self::COUNT] = [
        ItemKind::Notebook,
        ItemKind::Pencil,
        ItemKind::Apple,
        ItemKind::Ruler,
        ItemKind::GoldenBell,
        ItemKind::SmellySock,
    ];

    /// The equal-weight common subtypes the spawn roll picks among
    pub const COMMON: [ItemKind; 4] = [
        ItemKind::Notebook,
        ItemKind::Pencil,
        ItemKind::Apple,
        ItemKind::Ruler,
    ];

    #[inline]
    pub fn profile(self) -> &'static KindProfile {
        &PROFILES[self as usize]
    }

    #[inline]
    pub fn class(self) -> KindClass {
        self.profile().class
    }
}

/// A falling item entity
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// Rotation advance per tick, not per second
    pub rotation_step: f32,
    /// One-shot: flips false -> true on catch and never back
    pub caught: bool,
}

impl FallingItem {
    /// Advance physics by `dt` seconds.
    ///
    /// Semi-implicit Euler: gravity is applied to velocity before the
    /// position integration. The rotation step is per-frame on purpose.
    pub fn fall(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;
        self.rotation += self.rotation_step;
    }

    /// Item has fallen past the bottom edge by more than its radius
    pub fn is_below(&self, playfield_height: f32) -> bool {
        self.pos.y > playfield_height + self.radius
    }
}

/// The player-controlled catcher. Moves horizontally only.
#[derive(Debug, Clone, PartialEq)]
pub struct Catcher {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal step per tick (pixels, unscaled by dt)
    pub step: f32,
}

impl Catcher {
    /// Parked at the bottom center of the playfield
    pub fn new(playfield: Vec2) -> Self {
        let size = Vec2::new(CATCHER_WIDTH, CATCHER_HEIGHT);
        Self {
            pos: Vec2::new(
                (playfield.x - size.x) / 2.0,
                playfield.y - size.y - CATCHER_BOTTOM_MARGIN,
            ),
            size,
            step: CATCHER_STEP,
        }
    }

    /// Apply latched movement intent, then clamp to the playfield.
    /// Both keys held cancel out.
    pub fn apply_movement(&mut self, left: bool, right: bool, playfield_width: f32) {
        if left {
            self.pos.x -= self.step;
        }
        if right {
            self.pos.x += self.step;
        }
        self.pos.x = self.pos.x.clamp(0.0, playfield_width - self.size.x);
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Waiting for the explicit start signal
    NotStarted,
    /// Ticking
    Running,
    /// Terminal until an explicit reset
    Over,
}

/// Discrete cues emitted by the sim and drained by the driver each frame.
/// The sim never calls into audio or the DOM directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CommonCaught(ItemKind),
    BonusCaught,
    PenaltyCaught,
    RoundOver,
}

/// Per-kind caught counters, indexed by `ItemKind` discriminant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaughtTally([u32; ItemKind::COUNT]);

impl CaughtTally {
    pub fn bump(&mut self, kind: ItemKind) {
        self.0[kind as usize] += 1;
    }

    pub fn get(&self, kind: ItemKind) -> u32 {
        self.0[kind as usize]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Non-zero buckets, in tally order
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        ItemKind::ALL
            .iter()
            .map(|&k| (k, self.get(k)))
            .filter(|&(_, n)| n > 0)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RoundPhase,
    pub score: u64,
    pub lives: i32,
    /// Countdown, seconds. Clamped to 0 at the terminal transition.
    pub time_remaining: f32,
    pub tally: CaughtTally,
    /// Active items. Owned exclusively here; pruned by the end-of-tick sweep.
    pub items: Vec<FallingItem>,
    pub catcher: Catcher,
    pub spawner: SpawnPolicy,
    /// Screen-shake timer (seconds). Cosmetic only.
    pub shake: f32,
    /// Logical playfield size (width, height)
    pub playfield: Vec2,
    /// Pending cues since the last drain
    pub events: Vec<GameEvent>,
}

impl RoundState {
    /// Fresh round in `NotStarted`, waiting for the start signal
    pub fn new(seed: u64, playfield: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundPhase::NotStarted,
            score: 0,
            lives: STARTING_LIVES,
            time_remaining: ROUND_SECONDS,
            tally: CaughtTally::default(),
            items: Vec::new(),
            catcher: Catcher::new(playfield),
            spawner: SpawnPolicy::new(),
            shake: 0.0,
            playfield,
            events: Vec::new(),
        }
    }

    /// External start signal: `NotStarted -> Running`
    pub fn start(&mut self) {
        if self.phase == RoundPhase::NotStarted {
            self.phase = RoundPhase::Running;
        }
    }

    /// External reset signal: every field returns to its initial value
    /// (with a fresh seed) and play resumes immediately. The best score
    /// lives outside the round and is untouched.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed, self.playfield);
        self.phase = RoundPhase::Running;
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    /// Adopt a new playfield size (window resize). The catcher is
    /// re-parked at the bottom center; items keep falling where they are
    /// and leave through the new bottom edge.
    pub fn set_playfield(&mut self, playfield: Vec2) {
        self.playfield = playfield;
        self.catcher = Catcher::new(playfield);
    }

    /// Terminal transition. Edge-triggered: only ever called from a
    /// `Running` tick, and `Over` ticks early-return before reaching it.
    pub(crate) fn finish(&mut self) {
        self.phase = RoundPhase::Over;
        self.events.push(GameEvent::RoundOver);
    }

    /// Hand pending cues to the driver, clearing the queue
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
