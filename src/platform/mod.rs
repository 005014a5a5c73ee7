//! Platform abstraction layer
//!
//! Browser/native seams the game core stays indifferent to. Currently just
//! the persistent scalar store backing the best score.

pub mod storage;

pub use storage::{MemoryStore, ScalarStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
