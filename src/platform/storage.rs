//! Persistent scalar storage
//!
//! The sim never touches storage; the driver reads the best score through
//! this trait at startup and writes through it when beaten. Backends are
//! allowed to fail silently - losing a best score write must never affect
//! gameplay.

/// A key-value store of non-negative integers
pub trait ScalarStore {
    fn get(&self, key: &str) -> Option<u64>;
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScalarStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
    }
}

/// LocalStorage-backed store (WASM only). Values round-trip as decimal
/// strings; unparseable or missing entries read as absent.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScalarStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<u64> {
        let storage = Self::storage()?;
        let raw = storage.get_item(key).ok()??;
        raw.parse().ok()
    }

    fn set(&mut self, key: &str, value: u64) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, &value.to_string());
        } else {
            log::warn!("LocalStorage unavailable - {key} not persisted");
        }
    }
}
