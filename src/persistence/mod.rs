//! Named-blob persistence
//!
//! The leaderboard only needs "read string by key" and "write string by key".
//! Backends:
//! - `MemoryStore`: in-process map (tests, no-persistence runs)
//! - `FileStore`: one file per key, tmp → rename on write (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

use crate::error::StoreError;

/// Read/write contract for persisted blobs
pub trait BlobStore {
    /// `Ok(None)` when nothing has been stored under `key` yet
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
