//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (drag to direction)
//! - Storage (LocalStorage on web, a directory of JSON files natively)

pub mod input;
pub mod storage;

pub use input::{DragTracker, MIN_DRAG_DISTANCE};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(test)]
pub(crate) use storage::BrokenStore;
