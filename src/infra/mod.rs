//! Persistence backends

mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
