//! Tag registry, prefix trie, relation graph, and the store that owns them

mod graph;
mod registry;
mod snapshot;
mod tag_store;
mod trie;

pub use graph::RelationGraph;
pub use registry::{AddOutcome, TagRegistry};
pub use snapshot::{LoadResult, Snapshot, SnapshotError};
pub use tag_store::{ExportOptions, STORAGE_KEY, TagStore};
pub use trie::Trie;
