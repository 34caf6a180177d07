//! Command handlers for the CLI.

mod relations;
mod snapshot;
mod tagging;


use std::path::Path;

use anyhow::{Context, Result};

use crate::infra::FileStorage;
use crate::store::TagStore;

// Re-export public items
pub use relations::{handle_relate, handle_related};
pub use snapshot::{handle_export, handle_import};
pub use tagging::{handle_add, handle_list, handle_suggest};

/// Opens the file-backed store in `data_dir`.
pub fn open_store(data_dir: &Path) -> Result<TagStore<FileStorage>> {
    let storage = FileStorage::open(data_dir)
        .with_context(|| format!("failed to open tag storage at {}", data_dir.display()))?;
    Ok(TagStore::open(storage))
}
