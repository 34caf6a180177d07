//! Snapshot handlers (export, import).

use anyhow::{Context, Result, bail};

use crate::cli::{ExportArgs, ImportArgs};
use crate::infra::KeyValueStorage;
use crate::store::{ExportOptions, LoadResult, TagStore};

pub fn handle_export<S: KeyValueStorage>(args: &ExportArgs, store: &mut TagStore<S>) -> Result<()> {
    let json = store
        .export_json(ExportOptions {
            dry_run: args.dry_run,
        })
        .context("failed to export tags")?;
    println!("{}", json);
    Ok(())
}

pub fn handle_import<S: KeyValueStorage>(args: &ImportArgs, store: &mut TagStore<S>) -> Result<()> {
    let json = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read snapshot: {}", args.file.display()))?;

    match store.import_json(&json) {
        LoadResult::Loaded { tags } => {
            store.save();
            println!("Imported {} tags", tags);
            Ok(())
        }
        LoadResult::Corrupt(reason) => {
            bail!("invalid snapshot in {}: {}", args.file.display(), reason)
        }
        LoadResult::Empty => bail!("no snapshot in {}", args.file.display()),
    }
}
