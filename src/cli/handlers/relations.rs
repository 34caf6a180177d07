//! Relation handlers (relate, related).

use anyhow::{Context, Result};

use crate::cli::output::{Output, OutputFormat};
use crate::cli::{RelateArgs, RelatedArgs};
use crate::domain::validate_string;
use crate::infra::KeyValueStorage;
use crate::store::TagStore;

pub fn handle_relate<S: KeyValueStorage>(args: &RelateArgs, store: &mut TagStore<S>) -> Result<()> {
    let tag1 = validate_string(&args.tag1, Some("tag1")).context("invalid tag")?;
    let tag2 = validate_string(&args.tag2, Some("tag2")).context("invalid tag")?;

    store.add_relationship(&tag1, &tag2);

    println!("Related {} <-> {}", tag1, tag2);
    Ok(())
}

pub fn handle_related<S: KeyValueStorage>(args: &RelatedArgs, store: &TagStore<S>) -> Result<()> {
    let tag = validate_string(&args.tag, Some("tag")).context("invalid tag")?;
    let related = store.related(&tag);

    match args.format {
        OutputFormat::Human => {
            if related.is_empty() {
                println!("No related tags for '{}'.", tag);
            } else {
                for r in &related {
                    println!("{}", r);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(related))?);
        }
    }
    Ok(())
}
