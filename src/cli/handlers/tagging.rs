//! Tagging handlers (add, suggest, ls).

use anyhow::{Context, Result};

use crate::cli::output::{Output, OutputFormat, TagListing};
use crate::cli::{AddArgs, ListArgs, SuggestArgs};
use crate::domain::{validate_string, validate_tag_list};
use crate::infra::KeyValueStorage;
use crate::store::TagStore;

pub fn handle_add<S: KeyValueStorage>(args: &AddArgs, store: &mut TagStore<S>) -> Result<()> {
    let content_id =
        validate_string(&args.content_id, Some("contentID")).context("invalid content id")?;
    let tags = validate_tag_list(&args.tags).context("invalid tag list")?;

    store.add_tags(&tags, &content_id, Some("cli"));

    println!("Tagged {} with: {}", content_id, tags.join(", "));
    Ok(())
}

pub fn handle_suggest<S: KeyValueStorage>(args: &SuggestArgs, store: &TagStore<S>) -> Result<()> {
    let suggestions = store.suggest_for_input(&args.input);

    match args.format {
        OutputFormat::Human => {
            for s in &suggestions {
                println!("{}", s);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(suggestions))?);
        }
    }
    Ok(())
}

pub fn handle_list<S: KeyValueStorage>(args: &ListArgs, store: &TagStore<S>) -> Result<()> {
    let tags = store.all_tags();

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for t in &tags {
                    if args.counts {
                        println!("{} ({})", t.name(), t.content_count());
                    } else {
                        println!("{}", t.name());
                    }
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|t| TagListing {
                    id: t.id().to_string(),
                    name: t.name().to_string(),
                    count: args.counts.then(|| t.content_count()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}
