//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

/// tags - tag content and autocomplete tag names
#[derive(Parser, Debug)]
#[command(name = "tags", version, about, long_about = None)]
pub struct Cli {
    /// Storage directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tag a piece of content
    Add(AddArgs),

    /// Suggest tag names for partially typed input
    Suggest(SuggestArgs),

    /// List all tags
    #[command(name = "ls")]
    List(ListArgs),

    /// Relate two tags to each other
    Relate(RelateArgs),

    /// Show tags related to a tag
    Related(RelatedArgs),

    /// Print the stored snapshot as JSON
    Export(ExportArgs),

    /// Replace all tags with a snapshot file
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Content identifier (e.g. a bookmark URL or ID)
    pub content_id: String,

    /// Comma-separated tag names
    pub tags: String,
}

/// Arguments for the `suggest` command
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// Text typed so far; after a comma only the last tag is completed
    #[arg(allow_hyphen_values = true)]
    pub input: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show how many content items carry each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `relate` command
#[derive(Parser, Debug)]
pub struct RelateArgs {
    /// First tag
    pub tag1: String,

    /// Second tag
    pub tag2: String,
}

/// Arguments for the `related` command
#[derive(Parser, Debug)]
pub struct RelatedArgs {
    /// Tag to look up
    pub tag: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Print without rewriting the stored snapshot
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Snapshot JSON file to import
    pub file: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count when set.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
