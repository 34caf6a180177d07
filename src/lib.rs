//! tagstore - tag registry with prefix autocomplete and durable snapshots

pub mod cli;
pub mod domain;
pub mod infra;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_add, handle_export, handle_import, handle_list, handle_related, handle_relate,
        handle_suggest, open_store,
    },
    init_logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "tags", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    let mut store = open_store(&data_dir)?;

    match &cli.command {
        Command::Add(args) => handle_add(args, &mut store),
        Command::Suggest(args) => handle_suggest(args, &store),
        Command::List(args) => handle_list(args, &store),
        Command::Relate(args) => handle_relate(args, &mut store),
        Command::Related(args) => handle_related(args, &store),
        Command::Export(args) => handle_export(args, &mut store),
        Command::Import(args) => handle_import(args, &mut store),
        Command::Completions(_) => Ok(()),
    }
}
