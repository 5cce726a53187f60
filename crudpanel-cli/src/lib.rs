//! Library half of the `crudpanel` binary: argument parsing, logging setup
//! and the subcommands.

pub mod cli;
pub mod commands;
pub mod logging;

use anyhow::Result;

use crudpanel_config::ConfigProvider;

use cli::{Cli, Commands};

/// Run a parsed command and return the text to print.
pub async fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Kinds => commands::kinds::execute(cli.format),
        Commands::Check { schema } => {
            let provider = ConfigProvider::discover(std::env::current_dir()?);
            commands::check::execute(schema, &provider, cli.format).await
        }
        Commands::Config { file } => commands::config::execute(file.as_deref(), cli.format),
    }
}
