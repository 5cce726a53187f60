use std::process::ExitCode;

use clap::Parser;

use crudpanel_cli::cli::Cli;
use crudpanel_cli::logging::configure_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    match crudpanel_cli::run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
