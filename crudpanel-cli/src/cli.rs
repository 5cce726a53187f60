use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "crudpanel")]
#[command(version)]
#[command(about = "Inspect crudpanel field kinds, entity schemas and framework defaults")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in field kinds with their required, available and default attributes
    Kinds,

    /// Validate an entity schema file and print its form section
    Check {
        /// Path to an entity schema YAML file
        schema: PathBuf,
    },

    /// Print the resolved framework defaults
    Config {
        /// Configuration file; defaults to crudpanel.{toml,yaml,yml,json} in the current directory
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}
