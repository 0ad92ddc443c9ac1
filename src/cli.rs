//! CLI interface for pr-describe.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod description;

pub use description::DescriptionCommand;

/// pr-describe: pull request descriptions from your branch diff.
#[derive(Parser)]
#[command(name = "pr-describe")]
#[command(about = "Generates pull request descriptions from the diff against the base branch", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generates a description of HEAD relative to the base branch.
    Description(DescriptionCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Description(cmd) => cmd.execute().await,
        }
    }
}
