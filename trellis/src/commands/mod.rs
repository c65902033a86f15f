mod check;
mod clean;
mod completions;
mod generate;
mod list;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;

use crate::ops::Session;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for trellis_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Mount routes exposed by workspace packages into a host app")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate mounted route stubs and declarations
    Generate(GenerateCommand),

    /// Resolve mounts and report problems without writing anything
    Check(CheckCommand),

    /// List registry keys and resolved mounts
    List(ListCommand),

    /// Remove generated stubs and declarations
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Arguments shared by every command that reads a workspace.
#[derive(Args)]
pub(crate) struct WorkspaceArgs {
    /// Workspace root (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Host package name (overrides `host` in trellis.toml)
    #[arg(long, env = "TRELLIS_HOST")]
    pub host: Option<String>,

    /// Output directory, relative to the host (overrides `output` in trellis.toml)
    #[arg(short, long, env = "TRELLIS_OUTPUT")]
    pub output: Option<String>,
}

impl WorkspaceArgs {
    /// Load the workspace, exiting with a rendered error when it is invalid.
    pub fn open(&self) -> Session {
        Session::open(&self.root, self.host.as_deref(), self.output.as_deref()).unwrap_or_exit()
    }
}
