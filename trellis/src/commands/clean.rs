use clap::Args;
use eyre::Result;

use super::WorkspaceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Show what would be deleted without deleting it
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let session = self.workspace.open();
        let report = ops::clean(&session, self.dry_run)?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
