use clap::Args;
use eyre::Result;

use super::WorkspaceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::list(self.workspace.open())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
