use clap::Args;
use eyre::Result;
use trellis_codegen::pipeline::debug_enabled;

use super::WorkspaceArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let session = self.workspace.open();

        let report = ops::generate(
            session,
            ops::generate::GenerateOptions {
                dry_run: self.dry_run,
                snapshot: debug_enabled(),
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
