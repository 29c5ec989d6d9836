//! Storage location commands.

use crate::cli::CliContext;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ResetStorageArgs {
    /// New storage file path (absolute or relative to the current directory)
    pub new_path: PathBuf,
}

pub fn run_get_storage(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.service.storage_path().display());
    Ok(())
}

pub fn run_reset_storage(ctx: &mut CliContext, args: ResetStorageArgs) -> Result<()> {
    let old = ctx.service.storage_path().to_path_buf();
    let new = ctx
        .service
        .relocate_store(&args.new_path)
        .with_context(|| format!("move storage file to {}", args.new_path.display()))?;
    println!("Moved storage file {} to {}", old.display(), new.display());
    Ok(())
}
