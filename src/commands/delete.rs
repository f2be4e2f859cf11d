//! # Delete Command Implementation

use anyhow::Result;
use clap::Args;

use vendor_fetch::vendor::Vendorer;

/// Remove a vendored import path from the project
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Import path to remove, exactly as recorded in the manifest
    pub importpath: String,
}

pub fn execute(vendorer: &Vendorer, args: DeleteArgs) -> Result<()> {
    let dep = vendorer.delete(&args.importpath)?;
    println!("deleted {}", dep.importpath);
    Ok(())
}
