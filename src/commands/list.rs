//! # List Command Implementation
//!
//! Prints the manifest's dependencies in recorded order, one per line, or
//! the whole list as JSON with `--json`.

use anyhow::Result;
use clap::Args;

use vendor_fetch::vendor::Vendorer;

/// List vendored dependencies
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the dependencies as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn execute(vendorer: &Vendorer, args: ListArgs) -> Result<()> {
    let deps = vendorer.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&deps)?);
        return Ok(());
    }

    if deps.is_empty() {
        println!("No dependencies vendored");
        return Ok(());
    }
    for dep in &deps {
        let branch = if dep.branch.is_empty() {
            "-"
        } else {
            dep.branch.as_str()
        };
        println!(
            "{}\t{}\t{}\t{}",
            dep.importpath, dep.repository, branch, dep.revision
        );
    }
    Ok(())
}
