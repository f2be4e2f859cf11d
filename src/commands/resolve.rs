//! # Resolve Command Implementation
//!
//! Resolves an import path and prints the backend, repository URL and the
//! sub-path inside the repository. Nothing is checked out; only the probe
//! for the repository runs.

use anyhow::Result;
use clap::Args;

use vendor_fetch::vendor::Vendorer;

/// Show which repository an import path resolves to
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Import path to resolve, e.g. github.com/foo/bar/baz
    pub importpath: String,
}

pub fn execute(vendorer: &Vendorer, args: ResolveArgs) -> Result<()> {
    let (repo, extra) = vendorer.resolve(&args.importpath)?;
    println!("{}\t{}\t{}", repo.backend(), repo.url(), extra);
    Ok(())
}
