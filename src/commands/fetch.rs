//! # Fetch Command Implementation
//!
//! Vendors an import path: resolve, check out at the requested branch and
//! revision, copy into `vendor/src/<importpath>` and record the result in
//! the manifest.

use anyhow::Result;
use clap::Args;

use vendor_fetch::vendor::Vendorer;

/// Vendor an import path into the project
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Import path to vendor, e.g. github.com/foo/bar
    pub importpath: String,

    /// Branch to clone. Defaults to the remote's default branch.
    #[arg(short, long, value_name = "BRANCH", default_value = "")]
    pub branch: String,

    /// Revision to check out after cloning. Defaults to the branch head.
    #[arg(short, long, value_name = "REV", default_value = "")]
    pub revision: String,
}

pub fn execute(vendorer: &Vendorer, args: FetchArgs) -> Result<()> {
    let dep = vendorer.fetch(&args.importpath, &args.branch, &args.revision)?;
    println!("{} {} {}", dep.importpath, dep.repository, dep.revision);
    Ok(())
}
