//! # Vendor Fetch Library
//!
//! This library resolves source import paths to remote version control
//! repositories, checks them out into disposable working copies, and vendors
//! their contents into a project under `vendor/src`, recording each
//! dependency in a JSON manifest. It is used by the `vendor-fetch`
//! command-line tool but can be embedded in other tooling.
//!
//! ## Quick Example
//!
//! ```
//! use vendor_fetch::manifest::{Dependency, Manifest};
//! use vendor_fetch::vcs::Backend;
//!
//! assert_eq!(Backend::from_kind("hg"), Some(Backend::Mercurial));
//!
//! let mut manifest = Manifest::new();
//! manifest
//!     .add_dependency(Dependency {
//!         importpath: "github.com/foo/bar".to_string(),
//!         repository: "https://github.com/foo/bar".to_string(),
//!         revision: "1f0c3b4".to_string(),
//!         branch: "master".to_string(),
//!         path: String::new(),
//!     })
//!     .unwrap();
//! assert!(manifest.has_importpath("github.com/foo/bar"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Backends (`vcs`)**: the closed set of supported tools (git, hg, bzr)
//!   and the exact command lines each operation uses.
//! - **Process (`process`)**: the [`process::CommandRunner`] seam every tool
//!   invocation goes through.
//! - **Repositories (`repository`)**: probed [`repository::RemoteRepo`]s and
//!   the temporary [`repository::WorkingCopy`]s checked out from them.
//! - **Resolution (`resolve`, `metadata`)**: import path to repository,
//!   through hosting conventions or vanity metadata.
//! - **Manifest (`manifest`)**: the record of vendored dependencies.
//! - **Vendoring (`vendor`)**: fetch, delete and list for a project.
//!
//! External tools are only ever run through the runner held by a
//! [`repository::VcsEnv`], so the whole pipeline can be driven by a test
//! double.

pub mod config;
pub mod error;
pub mod filesystem;
pub mod manifest;
pub mod metadata;
pub mod process;
pub mod repository;
pub mod resolve;
pub mod vcs;
pub mod vendor;

#[cfg(test)]
mod mock_runner;

#[cfg(test)]
mod resolve_proptest;
