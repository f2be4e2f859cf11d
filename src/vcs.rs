//! Supported version control systems
//!
//! The set of backends is closed: two distributed systems (`git`, `hg`) and
//! one centralized-branch system (`bzr`). Each operation is a `match` on the
//! tag that yields the exact command line for that tool.

use std::fmt;
use std::path::{Path, PathBuf};

/// Revision reported for bzr working copies; the bzr versions we target have
/// no simple query for it.
pub const BZR_REVISION: &str = "1";

/// Branch reported for bzr working copies.
pub const BZR_BRANCH: &str = "master";

/// Subdirectory of the temp dir that `bzr branch` creates.
pub const BZR_WORKING_DIR: &str = "wc";

/// A version control system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Git,
    Mercurial,
    Bazaar,
}

impl Backend {
    /// Maps a vanity metadata kind (`git`, `hg`, `bzr`) to a backend.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "git" => Some(Backend::Git),
            "hg" => Some(Backend::Mercurial),
            "bzr" => Some(Backend::Bazaar),
            _ => None,
        }
    }

    /// Name of the command line tool, which doubles as the metadata kind.
    pub fn program(self) -> &'static str {
        match self {
            Backend::Git => "git",
            Backend::Mercurial => "hg",
            Backend::Bazaar => "bzr",
        }
    }

    /// Clone-free reachability check against `url`.
    pub fn probe_args(self, url: &str) -> Vec<String> {
        match self {
            Backend::Git => args(["ls-remote", "--exit-code", url, "HEAD"]),
            Backend::Mercurial => args(["identify", url]),
            Backend::Bazaar => args(["info", url]),
        }
    }

    /// Where the working copy ends up inside a freshly allocated temp dir.
    ///
    /// `bzr branch` wants to create its destination itself, so bzr clones
    /// into a subdirectory instead of the temp dir.
    pub fn working_dir(self, temp_dir: &Path) -> PathBuf {
        match self {
            Backend::Git | Backend::Mercurial => temp_dir.to_path_buf(),
            Backend::Bazaar => temp_dir.join(BZR_WORKING_DIR),
        }
    }

    /// Clone `url` into `dest`. An empty `branch` leaves the choice to the
    /// tool's default.
    ///
    /// bzr has no branch flag; it does accept a revision at branch time, so
    /// a non-empty `revision` is folded in here for bzr only.
    pub fn clone_args(self, url: &str, dest: &Path, branch: &str, revision: &str) -> Vec<String> {
        let dest = dest.display().to_string();
        match self {
            Backend::Git | Backend::Mercurial => {
                let mut out = args(["clone", url, &dest]);
                if !branch.is_empty() {
                    out.extend(args(["--branch", branch]));
                }
                out
            }
            Backend::Bazaar => {
                let mut out = args(["branch"]);
                if !revision.is_empty() {
                    out.extend(args(["-r", revision]));
                }
                out.extend(args([url, &dest]));
                out
            }
        }
    }

    /// Moves an existing clone to `revision`. `None` when the backend pins
    /// the revision at clone time instead.
    pub fn update_args(self, dir: &Path, revision: &str) -> Option<Vec<String>> {
        let dir = dir.display().to_string();
        match self {
            Backend::Git => Some(args(["-C", &dir, "checkout", "--quiet", revision])),
            Backend::Mercurial => Some(args(["--cwd", &dir, "update", "-r", revision])),
            Backend::Bazaar => None,
        }
    }

    /// Query for the checked out revision, or `None` for a fixed placeholder.
    pub fn revision_args(self, dir: &Path) -> Option<Vec<String>> {
        let dir = dir.display().to_string();
        match self {
            Backend::Git => Some(args(["-C", &dir, "rev-parse", "HEAD"])),
            Backend::Mercurial => Some(args(["--cwd", &dir, "id", "-i"])),
            Backend::Bazaar => None,
        }
    }

    /// Query for the checked out branch, or `None` for a fixed placeholder.
    pub fn branch_args(self, dir: &Path) -> Option<Vec<String>> {
        let dir = dir.display().to_string();
        match self {
            Backend::Git => Some(args(["-C", &dir, "rev-parse", "--abbrev-ref", "HEAD"])),
            Backend::Mercurial => Some(args(["--cwd", &dir, "branch"])),
            Backend::Bazaar => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

fn args<const N: usize>(list: [&str; N]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
