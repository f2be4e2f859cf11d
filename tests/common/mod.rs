//! Shared test utilities for the CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_fake_git();
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::FAKE_REVISION;
}

/// Revision the fake `git` reports for every working copy.
#[allow(dead_code)]
pub const FAKE_REVISION: &str = "0123456789abcdef0123456789abcdef01234567";

/// A stand-in `git` that answers probes, clones a small tree and reports a
/// fixed revision. Probes of URLs containing `missing` fail.
#[allow(dead_code)]
const FAKE_GIT: &str = r#"#!/bin/sh
case "$1" in
  ls-remote)
    case "$3" in
      *missing*) echo "fatal: repository not found" >&2; exit 128 ;;
    esac
    exit 0 ;;
  clone)
    mkdir -p "$3/.git" "$3/sub" || exit 1
    echo "package bar" > "$3/bar.go"
    echo "package sub" > "$3/sub/sub.go"
    exit 0 ;;
  -C)
    shift 2
    case "$*" in
      "rev-parse --abbrev-ref HEAD") echo main ;;
      "rev-parse HEAD") echo 0123456789abcdef0123456789abcdef01234567 ;;
    esac
    exit 0 ;;
esac
exit 1
"#;

/// Manifest documents for seeding fixtures.
#[allow(dead_code)]
pub mod manifests {
    /// One vendored github dependency.
    pub const ONE_DEPENDENCY: &str = r#"{
  "version": 0,
  "dependencies": [
    {
      "importpath": "github.com/foo/bar",
      "repository": "https://github.com/foo/bar",
      "revision": "0123456789abcdef0123456789abcdef01234567",
      "branch": "master",
      "path": ""
    }
  ]
}
"#;
}

/// A temporary project directory plus a private temp root for working
/// copies and an optional directory of fake tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    tool_dir: Option<PathBuf>,
}

impl TestFixture {
    /// Create a fixture with an empty project.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("project")
            .create_dir_all()
            .expect("Failed to create project directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create temp root");
        Self {
            temp_dir,
            tool_dir: None,
        }
    }

    /// Add a `.vendor-fetch.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.project_child(".vendor-fetch.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Write `content` as the project's manifest.
    #[allow(dead_code)]
    pub fn with_manifest(self, content: &str) -> Self {
        self.project_child("vendor/manifest")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Add a file under the project root.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.project_child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Put a fake `git` first on the `PATH` of every command.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn with_fake_git(mut self) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.temp_dir.child("bin");
        bin.create_dir_all().expect("Failed to create tool dir");
        let git = bin.child("git");
        git.write_str(FAKE_GIT).expect("Failed to write fake git");
        std::fs::set_permissions(git.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake git executable");
        self.tool_dir = Some(bin.path().to_path_buf());
        self
    }

    /// The project root.
    pub fn project(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// The temp root working copies are created under.
    pub fn temp_root(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// A path below the project root.
    pub fn project_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(Path::new("project").join(path))
    }

    /// Create a command running against this fixture's project and temp root.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vendor-fetch");
        cmd.current_dir(self.project())
            .env_remove("VENDOR_FETCH_TEMP")
            .env_remove("RUST_LOG")
            .arg("--temp-root")
            .arg(self.temp_root());
        if let Some(tools) = &self.tool_dir {
            let path = env::var_os("PATH").unwrap_or_default();
            let mut dirs = vec![tools.clone()];
            dirs.extend(env::split_paths(&path));
            cmd.env("PATH", env::join_paths(dirs).expect("Failed to build PATH"));
        }
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
