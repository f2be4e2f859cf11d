//! # Remote Repositories and Working Copies
//!
//! This module provides the two halves of the repository abstraction:
//!
//! - **`RemoteRepo`**: a remote location that has answered a reachability
//!   probe. It knows its canonical URL and can materialize a working copy.
//!
//! - **`WorkingCopy`**: a checked-out directory owned exclusively by this
//!   value until `destroy` consumes it.
//!
//! Both are tagged with a [`Backend`] and dispatch every operation on that
//! tag; the external commands themselves go through the [`CommandRunner`]
//! held by a [`VcsEnv`], so tests can swap in a double without spawning
//! processes.
//!
//! ## Lifecycle
//!
//! A checkout allocates a session directory under the environment's temp
//! root, creates a `src` anchor inside it and clones into a fresh temporary
//! directory below that anchor:
//!
//! ```text
//! <temp_root>/vendor-fetch-XXXX/src/vendor-fetch-YYYY[/wc]
//! ```
//!
//! If anything fails while cloning, the session is removed before the error
//! is returned, so a failed checkout leaves nothing behind. A working copy is
//! torn down with `destroy`, which removes its directory, prunes the
//! ancestors it left empty up to the `src` anchor, and then removes the
//! session. The temp root and everything above it are never touched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::filesystem::{make_session_dir, make_temp_dir, prune_empty_ancestors, remove_tree};
use crate::process::{CommandRunner, SystemRunner};
use crate::vcs::{Backend, BZR_BRANCH, BZR_REVISION};

/// The process runner and temp root that repositories operate with.
#[derive(Clone)]
pub struct VcsEnv {
    runner: Arc<dyn CommandRunner>,
    temp_root: PathBuf,
}

impl VcsEnv {
    /// Creates an environment with a custom runner and temp root.
    pub fn new(runner: Arc<dyn CommandRunner>, temp_root: PathBuf) -> Self {
        Self { runner, temp_root }
    }

    /// Real processes, working copies under the system temp directory.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner), std::env::temp_dir())
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }
}

impl fmt::Debug for VcsEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcsEnv")
            .field("temp_root", &self.temp_root)
            .finish_non_exhaustive()
    }
}

/// A reachable remote repository.
#[derive(Debug, Clone)]
pub struct RemoteRepo {
    backend: Backend,
    url: String,
    env: VcsEnv,
}

impl RemoteRepo {
    /// Probes `url` with `backend`'s tooling and returns the repository if it
    /// answers. The probe does not touch the filesystem.
    pub fn probe(backend: Backend, url: impl Into<String>, env: &VcsEnv) -> Result<Self> {
        let url = url.into();
        debug!("probing {} as {}", url, backend);
        env.runner()
            .output(backend.program(), &backend.probe_args(&url))
            .map_err(|e| Error::Probe {
                url: url.clone(),
                backend: backend.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            backend,
            url,
            env: env.clone(),
        })
    }

    /// The URL the repository is cloned from.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Checks out `branch` at `revision` into a fresh temporary directory.
    ///
    /// An empty `branch` selects the tool's default branch. An empty
    /// `revision` leaves the working copy at the tip of that branch.
    pub fn checkout(&self, branch: &str, revision: &str) -> Result<WorkingCopy> {
        let (session, anchor) = make_session_dir(self.env.temp_root())?;

        let dir = match make_temp_dir(&anchor).and_then(|temp_dir| {
            let dir = self.backend.working_dir(&temp_dir);
            self.materialize(&dir, branch, revision).map(|()| dir)
        }) {
            Ok(dir) => dir,
            Err(err) => {
                discard_session(&session);
                return Err(err);
            }
        };

        debug!("checked out {} into {}", self.url, dir.display());
        Ok(WorkingCopy {
            backend: self.backend,
            path: dir,
            session,
            env: self.env.clone(),
        })
    }

    fn materialize(&self, dir: &Path, branch: &str, revision: &str) -> Result<()> {
        let runner = self.env.runner();
        let program = self.backend.program();

        runner
            .run(
                program,
                &self.backend.clone_args(&self.url, dir, branch, revision),
            )
            .map_err(|e| self.checkout_error(e))?;

        if !revision.is_empty() {
            if let Some(args) = self.backend.update_args(dir, revision) {
                runner
                    .run(program, &args)
                    .map_err(|e| self.checkout_error(e))?;
            }
        }
        Ok(())
    }

    fn checkout_error(&self, err: Error) -> Error {
        Error::Checkout {
            url: self.url.clone(),
            backend: self.backend.to_string(),
            message: err.to_string(),
        }
    }
}

/// Best-effort removal of a session after a failed checkout.
fn discard_session(session: &Path) {
    if let Err(cleanup) = remove_tree(session) {
        warn!(
            "failed to clean up {} after failed checkout: {}",
            session.display(),
            cleanup
        );
    }
}

/// A local checkout of a remote repository.
#[derive(Debug)]
pub struct WorkingCopy {
    backend: Backend,
    path: PathBuf,
    session: PathBuf,
    env: VcsEnv,
}

impl WorkingCopy {
    /// Root of the working copy.
    pub fn dir(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The revision currently checked out.
    ///
    /// bzr working copies always report `"1"`: the bzr versions this tool
    /// targets have no simple query for it.
    pub fn revision(&self) -> Result<String> {
        match self.backend.revision_args(&self.path) {
            Some(args) => self.query(&args),
            None => Ok(BZR_REVISION.to_string()),
        }
    }

    /// The branch currently checked out. bzr always reports `"master"`.
    pub fn branch(&self) -> Result<String> {
        match self.backend.branch_args(&self.path) {
            Some(args) => self.query(&args),
            None => Ok(BZR_BRANCH.to_string()),
        }
    }

    fn query(&self, args: &[String]) -> Result<String> {
        let out = self.env.runner().output(self.backend.program(), args)?;
        Ok(out.trim().to_string())
    }

    /// Removes the working copy, prunes the ancestors it left empty and
    /// removes the session that held it.
    pub fn destroy(self) -> Result<()> {
        debug!("destroying working copy {}", self.path.display());
        remove_tree(&self.path)?;
        if let Some(parent) = self.path.parent() {
            prune_empty_ancestors(parent)?;
        }
        remove_tree(&self.session)
    }
}
