//! # Vendoring Workflow
//!
//! `Vendorer` ties resolution, checkout and the manifest together for one
//! project:
//!
//! - **fetch**: resolve an import path, check it out, copy the sub-path into
//!   `vendor/src/<importpath>`, record it in the manifest, destroy the
//!   working copy.
//! - **delete**: remove a vendored import path and its manifest record.
//! - **list**: the manifest's records, in order.
//!
//! The working copy is destroyed whether or not copying succeeded. Once a
//! tree has been copied into the project it is recorded in the manifest even
//! if tearing down the working copy then fails.

use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use crate::config::{Config, VENDOR_SRC};
use crate::error::{Error, Result};
use crate::filesystem::{copy_tree, prune_empty_ancestors, remove_tree};
use crate::manifest::{read_manifest, write_manifest, Dependency, Manifest};
use crate::repository::{RemoteRepo, VcsEnv, WorkingCopy};
use crate::resolve::Resolver;

/// Vendors dependencies into one project.
pub struct Vendorer {
    vendor_dir: PathBuf,
    manifest_path: PathBuf,
    resolver: Resolver,
}

impl Vendorer {
    pub fn new(project: &Path, config: &Config, env: VcsEnv) -> Result<Self> {
        Ok(Self {
            vendor_dir: project.join(VENDOR_SRC),
            manifest_path: config.manifest_path(project),
            resolver: Resolver::new(env, config.metadata())?,
        })
    }

    /// Directory vendored import paths are copied under.
    pub fn vendor_dir(&self) -> &Path {
        &self.vendor_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Resolves `importpath` without checking anything out.
    pub fn resolve(&self, importpath: &str) -> Result<(RemoteRepo, String)> {
        self.resolver.resolve(importpath)
    }

    /// Vendors `importpath` at `branch`/`revision` and records it.
    pub fn fetch(&self, importpath: &str, branch: &str, revision: &str) -> Result<Dependency> {
        let mut manifest = read_manifest(&self.manifest_path)?;
        if manifest.has_importpath(importpath) {
            return Err(Error::AlreadyRegistered {
                importpath: importpath.to_string(),
            });
        }
        let dst = self.destination(importpath)?;

        let (repo, extra) = self.resolver.resolve(importpath)?;
        let wc = repo.checkout(branch, revision)?;
        let copied = self.vendor_working_copy(&repo, &wc, importpath, &extra, &dst);
        let destroyed = wc.destroy();
        self.record(&mut manifest, copied?, destroyed)
    }

    /// Records a vendored dependency, then reports a failed teardown.
    fn record(
        &self,
        manifest: &mut Manifest,
        dep: Dependency,
        destroyed: Result<()>,
    ) -> Result<Dependency> {
        manifest.add_dependency(dep.clone())?;
        write_manifest(&self.manifest_path, manifest)?;
        info!(
            "vendored {} from {} at {}",
            dep.importpath, dep.repository, dep.revision
        );
        if let Err(err) = destroyed {
            warn!("{} was vendored but its working copy remains: {}", dep.importpath, err);
            return Err(err);
        }
        Ok(dep)
    }

    fn vendor_working_copy(
        &self,
        repo: &RemoteRepo,
        wc: &WorkingCopy,
        importpath: &str,
        extra: &str,
        dst: &Path,
    ) -> Result<Dependency> {
        let revision = wc.revision()?;
        let branch = wc.branch()?;

        if dst.exists() {
            return Err(Error::Filesystem {
                path: dst.display().to_string(),
                message: "destination already exists".to_string(),
            });
        }

        let src = match extra.trim_start_matches('/') {
            "" => wc.dir().to_path_buf(),
            sub => wc.dir().join(sub),
        };
        debug!("copying {} to {}", src.display(), dst.display());
        if let Err(err) = copy_tree(&src, dst) {
            discard_partial_copy(dst);
            return Err(err);
        }

        Ok(Dependency {
            importpath: importpath.to_string(),
            repository: repo.url().to_string(),
            revision,
            branch,
            path: extra.to_string(),
        })
    }

    /// Removes the vendored copy of `importpath` and its manifest record.
    pub fn delete(&self, importpath: &str) -> Result<Dependency> {
        let mut manifest = read_manifest(&self.manifest_path)?;
        let dep = manifest.get_dependency_for_importpath(importpath)?.clone();

        let dst = self.destination(importpath)?;
        remove_tree(&dst)?;
        if let Some(parent) = dst.parent() {
            prune_empty_ancestors(parent)?;
        }

        manifest.remove_dependency(&dep)?;
        write_manifest(&self.manifest_path, &manifest)?;
        info!("deleted {}", importpath);
        Ok(dep)
    }

    /// Vendored dependencies in manifest order.
    pub fn list(&self) -> Result<Vec<Dependency>> {
        Ok(read_manifest(&self.manifest_path)?.dependencies)
    }

    /// Vendored location for `importpath`; never escapes the vendor dir.
    fn destination(&self, importpath: &str) -> Result<PathBuf> {
        let relative = Path::new(importpath);
        let safe = !importpath.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(Error::InvalidPath {
                path: importpath.to_string(),
            });
        }
        Ok(self.vendor_dir.join(relative))
    }
}

/// Best-effort removal of a half-copied destination.
fn discard_partial_copy(dst: &Path) {
    let cleaned = remove_tree(dst).and_then(|()| match dst.parent() {
        Some(parent) => prune_empty_ancestors(parent),
        None => Ok(()),
    });
    if let Err(cleanup) = cleaned {
        warn!(
            "failed to clean up {} after failed copy: {}",
            dst.display(),
            cleanup
        );
    }
}
