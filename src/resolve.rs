//! # Import Path Resolution
//!
//! This module turns a bare import path such as `github.com/foo/bar/baz` into
//! a probed [`RemoteRepo`] plus the sub-path inside that repository (`/baz`).
//!
//! ## Algorithm
//!
//! 1. Paths that do not look like `host.tld/segment[/segment...]` are
//!    rejected before any tool runs.
//! 2. Three hosting conventions are tried in order:
//!    - `github.com/<owner>/<project>` is always git.
//!    - `bitbucket.org/<owner>/<project>` is probed as git, then as hg, since
//!      Bitbucket has hosted both.
//!    - `launchpad.net/<project>[/<series>]` is always bzr.
//! 3. Anything else goes to the vanity [`MetadataLookup`], whose answer is
//!    trusted for the backend kind and repository root.
//!
//! A repository is only ever returned after it answered its probe.

use log::{debug, info};
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::metadata::MetadataLookup;
use crate::repository::{RemoteRepo, VcsEnv};
use crate::vcs::Backend;

const VALID_IMPORT: &str = r"^[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+(/[A-Za-z0-9_.\-]+)+$";
const GITHUB: &str = r"^github\.com/([A-Za-z0-9_.\-]+)/([A-Za-z0-9_.\-]+)(/.+)?";
const BITBUCKET: &str = r"^bitbucket\.org/([A-Za-z0-9_.\-]+)/([A-Za-z0-9_.\-]+)(/.+)?";
const LAUNCHPAD: &str = r"^launchpad\.net/([A-Za-z0-9_.\-]+)(?:/([A-Za-z0-9_.\-]+))?(/.+)?";

/// Resolves import paths to remote repositories.
///
/// The patterns are compiled once in [`Resolver::new`] and never change.
pub struct Resolver {
    valid: Regex,
    github: Regex,
    bitbucket: Regex,
    launchpad: Regex,
    env: VcsEnv,
    lookup: Box<dyn MetadataLookup>,
}

impl Resolver {
    pub fn new(env: VcsEnv, lookup: Box<dyn MetadataLookup>) -> Result<Self> {
        Ok(Self {
            valid: Regex::new(VALID_IMPORT)?,
            github: Regex::new(GITHUB)?,
            bitbucket: Regex::new(BITBUCKET)?,
            launchpad: Regex::new(LAUNCHPAD)?,
            env,
            lookup,
        })
    }

    /// Whether `path` passes the import path shape check.
    pub fn is_valid_import_path(&self, path: &str) -> bool {
        self.valid.is_match(path)
    }

    /// Resolves `path` to a probed repository and the sub-path within it.
    ///
    /// The sub-path is empty or starts with `/`.
    pub fn resolve(&self, path: &str) -> Result<(RemoteRepo, String)> {
        if !self.is_valid_import_path(path) {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        }

        if let Some(caps) = self.github.captures(path) {
            debug!("{} matches the github convention", path);
            let url = format!("https://github.com/{}/{}", &caps[1], &caps[2]);
            let repo = RemoteRepo::probe(Backend::Git, url, &self.env)?;
            return Ok((repo, sub_path(&caps, 3)));
        }

        if let Some(caps) = self.bitbucket.captures(path) {
            debug!("{} matches the bitbucket convention", path);
            let url = format!("https://bitbucket.org/{}/{}", &caps[1], &caps[2]);
            return self.probe_bitbucket(path, &url, sub_path(&caps, 3));
        }

        if let Some(caps) = self.launchpad.captures(path) {
            debug!("{} matches the launchpad convention", path);
            return match caps.get(2) {
                None => {
                    let url = format!("https://launchpad.net/{}", &caps[1]);
                    let repo = RemoteRepo::probe(Backend::Bazaar, url, &self.env)?;
                    Ok((repo, String::new()))
                }
                Some(series) => {
                    let url = format!("https://launchpad.net/{}/{}", &caps[1], series.as_str());
                    let repo = RemoteRepo::probe(Backend::Bazaar, url, &self.env)?;
                    Ok((repo, sub_path(&caps, 3)))
                }
            };
        }

        self.resolve_vanity(path)
    }

    fn probe_bitbucket(&self, path: &str, url: &str, extra: String) -> Result<(RemoteRepo, String)> {
        match RemoteRepo::probe(Backend::Git, url, &self.env) {
            Ok(repo) => return Ok((repo, extra)),
            Err(e) => info!("{} is not a git repository ({}), trying hg", url, e),
        }
        match RemoteRepo::probe(Backend::Mercurial, url, &self.env) {
            Ok(repo) => Ok((repo, extra)),
            Err(e) => {
                debug!("{} is not an hg repository either: {}", url, e);
                Err(Error::UnknownBackend {
                    path: path.to_string(),
                    kind: None,
                })
            }
        }
    }

    fn resolve_vanity(&self, path: &str) -> Result<(RemoteRepo, String)> {
        debug!("{} matches no hosting convention, looking up vanity metadata", path);
        let meta = self.lookup.lookup(path)?;

        let extra = path
            .strip_prefix(meta.prefix.as_str())
            .ok_or_else(|| Error::InvalidPath {
                path: path.to_string(),
            })?
            .to_string();

        let backend = Backend::from_kind(&meta.vcs).ok_or_else(|| Error::UnknownBackend {
            path: path.to_string(),
            kind: Some(meta.vcs.clone()),
        })?;

        debug!("{} is served by {} repository {}", meta.prefix, backend, meta.repo);
        let repo = RemoteRepo::probe(backend, meta.repo, &self.env)?;
        Ok((repo, extra))
    }
}

/// An absent trailing group is an empty sub-path, not an error.
fn sub_path(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
