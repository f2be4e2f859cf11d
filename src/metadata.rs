//! Vanity import metadata
//!
//! When an import path matches none of the built-in hosting conventions, the
//! resolver asks a [`MetadataLookup`] which repository serves it. Fetching
//! and parsing metadata from the path's host is left to the implementor; the
//! resolver only needs the `(prefix, vcs, repo root)` triple back.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What a host says about an import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMeta {
    /// The import path prefix the metadata applies to.
    pub prefix: String,
    /// Version control kind: `git`, `hg` or `bzr`. Taken verbatim.
    pub vcs: String,
    /// Repository root URL.
    pub repo: String,
}

/// Source of vanity import metadata.
pub trait MetadataLookup: Send + Sync {
    fn lookup(&self, path: &str) -> Result<ImportMeta>;
}

/// Lookup used when no metadata source is configured; every path misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataLookup for NoMetadata {
    fn lookup(&self, path: &str) -> Result<ImportMeta> {
        Err(Error::Metadata {
            path: path.to_string(),
            message: "no vanity metadata source configured".to_string(),
        })
    }
}

/// A fixed table of metadata entries, typically from `.vendor-fetch.yaml`.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    entries: Vec<ImportMeta>,
}

impl StaticMetadata {
    pub fn new(entries: Vec<ImportMeta>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataLookup for StaticMetadata {
    /// Picks the longest prefix that covers `path` on a segment boundary.
    fn lookup(&self, path: &str) -> Result<ImportMeta> {
        self.entries
            .iter()
            .filter(|e| covers(&e.prefix, path))
            .max_by_key(|e| e.prefix.len())
            .cloned()
            .ok_or_else(|| Error::Metadata {
                path: path.to_string(),
                message: "no matching vanity entry".to_string(),
            })
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
