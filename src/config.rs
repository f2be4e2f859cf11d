//! # Project Configuration
//!
//! Optional per-project settings live in `.vendor-fetch.yaml` at the project
//! root. Every field may be omitted, and a missing file means defaults:
//!
//! ```yaml
//! temp_root: /var/tmp/vendor-fetch
//! manifest: vendor/manifest
//! vanity:
//!   - prefix: golang.org/x/net
//!     vcs: git
//!     repo: https://go.googlesource.com/net
//! ```
//!
//! - **`temp_root`**: where working copies are checked out. Defaults to the
//!   system temp directory. The CLI's `--temp-root` flag takes precedence.
//! - **`manifest`**: manifest location relative to the project root.
//! - **`vanity`**: static vanity import metadata, consulted for paths that
//!   match no built-in hosting convention.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::{ImportMeta, MetadataLookup, NoMetadata, StaticMetadata};

/// Name of the configuration file in the project root.
pub const CONFIG_FILE: &str = ".vendor-fetch.yaml";

/// Default manifest location relative to the project root.
pub const DEFAULT_MANIFEST: &str = "vendor/manifest";

/// Directory vendored sources are copied into, relative to the project root.
pub const VENDOR_SRC: &str = "vendor/src";

/// Contents of `.vendor-fetch.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub temp_root: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub vanity: Vec<ImportMeta>,
}

impl Config {
    /// Loads the configuration for the project rooted at `project`.
    pub fn load(project: &Path) -> Result<Self> {
        let path = project.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::filesystem(&path, e)),
        }
    }

    /// Manifest path for `project`.
    pub fn manifest_path(&self, project: &Path) -> PathBuf {
        project.join(
            self.manifest
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_MANIFEST)),
        )
    }

    /// Root for temporary working copies.
    pub fn temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// The vanity lookup described by this configuration.
    pub fn metadata(&self) -> Box<dyn MetadataLookup> {
        if self.vanity.is_empty() {
            Box::new(NoMetadata)
        } else {
            Box::new(StaticMetadata::new(self.vanity.clone()))
        }
    }
}

/// Parses `.vendor-fetch.yaml` content. Empty content is the default config.
pub fn parse(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
    })
}
