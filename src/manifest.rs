//! # Vendor Manifest
//!
//! The manifest records every vendored dependency: which import path it
//! provides, where it came from, and at which revision. It is stored as JSON:
//!
//! ```json
//! {
//!   "version": 0,
//!   "dependencies": [
//!     {
//!       "importpath": "github.com/foo/bar",
//!       "repository": "https://github.com/foo/bar",
//!       "revision": "1f0c3b4e...",
//!       "branch": "master",
//!       "path": ""
//!     }
//!   ]
//! }
//! ```
//!
//! A missing manifest file reads as an empty manifest at version 0.
//! [`write_manifest`] overwrites the file in place; it does not write to a
//! temporary file and rename, so an interrupted write can leave a truncated
//! manifest behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current manifest format version.
pub const MANIFEST_VERSION: i32 = 0;

/// Describes one vendored import path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name by which this dependency is known.
    pub importpath: String,
    /// Remote repository the dependency was fetched from.
    pub repository: String,
    /// Revision of the repository that was vendored.
    pub revision: String,
    /// Branch the revision was located on. May be empty.
    pub branch: String,
    /// Path inside the repository the dependency was taken from.
    pub path: String,
}

/// The list of vendored dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `dep`, refusing a second record for the same import path.
    pub fn add_dependency(&mut self, dep: Dependency) -> Result<()> {
        if self.has_importpath(&dep.importpath) {
            return Err(Error::AlreadyRegistered {
                importpath: dep.importpath,
            });
        }
        self.dependencies.push(dep);
        Ok(())
    }

    /// Removes the record equal to `dep` in every field.
    pub fn remove_dependency(&mut self, dep: &Dependency) -> Result<()> {
        match self.dependencies.iter().position(|d| d == dep) {
            Some(index) => {
                self.dependencies.remove(index);
                Ok(())
            }
            None => Err(Error::DependencyNotFound {
                importpath: dep.importpath.clone(),
            }),
        }
    }

    pub fn has_importpath(&self, path: &str) -> bool {
        self.dependencies.iter().any(|d| d.importpath == path)
    }

    pub fn get_dependency_for_importpath(&self, path: &str) -> Result<&Dependency> {
        self.dependencies
            .iter()
            .find(|d| d.importpath == path)
            .ok_or_else(|| Error::DependencyNotFound {
                importpath: path.to_string(),
            })
    }

    /// Encodes the manifest as pretty-printed JSON followed by a newline.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(serialization)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(serialization)
    }
}

/// Reads the manifest at `path`; a missing file is an empty manifest.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    match File::open(path) {
        Ok(file) => Manifest::from_reader(file),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Manifest::new()),
        Err(e) => Err(Error::filesystem(path, e)),
    }
}

/// Writes `manifest` to `path`, creating or truncating the file.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
        }
    }
    let file = File::create(path).map_err(|e| Error::filesystem(path, e))?;
    manifest.to_writer(file)
}

fn serialization(err: serde_json::Error) -> Error {
    Error::Serialization {
        message: err.to_string(),
    }
}
