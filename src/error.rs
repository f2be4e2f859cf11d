//! # Error Handling
//!
//! This module defines the error type shared by every layer of `vendor-fetch`.
//! It uses `thiserror` to build a single `Error` enum whose variants form a
//! stable classification callers can match on:
//!
//! - **`InvalidPath`**: the import path failed the shape check, or a vanity
//!   prefix did not belong to the path it was looked up for.
//! - **`UnknownBackend`**: no backend could be determined for a path.
//! - **`Probe`**: a remote repository was unreachable or does not exist.
//! - **`Checkout`**: cloning or updating a working copy failed.
//! - **`Filesystem`**: temporary directory creation, removal or pruning failed.
//! - **`Serialization`**: the manifest could not be encoded or decoded.
//!
//! The remaining variants carry context for the collaborators (external
//! commands, vanity metadata, manifest bookkeeping, configuration) and wrap
//! the errors of the libraries we build on.
//!
//! Errors are returned to the caller as soon as they occur; nothing in the
//! library retries.

use thiserror::Error;

/// Main error type for vendor-fetch operations
#[derive(Error, Debug)]
pub enum Error {
    /// The import path does not look like `host.tld/segment[/segment...]`.
    #[error("{path:?} is not a valid import path")]
    InvalidPath { path: String },

    /// No supported version control system matched.
    ///
    /// `kind` is the unrecognised metadata kind, when there was one.
    #[error("unknown repository type for {path}{}", kind.as_ref().map(|k| format!(": {:?}", k)).unwrap_or_default())]
    UnknownBackend { path: String, kind: Option<String> },

    /// A remote repository did not answer the reachability probe.
    #[error("{backend} probe failed for {url}: {message}")]
    Probe {
        url: String,
        backend: String,
        message: String,
    },

    /// Cloning a repository, or moving a clone to a revision, failed.
    #[error("{backend} checkout of {url} failed: {message}")]
    Checkout {
        url: String,
        backend: String,
        message: String,
    },

    /// A filesystem operation on a working copy or temp directory failed.
    #[error("Filesystem operation error on {path}: {message}")]
    Filesystem { path: String, message: String },

    /// The manifest could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An external tool exited unsuccessfully or could not be started.
    #[error("command `{program} {args}` failed: {stderr}")]
    Command {
        program: String,
        args: String,
        stderr: String,
    },

    /// Vanity metadata for an import path could not be obtained.
    #[error("no vanity metadata for {path}: {message}")]
    Metadata { path: String, message: String },

    /// The manifest already has a record for this import path.
    #[error("dependency for {importpath} is already registered")]
    AlreadyRegistered { importpath: String },

    /// The manifest has no matching record.
    #[error("dependency for {importpath} does not exist")]
    DependencyNotFound { importpath: String },

    /// The `.vendor-fetch.yaml` configuration file could not be parsed.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Build a `Filesystem` error from an I/O failure on `path`.
    pub fn filesystem(path: &std::path::Path, err: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
