//! Recording `CommandRunner` double shared by the unit tests.
//!
//! Clones are simulated by creating the destination directory with a few
//! files, so working copy lifecycle tests exercise the real filesystem
//! helpers without spawning `git`, `hg` or `bzr`.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::process::CommandRunner;

pub const GIT_REVISION: &str = "1f0c3b4e5d6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c";
pub const HG_REVISION: &str = "9a8b7c6d5e4f";

#[derive(Default)]
pub struct MockRunner {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    unreachable: Vec<String>,
    fail_clone: bool,
    fail_update: bool,
    files: Vec<(String, String)>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            files: vec![("README.md".to_string(), "readme".to_string())],
            ..Self::default()
        }
    }

    /// Probes run through `program` report the remote as missing.
    pub fn unreachable(mut self, program: &str) -> Self {
        self.unreachable.push(program.to_string());
        self
    }

    /// Clones write a partial tree and then fail.
    pub fn failing_clone(mut self) -> Self {
        self.fail_clone = true;
        self
    }

    /// Moving a clone to a revision fails.
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Adds a file every simulated clone contains.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose first argument is `subcommand`.
    pub fn calls_to(&self, subcommand: &str) -> Vec<(String, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter(|(_, args)| args.first().map(String::as_str) == Some(subcommand))
            .collect()
    }

    fn fail(program: &str, args: &[String], stderr: &str) -> Error {
        Error::Command {
            program: program.to_string(),
            args: args.join(" "),
            stderr: stderr.to_string(),
        }
    }

    fn clone_into(&self, program: &str, args: &[String]) -> Result<()> {
        let dest = match args.first().map(String::as_str) {
            Some("clone") => args.get(2),
            _ => args.last(),
        }
        .map(PathBuf::from)
        .expect("clone destination");

        fs::create_dir_all(dest.join(format!(".{}", program)))?;
        if self.fail_clone {
            fs::write(dest.join("partial"), b"half a clone")?;
            return Err(Self::fail(program, args, "fatal: early EOF"));
        }
        for (path, content) in &self.files {
            let target = dest.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, content)?;
        }
        Ok(())
    }
}

impl CommandRunner for MockRunner {
    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        let first = args.first().map(String::as_str).unwrap_or_default();
        if matches!(first, "ls-remote" | "identify" | "info")
            && self.unreachable.iter().any(|p| p == program)
        {
            return Err(Self::fail(program, args, "repository not found"));
        }

        let out = match (program, args) {
            ("git", a) if a.iter().any(|s| s == "--abbrev-ref") => "main",
            ("git", a) if a.iter().any(|s| s == "rev-parse") => GIT_REVISION,
            ("hg", a) if a.get(2).map(String::as_str) == Some("id") => HG_REVISION,
            ("hg", a) if a.get(2).map(String::as_str) == Some("branch") => "default",
            _ => return Ok(String::new()),
        };
        Ok(format!("{}\n", out))
    }

    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        let is_update = args.iter().any(|s| s == "checkout" || s == "update");
        match args.first().map(String::as_str) {
            Some("clone") | Some("branch") => self.clone_into(program, args),
            _ if is_update && self.fail_update => {
                Err(Self::fail(program, args, "unknown revision"))
            }
            _ => Ok(()),
        }
    }
}
