//! External command execution
//!
//! Every version control operation shells out to the system `git`, `hg` or
//! `bzr` binary, so credentials, proxies and user configuration behave the
//! same as they do on the command line. All invocations are synchronous and
//! block until the tool exits; there is no timeout.
//!
//! The `CommandRunner` trait is the seam between the backends and the
//! operating system. `SystemRunner` spawns real processes, tests substitute a
//! recording double.

use std::io;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Trait for running external tools - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its captured standard output.
    ///
    /// Fails with [`Error::Command`] if the tool cannot be started or exits
    /// with a non-zero status.
    fn output(&self, program: &str, args: &[String]) -> Result<String>;

    /// Runs `program` with `args`, forwarding its output to our stderr.
    ///
    /// Used for long running commands such as clones, where the tool's
    /// progress output is more useful to the user than to us.
    fn run(&self, program: &str, args: &[String]) -> Result<()>;
}

/// The default implementation of `CommandRunner`, which spawns the tool with
/// `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[String]) -> Result<String> {
        debug!("running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_error(program, args, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(command_error(program, args, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        debug!("running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| command_error(program, args, e.to_string()))?;

        if !status.success() {
            return Err(command_error(program, args, status.to_string()));
        }
        Ok(())
    }
}

fn command_error(program: &str, args: &[String], stderr: String) -> Error {
    Error::Command {
        program: program.to_string(),
        args: args.join(" "),
        stderr,
    }
}
