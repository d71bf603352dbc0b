//! Push operation backed by the `git` executable.

use std::path::PathBuf;
use std::process::Command;

use super::PushOperation;
use super::error::VcsError;
use super::types::PushStatus;

const DEFAULT_GIT_PROGRAM: &str = "git";

/// Runs `git push` with the caller's arguments, inheriting the terminal.
///
/// Delegating to the real executable keeps every native push flag,
/// credential helper and hook working unmodified.
#[derive(Debug, Clone)]
pub struct GitCliPush {
    program: String,
    workdir: Option<PathBuf>,
}

impl Default for GitCliPush {
    fn default() -> Self {
        Self {
            program: DEFAULT_GIT_PROGRAM.to_owned(),
            workdir: None,
        }
    }
}

impl GitCliPush {
    /// Runs the push from the given directory instead of the current one.
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    /// Replaces the executable invoked as `<program> push ...`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl PushOperation for GitCliPush {
    fn push(&self, args: &[String]) -> Result<PushStatus, VcsError> {
        let mut command = Command::new(&self.program);
        command.arg("push").args(args);
        if let Some(workdir) = &self.workdir {
            command.current_dir(workdir);
        }

        tracing::debug!("running {} push {}", self.program, args.join(" "));
        let status = command.status().map_err(|error| VcsError::PushLaunch {
            message: error.to_string(),
        })?;

        if status.success() {
            Ok(PushStatus::Succeeded)
        } else {
            Ok(PushStatus::Failed {
                code: status.code().unwrap_or(1),
            })
        }
    }
}
