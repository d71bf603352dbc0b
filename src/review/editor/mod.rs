//! Interactive comment editing through the user's external editor.
//!
//! The editor runs as a blocking child process on a scratch buffer in a
//! temporary directory. Control returns once the editor exits; the directory
//! is removed when the call completes, whatever the outcome.

use std::env;
use std::fmt::Debug;
use std::io;
use std::process::Command;

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;
use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

const BUFFER_FILE_NAME: &str = "REVIEW_COMMENT.txt";
const INSTRUCTION_PREFIX: &str = "REVIEW:";
const FALLBACK_EDITOR: &str = "vi";
const EDITOR_ENV_VARS: [&str; 3] = ["GIT_EDITOR", "VISUAL", "EDITOR"];
const INSTRUCTIONS: [&str; 3] = [
    "Enter the code review comment above.",
    "These instruction lines are removed; other text is kept.",
    "Leaving the comment empty creates the review without a comment.",
];

/// Errors from an editor session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    /// The editor process could not be started.
    #[error("could not start editor '{editor}': {message}")]
    Launch {
        /// The editor command line.
        editor: String,
        /// Error detail from the operating system.
        message: String,
    },

    /// The editor exited unsuccessfully.
    #[error("editor '{editor}' exited abnormally ({status})")]
    AbnormalExit {
        /// The editor command line.
        editor: String,
        /// Exit status as reported by the operating system.
        status: String,
    },

    /// The buffer held no comment once instructions were removed.
    #[error("the comment buffer was left empty")]
    EmptyBuffer,

    /// The scratch buffer could not be prepared or read back.
    #[error("scratch buffer error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

/// Produces edited comment text from an initial buffer.
pub trait CommentEditor: Send + Sync + Debug {
    /// Lets the user edit `initial` and returns the final text.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] when the session fails or yields no text.
    fn edit(&self, initial: &str) -> Result<String, EditorError>;
}

/// Runs the user's configured editor through `sh -c`, so commands with
/// arguments (`code --wait`) work as they do for `git commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Uses `command` as the editor command line.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Picks the editor: `configured`, then `GIT_EDITOR`, `VISUAL`,
    /// `EDITOR`, then `vi`.
    #[must_use]
    pub fn from_environment(configured: Option<&str>) -> Self {
        let from_env = || {
            EDITOR_ENV_VARS
                .iter()
                .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
        };
        let command = configured
            .filter(|value| !value.trim().is_empty())
            .map(ToOwned::to_owned)
            .or_else(from_env)
            .unwrap_or_else(|| FALLBACK_EDITOR.to_owned());
        Self { command }
    }

    /// Returns the editor command line.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn run_on(&self, buffer_path: &str) -> Result<(), EditorError> {
        tracing::debug!("launching editor '{}' on {buffer_path}", self.command);
        let status = Command::new("sh")
            .arg("-c")
            .arg(format!("{} \"$@\"", self.command))
            .arg(&self.command)
            .arg(buffer_path)
            .status()
            .map_err(|error| EditorError::Launch {
                editor: self.command.clone(),
                message: error.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::AbnormalExit {
                editor: self.command.clone(),
                status: status.to_string(),
            })
        }
    }
}

impl CommentEditor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<String, EditorError> {
        let scratch = TempDir::new().map_err(|error| io_error(&error))?;
        let scratch_path = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf())
            .map_err(|_| EditorError::Io {
                message: "temporary directory path is not valid UTF-8".to_owned(),
            })?;
        let dir = Dir::open_ambient_dir(&scratch_path, ambient_authority())
            .map_err(|error| io_error(&error))?;

        dir.write(BUFFER_FILE_NAME, render_buffer(initial))
            .map_err(|error| io_error(&error))?;
        self.run_on(scratch_path.join(BUFFER_FILE_NAME).as_str())?;
        let edited = dir
            .read_to_string(BUFFER_FILE_NAME)
            .map_err(|error| io_error(&error))?;

        let comment = strip_instructions(&edited);
        if comment.is_empty() {
            return Err(EditorError::EmptyBuffer);
        }
        Ok(comment)
    }
}

/// Lays out the editor buffer: the initial text followed by instructions.
#[must_use]
pub fn render_buffer(initial: &str) -> String {
    let mut buffer = String::from(initial);
    buffer.push_str("\n\n");
    for line in instruction_lines() {
        buffer.push_str(&line);
        buffer.push('\n');
    }
    buffer
}

/// Removes the instruction lines [`render_buffer`] wrote, and surrounding
/// whitespace, from edited text.
///
/// Only exact instruction lines go; anything the user typed stays, even
/// when it starts with the instruction prefix.
#[must_use]
pub fn strip_instructions(edited: &str) -> String {
    let instructions: Vec<String> = instruction_lines().collect();
    edited
        .lines()
        .filter(|line| !instructions.iter().any(|instruction| instruction == line.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn instruction_lines() -> impl Iterator<Item = String> {
    INSTRUCTIONS
        .iter()
        .map(|line| format!("{INSTRUCTION_PREFIX} {line}"))
}

fn io_error(error: &io::Error) -> EditorError {
    EditorError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests;
