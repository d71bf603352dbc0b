//! User-facing status lines for a finished push.
//!
//! Status goes to the output sink; warnings and errors go to the error sink
//! as `warning: ...` and `error: ...` lines so they stand apart from the
//! push's own output.

use std::io::{self, Write};

use crate::command::CommandError;
use crate::intercept::{InterceptReport, ReviewOutcome};

/// Writes status, warnings, and errors to injected sinks.
#[derive(Debug)]
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// Creates a reporter writing status to `out` and problems to `err`.
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Reports the outcome of an intercepted push.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sinks.
    pub fn report(&mut self, report: &InterceptReport) -> io::Result<()> {
        for warning in &report.warnings {
            writeln!(self.err, "warning: {warning}")?;
        }

        match &report.outcome {
            ReviewOutcome::Created(created) => {
                writeln!(self.out, "created review {}: {}", created.id(), created.url())
            }
            ReviewOutcome::NothingToReview => {
                writeln!(self.out, "nothing was pushed; no review created")
            }
            ReviewOutcome::PushFailed => writeln!(
                self.err,
                "warning: push failed (exit status {}); no review created",
                report.exit_code()
            ),
            ReviewOutcome::Abandoned(error) => {
                writeln!(self.err, "warning: review not created: {error}")
            }
            ReviewOutcome::Bypassed | ReviewOutcome::NotConfigured => Ok(()),
        }
    }

    /// Reports a failure that stopped the command before the push.
    ///
    /// Help text is not a failure and goes to the output sink.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sinks.
    pub fn command_error(&mut self, error: &CommandError) -> io::Result<()> {
        match error {
            CommandError::HelpRequested { text } => write!(self.out, "{text}"),
            other => writeln!(self.err, "error: {other}"),
        }
    }

    /// Writes a free-form note to the error sink.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying sink.
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{text}")
    }

    /// Consumes the reporter, returning both sinks.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests;
