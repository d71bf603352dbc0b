//! Deterministic editor stub for unit and behavioural tests.

use std::sync::{Mutex, PoisonError};

use super::{CommentEditor, EditorError};

/// Editor stub that records the buffers it was given.
#[derive(Debug)]
pub struct StubEditor {
    response: Result<String, EditorError>,
    seen: Mutex<Vec<String>>,
}

impl StubEditor {
    /// Creates a stub whose user always saves `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Creates a stub whose sessions always fail with `error`.
    #[must_use]
    pub const fn failing(error: EditorError) -> Self {
        Self {
            response: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Returns every initial buffer passed to the editor.
    #[must_use]
    pub fn seen(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CommentEditor for StubEditor {
    fn edit(&self, initial: &str) -> Result<String, EditorError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(initial.to_owned());
        self.response.clone()
    }
}
