//! Stylesheet diagnostics.

use thiserror::Error;

/// A compile diagnostic with its 1-based source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct StyleError {
    /// What went wrong.
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in bytes from the start of the line.
    pub column: usize,
}

/// Returned by [`crate::Sheet::parse`] when compilation reported anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{first} ({count} diagnostic(s))", count = .diagnostics.len())]
pub struct SheetError {
    /// The first diagnostic reported.
    pub first: StyleError,
    /// Every diagnostic, in source order.
    pub diagnostics: Vec<StyleError>,
}

/// Receives stylesheet compile errors.
///
/// A malformed value for a known property is reported and compilation
/// continues with the next declaration. Structural errors (a missing `{`,
/// `:` or `;`, a bad selector) are reported and stop the compilation.
pub trait ErrorCallback {
    /// Called once per diagnostic.
    fn on_error(&mut self, message: &str, line: usize, column: usize);
}

impl ErrorCallback for Vec<StyleError> {
    fn on_error(&mut self, message: &str, line: usize, column: usize) {
        self.push(StyleError {
            message: message.to_string(),
            line,
            column,
        });
    }
}

/// Translate a byte offset into a 1-based `(line, column)` pair.
#[must_use]
pub fn source_location(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

/// Error sink used while compiling one sheet.
pub(crate) struct Diagnostics<'a> {
    text: &'a str,
    callback: &'a mut dyn ErrorCallback,
    had_error: bool,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(text: &'a str, callback: &'a mut dyn ErrorCallback) -> Self {
        Self {
            text,
            callback,
            had_error: false,
        }
    }

    /// Report a recoverable error at `offset`.
    pub(crate) fn report(&mut self, message: &str, offset: usize) {
        let (line, column) = source_location(self.text, offset);
        self.callback.on_error(message, line, column);
    }

    /// Report an error that ends the compilation.
    pub(crate) fn fail(&mut self, message: &str, offset: usize) {
        self.had_error = true;
        self.report(message, offset);
    }

    pub(crate) const fn had_error(&self) -> bool {
        self.had_error
    }
}
