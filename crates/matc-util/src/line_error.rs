use std::fmt;

/// An error tagged with the source line it was raised on.
///
/// Every phase surfaces failures in this shape so the driver can print the
/// original compiler's `Error (Line N): <message>` form without knowing which
/// phase produced the error.
#[derive(Debug, Clone)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

impl LineError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error (Line {}): {}", self.line, self.message)
    }
}

impl std::error::Error for LineError {}
