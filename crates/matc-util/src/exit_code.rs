/// Process exit codes for `matlangc`.
///
/// The original compiler returned negative values from `main`; a process exit
/// status is an unsigned byte on every platform this driver targets, so the
/// taxonomy is kept and the sign is dropped. The original's `-2` ("missing
/// `-o` argument") slot has no variant here: this driver's `-o` always has a
/// default (`SOURCE` with its extension swapped for `.c`), so there is no
/// distinct "missing `-o`" condition to report — a bare `-o` with no value
/// following it is just `BadUsage`, like any other malformed argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    BadUsage = 1,
    CannotOpenPreprocessed = 3,
    LexOrParseError = 4,
    SemanticError = 5,
    CodeGenError = 7,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
