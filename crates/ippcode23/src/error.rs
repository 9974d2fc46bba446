//! The runtime error taxonomy and its process exit codes.
//!
//! One variant per exit code named in the spec, excluding `OK` (the absence of
//! an error) and the user-chosen `EXIT` code (which is not an error at all —
//! see [`crate::driver::RunOutcome`]).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[repr(u8)]
pub enum ErrorKind {
    #[strum(serialize = "missing or invalid command-line arguments")]
    CmdArgs = 10,
    #[strum(serialize = "cannot open input file")]
    OpenInputFile = 11,
    #[strum(serialize = "malformed XML input")]
    FormatXml = 31,
    #[strum(serialize = "unexpected XML structure")]
    BadXml = 32,
    #[strum(serialize = "other semantic error in the source code")]
    Semantic = 52,
    #[strum(serialize = "wrong operand type")]
    OperandType = 53,
    #[strum(serialize = "access to a nonexistent variable")]
    NonexistsVar = 54,
    #[strum(serialize = "frame does not exist")]
    NonexistsFrame = 55,
    #[strum(serialize = "access to an uninitialized variable")]
    UninitializedVar = 56,
    #[strum(serialize = "wrong operand value")]
    OperandValue = 57,
    #[strum(serialize = "bad string manipulation")]
    BadStringManipulation = 58,
}

impl ErrorKind {
    /// The process exit code this error maps to, per §6.2.
    pub fn exit_code(self) -> u8 {
        self as u8
    }
}

/// A runtime error: a fixed [`ErrorKind`] plus a free-form diagnostic message.
#[derive(Debug, Clone)]
pub struct IppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl IppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for IppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {} ({})", self.kind.exit_code(), self.message, self.kind)
    }
}

impl std::error::Error for IppError {}

pub type RunResult<T> = Result<T, IppError>;
