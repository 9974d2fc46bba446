//! Frame storage: the global frame, the current temporary frame, and the
//! stack of local frames pushed/popped by `PUSHFRAME`/`POPFRAME`.

use std::collections::HashMap;

use crate::error::{ErrorKind, IppError, RunResult};
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Global,
    Temporary,
    Local,
}

impl FrameKind {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "GF" => Some(Self::Global),
            "TF" => Some(Self::Temporary),
            "LF" => Some(Self::Local),
            _ => None,
        }
    }

    /// Resolves a raw `var` argument's frame tag at the point of use. Per
    /// §4.1 the loader deliberately leaves an unrecognized frame tag
    /// unchecked so it surfaces here as `NONEXISTS_FRAME` rather than the
    /// load-time `BAD_XML` a stricter parse would raise.
    pub fn resolve(text: &str) -> RunResult<Self> {
        Self::parse(text)
            .ok_or_else(|| IppError::new(ErrorKind::NonexistsFrame, format!("unknown frame '{text}'")))
    }

    fn label(self) -> &'static str {
        match self {
            Self::Global => "GF",
            Self::Temporary => "TF",
            Self::Local => "LF",
        }
    }
}

/// A single frame: a name-to-value map. Declaration order doesn't matter to
/// any opcode, so a plain `HashMap` (rather than the ancestor's `indexmap`,
/// which exists there for Python's order-preserving `dict`) is sufficient.
type FrameVars = HashMap<String, Value>;

/// The three-frame storage model of §3.2: one global frame for the program's
/// lifetime, at most one temporary frame awaiting `PUSHFRAME`, and a stack of
/// local frames.
#[derive(Debug, Default)]
pub struct Frames {
    global: FrameVars,
    temporary: Option<FrameVars>,
    locals: Vec<FrameVars>,
}

impl Frames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_frame(&mut self) {
        self.temporary = Some(FrameVars::new());
    }

    pub fn push_frame(&mut self) -> RunResult<()> {
        let frame = self.temporary.take().ok_or_else(|| {
            IppError::new(ErrorKind::NonexistsFrame, "PUSHFRAME with no temporary frame defined")
        })?;
        self.locals.push(frame);
        Ok(())
    }

    pub fn pop_frame(&mut self) -> RunResult<()> {
        let frame = self.locals.pop().ok_or_else(|| {
            IppError::new(ErrorKind::NonexistsFrame, "POPFRAME with no local frame on the stack")
        })?;
        self.temporary = Some(frame);
        Ok(())
    }

    fn frame_mut(&mut self, kind: FrameKind) -> RunResult<&mut FrameVars> {
        match kind {
            FrameKind::Global => Ok(&mut self.global),
            FrameKind::Temporary => self.temporary.as_mut().ok_or_else(|| {
                IppError::new(ErrorKind::NonexistsFrame, "access to undefined temporary frame (TF)")
            }),
            FrameKind::Local => self.locals.last_mut().ok_or_else(|| {
                IppError::new(ErrorKind::NonexistsFrame, "access to local frame (LF) with no frame pushed")
            }),
        }
    }

    fn frame(&self, kind: FrameKind) -> RunResult<&FrameVars> {
        match kind {
            FrameKind::Global => Ok(&self.global),
            FrameKind::Temporary => self.temporary.as_ref().ok_or_else(|| {
                IppError::new(ErrorKind::NonexistsFrame, "access to undefined temporary frame (TF)")
            }),
            FrameKind::Local => self.locals.last().ok_or_else(|| {
                IppError::new(ErrorKind::NonexistsFrame, "access to local frame (LF) with no frame pushed")
            }),
        }
    }

    /// `DEFVAR`: introduces `name` in `kind`'s frame as `Uninit`. Redeclaring
    /// an already-declared variable in the same frame is a semantic error.
    pub fn declare(&mut self, kind: FrameKind, name: &str) -> RunResult<()> {
        let frame = self.frame_mut(kind)?;
        if frame.contains_key(name) {
            return Err(IppError::new(
                ErrorKind::Semantic,
                format!("variable {}@{name} already declared in this frame", kind.label()),
            ));
        }
        frame.insert(name.to_string(), Value::Uninit);
        Ok(())
    }

    fn lookup(&self, kind: FrameKind, name: &str) -> RunResult<&Value> {
        let frame = self.frame(kind)?;
        frame.get(name).ok_or_else(|| {
            IppError::new(ErrorKind::NonexistsVar, format!("variable {}@{name} is not declared", kind.label()))
        })
    }

    /// Reads a variable's value, erroring if it was declared but never
    /// assigned (`UNINITIALIZED_VAR`).
    pub fn read(&self, kind: FrameKind, name: &str) -> RunResult<&Value> {
        let value = self.lookup(kind, name)?;
        if matches!(value, Value::Uninit) {
            return Err(IppError::new(
                ErrorKind::UninitializedVar,
                format!("variable {}@{name} read before being assigned a value", kind.label()),
            ));
        }
        Ok(value)
    }

    /// The declared type of a variable without requiring it be initialized —
    /// used by `TYPE`, which reports `""` for an uninitialized variable rather
    /// than erroring.
    pub fn peek_kind(&self, kind: FrameKind, name: &str) -> RunResult<Option<ValueKind>> {
        Ok(self.lookup(kind, name)?.kind())
    }

    pub fn write(&mut self, kind: FrameKind, name: &str, value: Value) -> RunResult<()> {
        let frame = self.frame_mut(kind)?;
        let slot = frame.get_mut(name).ok_or_else(|| {
            IppError::new(ErrorKind::NonexistsVar, format!("variable {}@{name} is not declared", kind.label()))
        })?;
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_read_write_roundtrip() {
        let mut frames = Frames::new();
        frames.declare(FrameKind::Global, "x").unwrap();
        assert!(frames.read(FrameKind::Global, "x").is_err());
        frames.write(FrameKind::Global, "x", Value::Int(42)).unwrap();
        assert_eq!(frames.read(FrameKind::Global, "x").unwrap(), &Value::Int(42));
    }

    #[test]
    fn redeclare_is_semantic_error() {
        let mut frames = Frames::new();
        frames.declare(FrameKind::Global, "x").unwrap();
        let err = frames.declare(FrameKind::Global, "x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn temporary_frame_lifecycle() {
        let mut frames = Frames::new();
        assert_eq!(frames.declare(FrameKind::Temporary, "x").unwrap_err().kind, ErrorKind::NonexistsFrame);
        frames.create_frame();
        frames.declare(FrameKind::Temporary, "x").unwrap();
        frames.push_frame().unwrap();
        assert_eq!(frames.declare(FrameKind::Temporary, "y").unwrap_err().kind, ErrorKind::NonexistsFrame);
        frames.write(FrameKind::Local, "x", Value::Bool(true)).unwrap();
        frames.pop_frame().unwrap();
        assert_eq!(frames.read(FrameKind::Temporary, "x").unwrap(), &Value::Bool(true));
        assert_eq!(frames.pop_frame().unwrap_err().kind, ErrorKind::NonexistsFrame);
    }
}
