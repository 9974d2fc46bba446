//! The typed runtime value every IPPcode23 variable and literal holds.
//!
//! `Value` is a small tagged union rather than a trait object: the language has
//! exactly five types and no user-defined ones, so a closed enum keeps every
//! opcode's type-checking a plain `match` instead of a dynamic dispatch.

use std::fmt;

use crate::error::{ErrorKind, IppError, RunResult};

/// A runtime value. Corresponds to the source's `VariableData`.
///
/// Strings are code-point sequences, not byte sequences: `GETCHAR`, `STRI2INT`,
/// `SETCHAR`, and `STRLEN` all index and measure by Unicode scalar value, so this
/// stores a plain `String` and indexes through `.chars()` rather than raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Nil,
    /// Sentinel for a declared-but-unassigned variable. Never constructed from a
    /// literal; only `Frames::declare` produces it, and every read path rejects it
    /// with `UNINITIALIZED_VAR` before a `Value` carrying this variant can escape
    /// to an opcode's computation.
    Uninit,
}

/// The four literal/declared types a `type` XML argument or `READ`'s target type
/// can name. Deliberately excludes `Uninit`, which is a runtime state, not a
/// literal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Str,
    Bool,
    Nil,
}

impl ValueKind {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "int" => Some(Self::Int),
            "string" => Some(Self::Str),
            "bool" => Some(Self::Bool),
            "nil" => Some(Self::Nil),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Nil => "nil",
        }
    }
}

impl Value {
    /// The type name `TYPE` writes out, or `""` for an uninitialized variable.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Nil => "nil",
            Self::Uninit => "",
        }
    }

    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Int(_) => Some(ValueKind::Int),
            Self::Str(_) => Some(ValueKind::Str),
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Nil => Some(ValueKind::Nil),
            Self::Uninit => None,
        }
    }

    pub fn as_int(&self) -> RunResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(operand_type_error(other, "int")),
        }
    }

    pub fn as_bool(&self) -> RunResult<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(operand_type_error(other, "bool")),
        }
    }

    pub fn as_str(&self) -> RunResult<&str> {
        match self {
            Self::Str(v) => Ok(v),
            other => Err(operand_type_error(other, "string")),
        }
    }

    pub fn into_string(self) -> RunResult<String> {
        match self {
            Self::Str(v) => Ok(v),
            other => Err(operand_type_error(&other, "string")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            Self::Nil => write!(f, "nil"),
            Self::Uninit => write!(f, "<uninitialized>"),
        }
    }
}

fn operand_type_error(got: &Value, expected: &str) -> IppError {
    IppError::new(
        ErrorKind::OperandType,
        format!("expected operand of type {expected}, got {} ({got})", got.type_name()),
    )
}

/// Ordering/equality rule shared by `LT` and `GT`: operands must share one of
/// `{INT, BOOL, STRING}` — `NIL` is never orderable.
pub fn rel_compare_lt(lhs: &Value, rhs: &Value) -> RunResult<bool> {
    compare_ordered(lhs, rhs).map(|ord| ord.is_lt())
}

pub fn rel_compare_gt(lhs: &Value, rhs: &Value) -> RunResult<bool> {
    compare_ordered(lhs, rhs).map(|ord| ord.is_gt())
}

fn compare_ordered(lhs: &Value, rhs: &Value) -> RunResult<std::cmp::Ordering> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => Err(IppError::new(
            ErrorKind::OperandType,
            format!(
                "LT/GT require matching int/bool/string operands, got {} and {}",
                lhs.type_name(),
                rhs.type_name()
            ),
        )),
    }
}

/// `EQ`'s comparison rule (§4.4): operands must share a type, or either may be
/// `NIL` — in which case the result is `false` rather than an error (the
/// "EQ-NIL law" of §8: `EQ r, nil, x` is `true` iff `x` is also `NIL`).
///
/// Distinct from [`jump_compare`], which has no such carve-out.
pub fn eq_compare(lhs: &Value, rhs: &Value) -> bool {
    lhs == rhs
}

/// `JUMPIFEQ`/`JUMPIFNEQ`'s comparison rule (§4.6): operand types must be
/// *identical* among `{INT, BOOL, STRING, NIL}`; mismatched types always error,
/// even when one side is `NIL` (unlike [`eq_compare`]).
pub fn jump_compare(lhs: &Value, rhs: &Value) -> RunResult<bool> {
    let same_type = matches!(
        (lhs, rhs),
        (Value::Int(_), Value::Int(_))
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Str(_), Value::Str(_))
            | (Value::Nil, Value::Nil)
    );
    if !same_type {
        return Err(IppError::new(
            ErrorKind::OperandType,
            format!(
                "JUMPIFEQ/JUMPIFNEQ require operands of identical type, got {} and {}",
                lhs.type_name(),
                rhs.type_name()
            ),
        ));
    }
    Ok(lhs == rhs)
}
