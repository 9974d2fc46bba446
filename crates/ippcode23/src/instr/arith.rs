//! `ADD`, `SUB`, `MUL`, `IDIV`, and the boolean operators `AND`/`OR`/`NOT`.

use crate::error::{ErrorKind, IppError};
use crate::value::Value;

/// 64-bit wrapping arithmetic; see §15 for why overflow wraps rather than
/// erroring or panicking.
pub fn add(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    Ok(Value::Int(lhs.as_int()?.wrapping_add(rhs.as_int()?)))
}

pub fn sub(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    Ok(Value::Int(lhs.as_int()?.wrapping_sub(rhs.as_int()?)))
}

pub fn mul(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    Ok(Value::Int(lhs.as_int()?.wrapping_mul(rhs.as_int()?)))
}

/// Truncating integer division, matching Python's `int(a / b)` for the
/// integer domain (Rust's `/` already truncates toward zero). Division by
/// zero is `OPERAND_VALUE`, per §4.2.
pub fn idiv(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    let a = lhs.as_int()?;
    let b = rhs.as_int()?;
    a.checked_div(b)
        .map(Value::Int)
        .ok_or_else(|| IppError::new(ErrorKind::OperandValue, "IDIV by zero"))
}

/// Strict in both operands: both sides are type-checked before the result is
/// computed, so a non-`BOOL` right-hand side still raises `OPERAND_TYPE` even
/// when the left-hand side is `false` (no short-circuit, per §4.4).
pub fn and(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    let a = lhs.as_bool()?;
    let b = rhs.as_bool()?;
    Ok(Value::Bool(a && b))
}

pub fn or(lhs: &Value, rhs: &Value) -> crate::error::RunResult<Value> {
    let a = lhs.as_bool()?;
    let b = rhs.as_bool()?;
    Ok(Value::Bool(a || b))
}

pub fn not(value: &Value) -> crate::error::RunResult<Value> {
    Ok(Value::Bool(!value.as_bool()?))
}
