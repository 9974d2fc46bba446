//! `LT`, `GT`, `EQ`: value comparison opcodes. `JUMPIFEQ`/`JUMPIFNEQ` live in
//! [`crate::instr::control`] since they fold comparison and branching into
//! one opcode, but reuse [`crate::value::jump_compare`].

use crate::error::RunResult;
use crate::value::{eq_compare, rel_compare_gt, rel_compare_lt, Value};

pub fn lt(lhs: &Value, rhs: &Value) -> RunResult<Value> {
    Ok(Value::Bool(rel_compare_lt(lhs, rhs)?))
}

pub fn gt(lhs: &Value, rhs: &Value) -> RunResult<Value> {
    Ok(Value::Bool(rel_compare_gt(lhs, rhs)?))
}

pub fn eq(lhs: &Value, rhs: &Value) -> RunResult<Value> {
    Ok(Value::Bool(eq_compare(lhs, rhs)))
}
