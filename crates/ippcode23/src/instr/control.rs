//! `JUMP`, `JUMPIFEQ`, `JUMPIFNEQ`, `CALL`, `RETURN`, `EXIT`. `LABEL` itself
//! has no runtime effect — it is consumed entirely by the label-collection
//! pass in [`crate::driver`].

use crate::context::Context;
use crate::error::{ErrorKind, IppError, RunResult};
use crate::value::{jump_compare, Value};

pub fn jump(ctx: &mut Context, label: &str) -> RunResult<()> {
    ctx.pc = ctx.label_index(label)?;
    Ok(())
}

pub fn jumpifeq(ctx: &mut Context, label: &str, lhs: &Value, rhs: &Value) -> RunResult<()> {
    if jump_compare(lhs, rhs)? {
        jump(ctx, label)?;
    }
    Ok(())
}

pub fn jumpifneq(ctx: &mut Context, label: &str, lhs: &Value, rhs: &Value) -> RunResult<()> {
    if !jump_compare(lhs, rhs)? {
        jump(ctx, label)?;
    }
    Ok(())
}

/// `current_pc` is the index of the `CALL` instruction itself; the driver's
/// unconditional post-execute increment takes the return slot one past it,
/// landing on the instruction after `CALL` once `RETURN` restores `pc`.
pub fn call(ctx: &mut Context, label: &str, current_pc: usize) -> RunResult<()> {
    let target = ctx.label_index(label)?;
    ctx.call(current_pc, target);
    Ok(())
}

pub fn ret(ctx: &mut Context) -> RunResult<()> {
    ctx.return_to_caller()
}

/// Validates the user-chosen exit code is in `0..=49` (§4.7); anything else
/// is `OPERAND_VALUE`.
pub fn exit(value: &Value) -> RunResult<u8> {
    let code = value.as_int()?;
    u8::try_from(code)
        .ok()
        .filter(|&c| c <= 49)
        .ok_or_else(|| IppError::new(ErrorKind::OperandValue, format!("EXIT code {code} is out of range 0-49")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_accepts_range() {
        assert_eq!(exit(&Value::Int(0)).unwrap(), 0);
        assert_eq!(exit(&Value::Int(49)).unwrap(), 49);
    }

    #[test]
    fn exit_rejects_out_of_range() {
        assert_eq!(exit(&Value::Int(50)).unwrap_err().kind, ErrorKind::OperandValue);
        assert_eq!(exit(&Value::Int(-1)).unwrap_err().kind, ErrorKind::OperandValue);
    }

    #[test]
    fn jumpifeq_follows_jump_compare_strictness() {
        let mut ctx = Context::new();
        ctx.declare_label("l", 7).unwrap();
        assert!(jumpifeq(&mut ctx, "l", &Value::Nil, &Value::Int(0)).is_err());
        jumpifeq(&mut ctx, "l", &Value::Int(1), &Value::Int(1)).unwrap();
        assert_eq!(ctx.pc, 7);
    }
}
