//! `PUSHS`, `POPS`: the single data stack shared by every frame.

use crate::arg::Arg;
use crate::context::Context;
use crate::error::RunResult;
use crate::value::Value;

pub fn pushs(ctx: &mut Context, value: Value) {
    ctx.push_stack(value);
}

pub fn pops(ctx: &mut Context, target: &Arg) -> RunResult<()> {
    let value = ctx.pop_stack()?;
    crate::instr::write_var(ctx, target, value)
}
