//! `CREATEFRAME`, `PUSHFRAME`, `POPFRAME`, `DEFVAR`, `MOVE`, `TYPE`: frame
//! and variable lifecycle.

use crate::arg::Arg;
use crate::context::Context;
use crate::error::{ErrorKind, IppError, RunResult};
use crate::frame::FrameKind;
use crate::value::Value;

pub fn createframe(ctx: &mut Context) {
    ctx.frames.create_frame();
}

pub fn pushframe(ctx: &mut Context) -> RunResult<()> {
    ctx.frames.push_frame()
}

pub fn popframe(ctx: &mut Context) -> RunResult<()> {
    ctx.frames.pop_frame()
}

pub fn defvar(ctx: &mut Context, target: &Arg) -> RunResult<()> {
    let Arg::Var { frame, name } = target else {
        return Err(unexpected_shape());
    };
    ctx.frames.declare(FrameKind::resolve(frame)?, name)
}

pub fn mov(ctx: &mut Context, target: &Arg, value: Value) -> RunResult<()> {
    crate::instr::write_var(ctx, target, value)
}

fn unexpected_shape() -> IppError {
    IppError::new(ErrorKind::Semantic, "expected a variable argument")
}
