//! The instruction set: one `Instruction` per parsed `<instruction>` element,
//! dispatching to a per-family module that mirrors the opcode groupings of
//! §4 (arithmetic, relational, string manipulation, frame/variable
//! lifecycle, the data stack, control flow, and I/O).

pub mod arith;
pub mod control;
pub mod frame_ops;
pub mod io_ops;
pub mod relational;
pub mod stack_ops;
pub mod strings;

use smallvec::SmallVec;

use crate::arg::Arg;
use crate::context::Context;
use crate::error::{ErrorKind, IppError, RunResult};
use crate::frame::FrameKind;
use crate::io::ProgramIo;
use crate::opcode::Opcode;
use crate::value::Value;

/// One decoded instruction: its opcode plus its resolved argument list, in
/// XML `argN` order. Three is the largest arity any opcode uses, so a
/// `SmallVec` avoids a heap allocation per instruction.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub args: SmallVec<[Arg; 3]>,
}

/// What happened after running one instruction: either fall through to the
/// driver's unconditional `pc += 1`, or the program chose to stop.
pub enum Effect {
    Continue,
    Exit(u8),
}

impl Instruction {
    /// `pc` is this instruction's own index, needed by `CALL` to know what
    /// to restore on the matching `RETURN`.
    pub fn execute(&self, ctx: &mut Context, io: &mut dyn ProgramIo, pc: usize) -> RunResult<Effect> {
        use Opcode::{
            ADD, AND, CALL, CONCAT, CREATEFRAME, DEFVAR, DPRINT, EQ, EXIT, GETCHAR, GT, IDIV, INT2CHAR, JUMP,
            JUMPIFEQ, JUMPIFNEQ, LABEL, LT, MOVE, MUL, NOT, OR, POPFRAME, POPS, PUSHFRAME, PUSHS, READ, RETURN,
            SETCHAR, STRI2INT, STRLEN, SUB, TYPE, WRITE,
        };

        match self.opcode {
            CREATEFRAME => frame_ops::createframe(ctx),
            PUSHFRAME => frame_ops::pushframe(ctx)?,
            POPFRAME => frame_ops::popframe(ctx)?,
            DEFVAR => frame_ops::defvar(ctx, &self.args[0])?,
            MOVE => {
                let value = resolve_symb(ctx, &self.args[1])?;
                frame_ops::mov(ctx, &self.args[0], value)?;
            }
            TYPE => {
                let value = peek_symb(ctx, &self.args[1])?;
                frame_ops::mov(ctx, &self.args[0], value)?;
            }
            ADD | SUB | MUL | IDIV | LT | GT | EQ | AND | OR | CONCAT | GETCHAR | STRI2INT => {
                let lhs = resolve_symb(ctx, &self.args[1])?;
                let rhs = resolve_symb(ctx, &self.args[2])?;
                let result = binary_op(self.opcode, &lhs, &rhs)?;
                frame_ops::mov(ctx, &self.args[0], result)?;
            }
            SETCHAR => {
                // Read order matches `Ins_SETCHAR.execute`: index and source
                // operands are resolved before the target, so an invalid
                // target can't preempt an error on either of them.
                let index = resolve_symb(ctx, &self.args[1])?;
                let src = resolve_symb(ctx, &self.args[2])?;
                let current = read_var(ctx, &self.args[0])?;
                let result = strings::setchar(&current, &index, &src)?;
                frame_ops::mov(ctx, &self.args[0], result)?;
            }
            NOT | INT2CHAR | STRLEN => {
                let value = resolve_symb(ctx, &self.args[1])?;
                let result = unary_op(self.opcode, &value)?;
                frame_ops::mov(ctx, &self.args[0], result)?;
            }
            LABEL => {}
            JUMP => {
                let label = label_of(&self.args[0])?;
                control::jump(ctx, label)?;
            }
            JUMPIFEQ | JUMPIFNEQ => {
                let label = label_of(&self.args[0])?;
                let lhs = resolve_symb(ctx, &self.args[1])?;
                let rhs = resolve_symb(ctx, &self.args[2])?;
                if self.opcode == JUMPIFEQ {
                    control::jumpifeq(ctx, label, &lhs, &rhs)?;
                } else {
                    control::jumpifneq(ctx, label, &lhs, &rhs)?;
                }
            }
            CALL => {
                let label = label_of(&self.args[0])?;
                control::call(ctx, label, pc)?;
            }
            RETURN => control::ret(ctx)?,
            PUSHS => {
                let value = resolve_symb(ctx, &self.args[0])?;
                stack_ops::pushs(ctx, value);
            }
            POPS => stack_ops::pops(ctx, &self.args[0])?,
            WRITE => io_ops::write(ctx, io, &self.args[0])?,
            DPRINT => io_ops::dprint(ctx, io, &self.args[0])?,
            READ => {
                let kind = type_tag_of(&self.args[1])?;
                io_ops::read(ctx, io, &self.args[0], kind)?;
            }
            EXIT => {
                let value = resolve_symb(ctx, &self.args[0])?;
                return Ok(Effect::Exit(control::exit(&value)?));
            }
        }
        Ok(Effect::Continue)
    }
}

fn binary_op(opcode: Opcode, lhs: &Value, rhs: &Value) -> RunResult<Value> {
    use Opcode::{ADD, AND, CONCAT, EQ, GETCHAR, GT, IDIV, LT, MUL, OR, STRI2INT, SUB};
    match opcode {
        ADD => arith::add(lhs, rhs),
        SUB => arith::sub(lhs, rhs),
        MUL => arith::mul(lhs, rhs),
        IDIV => arith::idiv(lhs, rhs),
        LT => relational::lt(lhs, rhs),
        GT => relational::gt(lhs, rhs),
        EQ => relational::eq(lhs, rhs),
        AND => arith::and(lhs, rhs),
        OR => arith::or(lhs, rhs),
        CONCAT => strings::concat(lhs, rhs),
        GETCHAR => strings::getchar(lhs, rhs),
        STRI2INT => strings::stri2int(lhs, rhs),
        _ => unreachable!("binary_op called with non-binary opcode {opcode}"),
    }
}

fn unary_op(opcode: Opcode, value: &Value) -> RunResult<Value> {
    use Opcode::{INT2CHAR, NOT, STRLEN};
    match opcode {
        NOT => arith::not(value),
        INT2CHAR => strings::int2char(value),
        STRLEN => strings::strlen(value),
        _ => unreachable!("unary_op called with non-unary opcode {opcode}"),
    }
}

fn label_of(arg: &Arg) -> RunResult<&str> {
    match arg {
        Arg::Label(name) => Ok(name),
        _ => Err(shape_error("label")),
    }
}

fn type_tag_of(arg: &Arg) -> RunResult<crate::value::ValueKind> {
    match arg {
        Arg::Type(kind) => Ok(*kind),
        _ => Err(shape_error("type")),
    }
}

fn shape_error(expected: &str) -> IppError {
    IppError::new(ErrorKind::Semantic, format!("expected a {expected} argument"))
}

/// Resolves a `Symb` argument (variable or literal) to its current value,
/// erroring on an uninitialized variable read.
pub fn resolve_symb(ctx: &Context, arg: &Arg) -> RunResult<Value> {
    match arg {
        Arg::Literal(v) => Ok(v.clone()),
        Arg::Var { frame, name } => ctx.frames.read(FrameKind::resolve(frame)?, name).cloned(),
        _ => Err(shape_error("variable or constant")),
    }
}

/// Like [`resolve_symb`] but for `TYPE`'s target, which must not error on an
/// uninitialized variable — it reports the empty string instead.
fn peek_symb(ctx: &Context, arg: &Arg) -> RunResult<Value> {
    match arg {
        Arg::Literal(v) => Ok(strings::type_name(v)),
        Arg::Var { frame, name } => {
            let kind = ctx.frames.peek_kind(FrameKind::resolve(frame)?, name)?;
            Ok(Value::Str(kind.map_or_else(String::new, |k| k.name().to_string())))
        }
        _ => Err(shape_error("variable or constant")),
    }
}

fn read_var(ctx: &Context, arg: &Arg) -> RunResult<Value> {
    match arg {
        Arg::Var { frame, name } => ctx.frames.read(FrameKind::resolve(frame)?, name).cloned(),
        _ => Err(shape_error("variable")),
    }
}

/// Writes to a `Var` argument's slot, used by every opcode whose first
/// operand is its destination.
pub fn write_var(ctx: &mut Context, arg: &Arg, value: Value) -> RunResult<()> {
    match arg {
        Arg::Var { frame, name } => ctx.frames.write(FrameKind::resolve(frame)?, name, value),
        _ => Err(shape_error("variable")),
    }
}
