//! The two-pass execution driver (§3.4): first a label-collection pass over
//! the whole instruction list, then a run pass that executes from the
//! first instruction, unconditionally advancing the program counter by one
//! after every instruction (jumps land by setting `pc` directly; the
//! increment then carries it past whatever `LABEL` it targeted).

use crate::context::Context;
use crate::error::RunResult;
use crate::instr::Effect;
use crate::io::ProgramIo;
use crate::opcode::Opcode;
use crate::program::Program;

/// How a run ended: the instruction list was exhausted, or the program
/// executed `EXIT` with a code in `0..=49`. Neither is an `IppError` — see
/// §11.
pub enum RunOutcome {
    Completed,
    Exit(u8),
}

pub struct Driver {
    program: Program,
}

impl Driver {
    pub fn new(program: Program) -> Self {
        Self { program }
    }

    pub fn run(&self, io: &mut dyn ProgramIo) -> RunResult<RunOutcome> {
        let mut ctx = Context::new();
        self.collect_labels(&mut ctx)?;

        while ctx.pc < self.program.instructions.len() {
            let pc = ctx.pc;
            let instruction = &self.program.instructions[pc];
            match instruction.execute(&mut ctx, io, pc)? {
                Effect::Continue => {}
                Effect::Exit(code) => return Ok(RunOutcome::Exit(code)),
            }
            ctx.pc += 1;
        }

        Ok(RunOutcome::Completed)
    }

    fn collect_labels(&self, ctx: &mut Context) -> RunResult<()> {
        for (index, instruction) in self.program.instructions.iter().enumerate() {
            if instruction.opcode == Opcode::LABEL {
                let name = match &instruction.args[0] {
                    crate::arg::Arg::Label(name) => name,
                    _ => unreachable!("LABEL's sole argument is always a label after load-time validation"),
                };
                ctx.declare_label(name, index)?;
            }
        }
        Ok(())
    }
}
