//! Mutable execution state threaded through every instruction: frames, the
//! data stack, the label table, the single-slot call/return register, and
//! the program counter.

use std::collections::HashMap;

use crate::error::{ErrorKind, IppError, RunResult};
use crate::frame::Frames;
use crate::value::Value;

/// Everything an instruction can read or mutate while executing. One
/// `Context` lives for the whole run of a program.
pub struct Context {
    pub frames: Frames,
    stack: Vec<Value>,
    labels: HashMap<String, usize>,
    /// Single register holding the instruction index to return to, per
    /// §15's note that `CALL`/`RETURN` use one slot rather than a stack —
    /// a nested `CALL` silently overwrites whatever `RETURN` would have
    /// used, matching the original reference implementation.
    call_slot: Option<usize>,
    pub pc: usize,
}

impl Context {
    pub fn new() -> Self {
        Self { frames: Frames::new(), stack: Vec::new(), labels: HashMap::new(), call_slot: None, pc: 0 }
    }

    /// Records a label's instruction index during the label-collection pass.
    /// A label name used twice is a semantic error (§4.1).
    pub fn declare_label(&mut self, name: &str, index: usize) -> RunResult<()> {
        if self.labels.insert(name.to_string(), index).is_some() {
            return Err(IppError::new(ErrorKind::Semantic, format!("label '{name}' redefined")));
        }
        Ok(())
    }

    pub fn label_index(&self, name: &str) -> RunResult<usize> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| IppError::new(ErrorKind::Semantic, format!("jump to undefined label '{name}'")))
    }

    pub fn call(&mut self, return_index: usize, target_index: usize) {
        self.call_slot = Some(return_index);
        self.pc = target_index;
    }

    pub fn return_to_caller(&mut self) -> RunResult<()> {
        let index = self
            .call_slot
            .take()
            .ok_or_else(|| IppError::new(ErrorKind::UninitializedVar, "RETURN with no preceding CALL"))?;
        self.pc = index;
        Ok(())
    }

    pub fn push_stack(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Popping an empty data stack is `UNINITIALIZED_VAR`, not `SEMANTIC`,
    /// per §3.3/§6.2 ("pop empty data stack" is explicitly one of the three
    /// conditions exit code 56 covers, alongside an uninitialized read and a
    /// `RETURN` with an empty call slot).
    pub fn pop_stack(&mut self) -> RunResult<Value> {
        self.stack
            .pop()
            .ok_or_else(|| IppError::new(ErrorKind::UninitializedVar, "POPS/arithmetic on an empty data stack"))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
