//! An execution engine for IPPcode23, a three-address assembly-like
//! language delivered as XML: value model, frame storage, the argument and
//! opcode taxonomies, the XML loader, the instruction set, and the
//! two-pass driver that runs a loaded program to completion.
#![expect(clippy::module_name_repetitions, reason = "Opcode/ErrorKind read clearly at call sites")]

mod arg;
pub mod context;
pub mod driver;
pub mod error;
mod frame;
pub mod instr;
pub mod io;
mod opcode;
pub mod program;
mod value;

pub use crate::arg::Arg;
pub use crate::context::Context;
pub use crate::driver::{Driver, RunOutcome};
pub use crate::error::{ErrorKind, IppError, RunResult};
pub use crate::frame::{FrameKind, Frames};
pub use crate::io::{CollectIo, ProgramIo, StdIo};
pub use crate::opcode::{ArgShape, Opcode};
pub use crate::program::Program;
pub use crate::value::{Value, ValueKind};
