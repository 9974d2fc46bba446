//! The closed opcode taxonomy and each opcode's expected argument shape,
//! used by the loader to validate arity and kind before the program runs.

use std::str::FromStr;

use crate::error::{ErrorKind, IppError, RunResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
pub enum Opcode {
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    MOVE,
    ADD,
    SUB,
    MUL,
    IDIV,
    LT,
    GT,
    EQ,
    AND,
    OR,
    NOT,
    INT2CHAR,
    STRI2INT,
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,
    TYPE,
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    CALL,
    RETURN,
    PUSHS,
    POPS,
    WRITE,
    DPRINT,
    READ,
    EXIT,
}

impl Opcode {
    /// Opcode text in the XML is case-insensitive (the original uppercases
    /// it before dictionary lookup); this mirrors that by uppercasing before
    /// `FromStr`.
    pub fn parse(text: &str) -> RunResult<Self> {
        Self::from_str(&text.to_ascii_uppercase())
            .map_err(|_| IppError::new(ErrorKind::BadXml, format!("unknown opcode '{text}'")))
    }

    /// The argument shapes this opcode's `arg1..argN` tags must have, in
    /// order. Used by the loader to reject arity/kind mismatches before the
    /// program ever runs (a `Semantic` error, per §6.2's "this includes
    /// defined but unexpected label, attempted redefinition of a variable,
    /// etc." bucket for non-XML-format source errors caught before run time).
    pub fn arg_shapes(self) -> &'static [ArgShape] {
        use ArgShape::{Label, Symb, TypeTag, Var};
        match self {
            Self::CREATEFRAME | Self::PUSHFRAME | Self::POPFRAME | Self::RETURN => &[],
            Self::DEFVAR | Self::POPS => &[Var],
            Self::MOVE | Self::NOT | Self::INT2CHAR | Self::STRLEN | Self::TYPE => &[Var, Symb],
            Self::ADD
            | Self::SUB
            | Self::MUL
            | Self::IDIV
            | Self::LT
            | Self::GT
            | Self::EQ
            | Self::AND
            | Self::OR
            | Self::STRI2INT
            | Self::CONCAT
            | Self::GETCHAR
            | Self::SETCHAR => &[Var, Symb, Symb],
            Self::LABEL | Self::JUMP | Self::CALL => &[Label],
            Self::JUMPIFEQ | Self::JUMPIFNEQ => &[Label, Symb, Symb],
            Self::PUSHS | Self::WRITE | Self::DPRINT | Self::EXIT => &[Symb],
            Self::READ => &[Var, TypeTag],
        }
    }
}

/// The syntactic shape an argument slot requires; `Symb` accepts either a
/// variable or a constant, the others accept exactly one XML argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    Var,
    Symb,
    Label,
    TypeTag,
}
