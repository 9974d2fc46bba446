//! `WRITE`, `DPRINT`, `READ`: the only opcodes that touch the outside world.

use crate::arg::Arg;
use crate::context::Context;
use crate::error::RunResult;
use crate::io::ProgramIo;
use crate::instr::resolve_symb;
use crate::value::{Value, ValueKind};

pub fn write(ctx: &mut Context, io: &mut dyn ProgramIo, symb: &Arg) -> RunResult<()> {
    let value = resolve_symb(ctx, symb)?;
    io.write_stdout(&write_rendered(&value));
    Ok(())
}

pub fn dprint(ctx: &mut Context, io: &mut dyn ProgramIo, symb: &Arg) -> RunResult<()> {
    let value = resolve_symb(ctx, symb)?;
    io.write_stderr(&dprint_rendered(&value));
    Ok(())
}

/// `WRITE`'s rendering: decodes `\DDD` escapes in strings, and renders `nil`
/// as the empty string (the one place `Value::Nil`'s `Display` isn't used
/// verbatim — §4.7 specifies `WRITE nil` prints nothing).
fn write_rendered(value: &Value) -> String {
    match value {
        Value::Str(s) => decode_escapes(s),
        Value::Nil => String::new(),
        other => other.to_string(),
    }
}

/// `DPRINT`'s rendering: the raw internal value, with no `\DDD` escape
/// decoding (§4.5; `original_source/interpret.py`'s `Ins_DPRINT.execute`
/// prints `data.value` straight through, never calling `escape_string` the
/// way `Ins_WRITE` does).
fn dprint_rendered(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Nil => String::new(),
        other => other.to_string(),
    }
}

/// Decodes `\DDD` escapes (three decimal digits naming a Unicode code point)
/// by code point. See §15 for why this differs subtly from the byte-wise
/// scan of the reference implementation, and why an out-of-range decoded
/// value is replaced rather than treated as an error.
pub fn decode_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 3 < chars.len() && chars[i + 1..i + 4].iter().all(char::is_ascii_digit) {
            let digits: String = chars[i + 1..i + 4].iter().collect();
            let code: u32 = digits.parse().unwrap_or(0);
            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            i += 4;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

pub fn read(ctx: &mut Context, io: &mut dyn ProgramIo, target: &Arg, kind: ValueKind) -> RunResult<()> {
    let line = io.read_line();
    let value = match (kind, line) {
        (ValueKind::Int, Some(line)) => line.trim().parse::<i64>().map(Value::Int).unwrap_or(Value::Nil),
        (ValueKind::Bool, Some(line)) => Value::Bool(line.trim().eq_ignore_ascii_case("true")),
        (ValueKind::Str, Some(line)) => Value::Str(line),
        (ValueKind::Nil, _) => Value::Nil,
        // Per §15: empty BOOL input is `false`, breaking the general
        // empty-input-is-NIL pattern used by the other three types.
        (ValueKind::Bool, None) => Value::Bool(false),
        // §4.5: EOF on a STRING target stores the empty string, not NIL.
        (ValueKind::Str, None) => Value::Str(String::new()),
        (ValueKind::Int, None) => Value::Nil,
    };
    crate::instr::write_var(ctx, target, value)
}
