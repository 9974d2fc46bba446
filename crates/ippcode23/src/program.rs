//! Loads a `Program` from IPPcode23's XML representation (§3.3, §6.2): a
//! `<program language="IPPcode23">` root containing `<instruction order="N"
//! opcode="...">` elements, each with zero or more `<argK type="...">text
//! </argK>` children.

use std::collections::BTreeMap;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use smallvec::SmallVec;

use crate::arg::Arg;
use crate::error::{ErrorKind, IppError, RunResult};
use crate::instr::Instruction;
use crate::opcode::{ArgShape, Opcode};

/// A fully loaded, order-validated, arity-validated program: instructions in
/// execution order, ready for the driver's label-collection pass.
#[derive(Debug)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

struct RawInstruction {
    order: i64,
    opcode: Opcode,
    args: BTreeMap<u32, Arg>,
}

impl Program {
    /// Parses and validates a whole program from a buffered XML source.
    /// Malformed XML syntax is `FormatXml`; well-formed XML with the wrong
    /// structure for this language (missing attributes, bad ordering,
    /// unknown opcodes/types, arity mismatches) is `BadXml`.
    pub fn from_xml_reader<R: BufRead>(reader: R) -> RunResult<Self> {
        // `trim_text` is left at its default (off): an `<arg type="string">`
        // body's leading/trailing whitespace is significant and must survive
        // intact, so whitespace-only text nodes between structural tags are
        // discarded by the catch-all match arms below instead of by the
        // parser's own trimming.
        let mut xml = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut raw_instructions = Vec::new();
        let mut saw_root = false;

        loop {
            match xml.read_event_into(&mut buf).map_err(format_xml_error)? {
                Event::Eof => break,
                Event::Start(tag) if tag.local_name().as_ref() == b"program" => {
                    saw_root = true;
                }
                Event::Start(tag) if tag.local_name().as_ref() == b"instruction" => {
                    raw_instructions.push(read_instruction(&mut xml, &tag)?);
                }
                Event::Empty(tag) if tag.local_name().as_ref() == b"instruction" => {
                    raw_instructions.push(finish_instruction(&tag, BTreeMap::new())?);
                }
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(bad_xml("missing <program> root element"));
        }

        let instructions = order_and_validate(raw_instructions)?;
        Ok(Self { instructions })
    }
}

fn read_instruction(
    xml: &mut Reader<impl BufRead>,
    start: &quick_xml::events::BytesStart,
) -> RunResult<RawInstruction> {
    let mut args = BTreeMap::new();
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf).map_err(format_xml_error)? {
            Event::Start(tag) => {
                let index = arg_index(&tag)?;
                let xml_type = attr(&tag, b"type")?;
                let text = read_text(xml, &mut buf)?;
                // Only non-string argument types tolerate surrounding
                // whitespace from pretty-printed XML; a string literal's
                // whitespace is part of its value.
                let text = if xml_type == "string" { text.as_str() } else { text.trim() };
                args.insert(index, Arg::parse(&xml_type, text)?);
            }
            Event::Empty(tag) => {
                let index = arg_index(&tag)?;
                let xml_type = attr(&tag, b"type")?;
                args.insert(index, Arg::parse(&xml_type, "")?);
            }
            Event::End(tag) if tag.local_name().as_ref() == b"instruction" => break,
            Event::Eof => return Err(bad_xml("unexpected end of document inside <instruction>")),
            _ => {}
        }
    }
    buf.clear();
    finish_instruction(start, args)
}

fn read_text(xml: &mut Reader<impl BufRead>, buf: &mut Vec<u8>) -> RunResult<String> {
    let mut text = String::new();
    loop {
        match xml.read_event_into(buf).map_err(format_xml_error)? {
            Event::Text(t) => {
                text.push_str(&t.unescape().map_err(format_xml_error)?);
            }
            Event::End(_) => break,
            Event::Eof => return Err(bad_xml("unexpected end of document inside argument")),
            _ => {}
        }
    }
    buf.clear();
    Ok(text)
}

fn finish_instruction(
    start: &quick_xml::events::BytesStart,
    args: BTreeMap<u32, Arg>,
) -> RunResult<RawInstruction> {
    let order_text = attr(start, b"order")?;
    let order: i64 = order_text
        .trim()
        .parse()
        .map_err(|_| bad_xml(format!("instruction order '{order_text}' is not an integer")))?;
    let opcode_text = attr(start, b"opcode")?;
    let opcode = Opcode::parse(&opcode_text)?;
    Ok(RawInstruction { order, opcode, args })
}

fn arg_index(tag: &quick_xml::events::BytesStart) -> RunResult<u32> {
    let name = tag.local_name();
    let name = name.as_ref();
    if name.len() == 4 && &name[..3] == b"arg" && name[3].is_ascii_digit() {
        return Ok(u32::from(name[3] - b'0'));
    }
    Err(bad_xml(format!("unexpected element '{}'", String::from_utf8_lossy(name))))
}

fn attr(tag: &quick_xml::events::BytesStart, key: &[u8]) -> RunResult<String> {
    tag.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .map(|a| a.unescape_value().unwrap_or_default().into_owned())
        .ok_or_else(|| bad_xml(format!("missing required attribute '{}'", String::from_utf8_lossy(key))))
}

/// Sorts instructions by their `order` attribute (§3.3: order need not be
/// contiguous, only strictly increasing and positive) and validates each
/// instruction's argument list against its opcode's expected shape.
fn order_and_validate(raw: Vec<RawInstruction>) -> RunResult<Vec<Instruction>> {
    let mut seen_orders = std::collections::HashSet::new();
    for inst in &raw {
        if inst.order < 1 {
            return Err(bad_xml(format!("instruction order {} must be a positive integer", inst.order)));
        }
        if !seen_orders.insert(inst.order) {
            return Err(bad_xml(format!("duplicate instruction order {}", inst.order)));
        }
    }

    let mut raw = raw;
    raw.sort_by_key(|inst| inst.order);

    raw.into_iter().map(validate_instruction).collect()
}

fn validate_instruction(raw: RawInstruction) -> RunResult<Instruction> {
    let shapes = raw.opcode.arg_shapes();
    if raw.args.len() != shapes.len() {
        return Err(bad_xml(format!(
            "{} expects {} argument(s), got {}",
            raw.opcode,
            shapes.len(),
            raw.args.len()
        )));
    }

    let mut args: SmallVec<[Arg; 3]> = SmallVec::new();
    for (position, shape) in shapes.iter().enumerate() {
        let slot = u32::try_from(position + 1).expect("arity is always small");
        let arg = raw
            .args
            .get(&slot)
            .cloned()
            .ok_or_else(|| bad_xml(format!("{} is missing arg{slot}", raw.opcode)))?;
        check_shape(&raw.opcode, *shape, &arg)?;
        args.push(arg);
    }

    Ok(Instruction { opcode: raw.opcode, args })
}

fn check_shape(opcode: &Opcode, shape: ArgShape, arg: &Arg) -> RunResult<()> {
    let ok = match (shape, arg) {
        (ArgShape::Var, Arg::Var { .. }) => true,
        (ArgShape::Symb, Arg::Var { .. } | Arg::Literal(_)) => true,
        (ArgShape::Label, Arg::Label(_)) => true,
        (ArgShape::TypeTag, Arg::Type(_)) => true,
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(bad_xml(format!("{opcode} has an argument of the wrong kind")))
    }
}

fn bad_xml(message: impl Into<String>) -> IppError {
    IppError::new(ErrorKind::BadXml, message)
}

fn format_xml_error(err: quick_xml::Error) -> IppError {
    IppError::new(ErrorKind::FormatXml, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> RunResult<Program> {
        Program::from_xml_reader(xml.as_bytes())
    }

    #[test]
    fn parses_minimal_program() {
        let program = parse(
            r#"<program language="IPPcode23">
                <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
                <instruction order="2" opcode="MOVE">
                    <arg1 type="var">GF@x</arg1>
                    <arg2 type="int">42</arg2>
                </instruction>
            </program>"#,
        )
        .unwrap();
        assert_eq!(program.instructions.len(), 2);
    }

    #[test]
    fn sorts_out_of_order_instructions() {
        let program = parse(
            r#"<program language="IPPcode23">
                <instruction order="5" opcode="CREATEFRAME"></instruction>
                <instruction order="2" opcode="PUSHFRAME"></instruction>
            </program>"#,
        )
        .unwrap();
        assert_eq!(program.instructions[0].opcode, Opcode::PUSHFRAME);
        assert_eq!(program.instructions[1].opcode, Opcode::CREATEFRAME);
    }

    #[test]
    fn rejects_duplicate_order() {
        let err = parse(
            r#"<program language="IPPcode23">
                <instruction order="1" opcode="CREATEFRAME"></instruction>
                <instruction order="1" opcode="PUSHFRAME"></instruction>
            </program>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadXml);
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = parse(
            r#"<program language="IPPcode23">
                <instruction order="1" opcode="CREATEFRAME"><arg1 type="int">1</arg1></instruction>
            </program>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadXml);
    }

    #[test]
    fn rejects_missing_root() {
        assert!(parse("<foo></foo>").is_err());
    }
}
