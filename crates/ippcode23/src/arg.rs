//! The argument model: what an XML `arg1`/`arg2`/`arg3` tag decodes into
//! once its `type` attribute and body text have been parsed and validated.

use crate::error::{ErrorKind, IppError, RunResult};
use crate::value::{Value, ValueKind};

/// One resolved argument. `Symb` arguments (constants or variables) decode
/// into either `Var` or `Literal`; `label` and `type` arguments decode
/// straight into their own variants.
///
/// `Var`'s `frame` is kept as the raw XML tag text (not validated against
/// `GF`/`TF`/`LF` here) per §4.1: an unrecognized frame tag is deferred to
/// runtime, where it surfaces as `NONEXISTS_FRAME` through
/// [`crate::frame::FrameKind::resolve`] rather than a load-time `BAD_XML`.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Var { frame: String, name: String },
    Literal(Value),
    Label(String),
    Type(ValueKind),
}

impl Arg {
    /// Parses one `<argN type="...">text</argN>` tag's already-separated
    /// `type` attribute and text content into a resolved argument.
    pub fn parse(xml_type: &str, text: &str) -> RunResult<Self> {
        match xml_type {
            "var" => parse_var(text),
            "label" => Ok(Self::Label(text.to_string())),
            "type" => ValueKind::parse(text)
                .map(Self::Type)
                .ok_or_else(|| bad_xml(format!("unknown type name '{text}'"))),
            "int" => text
                .trim()
                .parse::<i64>()
                .map(|v| Self::Literal(Value::Int(v)))
                .map_err(|_| bad_xml(format!("invalid int literal '{text}'"))),
            "bool" => match text {
                "true" => Ok(Self::Literal(Value::Bool(true))),
                "false" => Ok(Self::Literal(Value::Bool(false))),
                _ => Err(bad_xml(format!("invalid bool literal '{text}'"))),
            },
            "nil" if text == "nil" => Ok(Self::Literal(Value::Nil)),
            "nil" => Err(bad_xml(format!("invalid nil literal '{text}'"))),
            "string" => Ok(Self::Literal(Value::Str(text.to_string()))),
            other => Err(bad_xml(format!("unknown argument type '{other}'"))),
        }
    }
}

fn parse_var(text: &str) -> RunResult<Arg> {
    let (frame_text, name) = text
        .split_once('@')
        .ok_or_else(|| bad_xml(format!("malformed variable identifier '{text}'")))?;
    Ok(Arg::Var { frame: frame_text.to_string(), name: name.to_string() })
}

fn bad_xml(message: String) -> IppError {
    IppError::new(ErrorKind::BadXml, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_var() {
        let arg = Arg::parse("var", "LF@x").unwrap();
        assert_eq!(arg, Arg::Var { frame: "LF".into(), name: "x".into() });
    }

    #[test]
    fn parses_int_literal() {
        assert_eq!(Arg::parse("int", "-42").unwrap(), Arg::Literal(Value::Int(-42)));
    }

    #[test]
    fn rejects_malformed_var() {
        assert!(Arg::parse("var", "x").is_err());
    }

    #[test]
    fn unknown_frame_tag_is_not_rejected_at_parse_time() {
        // §4.1: an unrecognized frame tag is deferred to runtime
        // (NONEXISTS_FRAME via FrameKind::resolve), not BAD_XML here.
        assert_eq!(Arg::parse("var", "XX@x").unwrap(), Arg::Var { frame: "XX".into(), name: "x".into() });
    }

    #[test]
    fn string_literal_keeps_escapes_undecoded() {
        // Decoding is deferred to WRITE (see instr::io_ops::decode_escapes);
        // the parsed literal keeps the raw `\DDD` text.
        assert_eq!(
            Arg::parse("string", "a\\032b").unwrap(),
            Arg::Literal(Value::Str("a\\032b".into()))
        );
    }
}
