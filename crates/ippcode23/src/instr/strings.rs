//! `CONCAT`, `STRLEN`, `GETCHAR`, `SETCHAR`, `STRI2INT`, `INT2CHAR`, `TYPE`:
//! string construction and inspection, all indexed by Unicode code point
//! rather than byte offset (see [`crate::value`]'s module doc).

use crate::error::{ErrorKind, IppError, RunResult};
use crate::value::Value;

pub fn concat(lhs: &Value, rhs: &Value) -> RunResult<Value> {
    Ok(Value::Str(format!("{}{}", lhs.as_str()?, rhs.as_str()?)))
}

pub fn strlen(value: &Value) -> RunResult<Value> {
    Ok(Value::Int(value.as_str()?.chars().count() as i64))
}

/// §4.4: out-of-range index is `BAD_STRING_MANIPULATION`, not `OPERAND_TYPE`
/// or `OPERAND_VALUE` — the types check out, the index just doesn't land
/// inside the string.
fn char_at(s: &str, index: i64) -> RunResult<char> {
    usize::try_from(index).ok().and_then(|i| s.chars().nth(i)).ok_or_else(|| {
        IppError::new(ErrorKind::BadStringManipulation, format!("string index {index} out of range"))
    })
}

pub fn getchar(s: &Value, index: &Value) -> RunResult<Value> {
    let ch = char_at(s.as_str()?, index.as_int()?)?;
    Ok(Value::Str(ch.to_string()))
}

/// `SETCHAR dst, index, src`: replaces the code point at `index` in `dst`'s
/// current value with `src`'s first code point. `src` being empty is
/// `BAD_STRING_MANIPULATION` (§4.4), same bucket as an out-of-range index.
///
/// Type-checks `index` and `src` (then `dst`) before any
/// `BAD_STRING_MANIPULATION` range/empty check, matching
/// `Ins_SETCHAR.execute`'s `check_types_match(var_data1, var_data2, INT,
/// STRING)` call ahead of its own index/empty checks — so a non-`INT` index
/// or non-`STRING` source always raises `OPERAND_TYPE`, even when the index
/// would also be out of range.
pub fn setchar(dst_current: &Value, index: &Value, src: &Value) -> RunResult<Value> {
    let raw_index = index.as_int()?;
    let src_str = src.as_str()?;
    let base = dst_current.as_str()?;

    let replacement = src_str
        .chars()
        .next()
        .ok_or_else(|| IppError::new(ErrorKind::BadStringManipulation, "SETCHAR source string is empty"))?;
    let idx = usize::try_from(raw_index)
        .ok()
        .filter(|&i| i < base.chars().count())
        .ok_or_else(|| IppError::new(ErrorKind::BadStringManipulation, format!("string index {raw_index} out of range")))?;

    let mut chars: Vec<char> = base.chars().collect();
    chars[idx] = replacement;
    Ok(Value::Str(chars.into_iter().collect()))
}

pub fn stri2int(s: &Value, index: &Value) -> RunResult<Value> {
    let ch = char_at(s.as_str()?, index.as_int()?)?;
    Ok(Value::Int(i64::from(u32::from(ch))))
}

/// `INT2CHAR`: an ordinal outside the valid Unicode scalar range is
/// `BAD_STRING_MANIPULATION` (§4.4, §9 Open Questions).
pub fn int2char(ordinal: &Value) -> RunResult<Value> {
    let n = ordinal.as_int()?;
    let code = u32::try_from(n).map_err(|_| invalid_ordinal(n))?;
    let ch = char::from_u32(code).ok_or_else(|| invalid_ordinal(n))?;
    Ok(Value::Str(ch.to_string()))
}

fn invalid_ordinal(n: i64) -> IppError {
    IppError::new(ErrorKind::BadStringManipulation, format!("{n} is not a valid Unicode code point"))
}

pub fn type_name(value: &Value) -> Value {
    Value::Str(value.type_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_joins_strings() {
        assert_eq!(concat(&Value::Str("ab".into()), &Value::Str("cd".into())).unwrap(), Value::Str("abcd".into()));
    }

    #[test]
    fn strlen_counts_code_points() {
        assert_eq!(strlen(&Value::Str("café".into())).unwrap(), Value::Int(4));
    }

    #[test]
    fn getchar_out_of_range_is_bad_string_manipulation() {
        assert_eq!(
            getchar(&Value::Str("ab".into()), &Value::Int(9)).unwrap_err().kind,
            ErrorKind::BadStringManipulation
        );
    }

    #[test]
    fn setchar_replaces_code_point() {
        let out = setchar(&Value::Str("abc".into()), &Value::Int(1), &Value::Str("X".into())).unwrap();
        assert_eq!(out, Value::Str("aXc".into()));
    }

    #[test]
    fn setchar_rejects_empty_source() {
        assert_eq!(
            setchar(&Value::Str("abc".into()), &Value::Int(1), &Value::Str(String::new())).unwrap_err().kind,
            ErrorKind::BadStringManipulation
        );
    }

    #[test]
    fn setchar_type_checks_before_range_checks() {
        // A negative index alongside a non-STRING source is OPERAND_TYPE,
        // not BAD_STRING_MANIPULATION: both operand types are checked
        // before either range/empty check runs.
        assert_eq!(
            setchar(&Value::Str("abc".into()), &Value::Int(-1), &Value::Int(9)).unwrap_err().kind,
            ErrorKind::OperandType
        );
    }

    #[test]
    fn int2char_and_stri2int_roundtrip() {
        let ch = int2char(&Value::Int(65)).unwrap();
        assert_eq!(ch, Value::Str("A".into()));
        assert_eq!(stri2int(&ch, &Value::Int(0)).unwrap(), Value::Int(65));
    }

    #[test]
    fn type_name_reports_empty_for_uninit() {
        assert_eq!(type_name(&Value::Uninit), Value::Str(String::new()));
    }
}
