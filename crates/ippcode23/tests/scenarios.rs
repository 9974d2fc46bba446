//! Black-box scenarios exercising the public loader/driver API end to end
//! against literal XML fixtures, one per notable behavior from §8.

use ippcode23::{CollectIo, Driver, ErrorKind, Program, RunOutcome};
use pretty_assertions::assert_eq;

fn run(xml: &str) -> (Result<RunOutcome, ippcode23::IppError>, CollectIo) {
    let program = Program::from_xml_reader(xml.as_bytes()).expect("fixture XML is well-formed");
    let driver = Driver::new(program);
    let mut io = CollectIo::default();
    let outcome = driver.run(&mut io);
    (outcome, io)
}

#[test]
fn arithmetic_pipeline() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
            <instruction order="2" opcode="ADD">
                <arg1 type="var">GF@x</arg1>
                <arg2 type="int">2</arg2>
                <arg3 type="int">3</arg3>
            </instruction>
            <instruction order="3" opcode="MUL">
                <arg1 type="var">GF@x</arg1>
                <arg2 type="var">GF@x</arg2>
                <arg3 type="int">10</arg3>
            </instruction>
            <instruction order="4" opcode="WRITE"><arg1 type="var">GF@x</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "50");
}

#[test]
fn eq_nil_law_end_to_end() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
            <instruction order="2" opcode="EQ">
                <arg1 type="var">GF@r</arg1>
                <arg2 type="nil">nil</arg2>
                <arg3 type="int">0</arg3>
            </instruction>
            <instruction order="3" opcode="WRITE"><arg1 type="var">GF@r</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "false");
}

#[test]
fn control_flow_counts_down() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@i</arg1></instruction>
            <instruction order="2" opcode="MOVE">
                <arg1 type="var">GF@i</arg1>
                <arg2 type="int">3</arg2>
            </instruction>
            <instruction order="3" opcode="LABEL"><arg1 type="label">loop</arg1></instruction>
            <instruction order="4" opcode="WRITE"><arg1 type="var">GF@i</arg1></instruction>
            <instruction order="5" opcode="SUB">
                <arg1 type="var">GF@i</arg1>
                <arg2 type="var">GF@i</arg2>
                <arg3 type="int">1</arg3>
            </instruction>
            <instruction order="6" opcode="JUMPIFNEQ">
                <arg1 type="label">loop</arg1>
                <arg2 type="var">GF@i</arg2>
                <arg3 type="int">0</arg3>
            </instruction>
            <instruction order="7" opcode="WRITE"><arg1 type="string">done</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "321done");
}

#[test]
fn uninitialized_read_is_runtime_error() {
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
            <instruction order="2" opcode="WRITE"><arg1 type="var">GF@x</arg1></instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::UninitializedVar);
}

#[test]
fn undeclared_variable_is_nonexists_var() {
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="WRITE"><arg1 type="var">GF@ghost</arg1></instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::NonexistsVar);
}

#[test]
fn frame_roundtrip_via_push_and_pop() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="CREATEFRAME"></instruction>
            <instruction order="2" opcode="DEFVAR"><arg1 type="var">TF@a</arg1></instruction>
            <instruction order="3" opcode="MOVE">
                <arg1 type="var">TF@a</arg1>
                <arg2 type="string">kept</arg2>
            </instruction>
            <instruction order="4" opcode="PUSHFRAME"></instruction>
            <instruction order="5" opcode="WRITE"><arg1 type="var">LF@a</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "kept");
}

#[test]
fn idiv_by_zero_is_operand_value() {
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
            <instruction order="2" opcode="IDIV">
                <arg1 type="var">GF@r</arg1>
                <arg2 type="int">1</arg2>
                <arg3 type="int">0</arg3>
            </instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::OperandValue);
}

#[test]
fn stack_is_lifo_across_pushs_pops() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@a</arg1></instruction>
            <instruction order="2" opcode="DEFVAR"><arg1 type="var">GF@b</arg1></instruction>
            <instruction order="3" opcode="PUSHS"><arg1 type="int">1</arg1></instruction>
            <instruction order="4" opcode="PUSHS"><arg1 type="int">2</arg1></instruction>
            <instruction order="5" opcode="POPS"><arg1 type="var">GF@a</arg1></instruction>
            <instruction order="6" opcode="POPS"><arg1 type="var">GF@b</arg1></instruction>
            <instruction order="7" opcode="WRITE"><arg1 type="var">GF@a</arg1></instruction>
            <instruction order="8" opcode="WRITE"><arg1 type="var">GF@b</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "21");
}

#[test]
fn exit_range_violation_is_operand_value() {
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="EXIT"><arg1 type="int">99</arg1></instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::OperandValue);
}

#[test]
fn getchar_out_of_range_is_bad_string_manipulation() {
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
            <instruction order="2" opcode="GETCHAR">
                <arg1 type="var">GF@r</arg1>
                <arg2 type="string">ab</arg2>
                <arg3 type="int">9</arg3>
            </instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::BadStringManipulation);
}

#[test]
fn setchar_checks_index_and_source_before_target() {
    // `Ins_SETCHAR.execute` reads args[1] (index) and args[2] (source)
    // before args[0] (target): an undeclared index variable wins over an
    // uninitialized (but declared) target, raising NONEXISTS_VAR rather
    // than UNINITIALIZED_VAR.
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@target</arg1></instruction>
            <instruction order="2" opcode="SETCHAR">
                <arg1 type="var">GF@target</arg1>
                <arg2 type="var">GF@missing</arg2>
                <arg3 type="string">X</arg3>
            </instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::NonexistsVar);
}

#[test]
fn and_is_strict_in_both_operands() {
    // §4.4: AND/OR don't short-circuit -- a false left operand still
    // requires the right operand to type-check as BOOL.
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
            <instruction order="2" opcode="AND">
                <arg1 type="var">GF@r</arg1>
                <arg2 type="bool">false</arg2>
                <arg3 type="int">1</arg3>
            </instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::OperandType);
}

#[test]
fn read_string_at_eof_is_empty_not_nil() {
    let program = Program::from_xml_reader(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@s</arg1></instruction>
            <instruction order="2" opcode="READ">
                <arg1 type="var">GF@s</arg1>
                <arg2 type="type">string</arg2>
            </instruction>
            <instruction order="3" opcode="WRITE"><arg1 type="var">GF@s</arg1></instruction>
            <instruction order="4" opcode="DEFVAR"><arg1 type="var">GF@t</arg1></instruction>
            <instruction order="5" opcode="TYPE">
                <arg1 type="var">GF@t</arg1>
                <arg2 type="var">GF@s</arg2>
            </instruction>
            <instruction order="6" opcode="WRITE"><arg1 type="var">GF@t</arg1></instruction>
        </program>"#
            .as_bytes(),
    )
    .unwrap();
    let driver = Driver::new(program);
    let mut io = CollectIo::default();
    driver.run(&mut io).unwrap();
    assert_eq!(io.stdout, "string");
}

#[test]
fn unknown_frame_tag_is_nonexists_frame_not_bad_xml() {
    // §4.1: the loader doesn't validate a var's frame tag; an unrecognized
    // one surfaces as a runtime NONEXISTS_FRAME, not a load-time BAD_XML.
    let (outcome, _io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="DEFVAR"><arg1 type="var">XX@x</arg1></instruction>
        </program>"#,
    );
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::NonexistsFrame);
}

#[test]
fn write_decodes_escape_sequences() {
    let (outcome, io) = run(
        r#"<program language="IPPcode23">
            <instruction order="1" opcode="WRITE"><arg1 type="string">a\032b</arg1></instruction>
        </program>"#,
    );
    assert!(outcome.is_ok());
    assert_eq!(io.stdout, "a b");
}
