use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;
use std::{env, fs};

use ippcode23::{Driver, ErrorKind, IppError, Program, StdIo};

const HELP: &str = "\
ippcode23 --source=FILE --input=FILE

Interprets an IPPcode23 program given as XML.

    --source=FILE   read the XML source program from FILE (default: stdin)
    --input=FILE    read the program's READ input from FILE (default: stdin)
    --help          print this message and exit

At most one of --source/--input may be omitted and default to stdin: the
interpreter cannot read both the program and its input from the same
stream.";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help") {
        println!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let paths = match Paths::parse(&args) {
        Ok(paths) => paths,
        Err(err) => return report(&err),
    };

    match run(&paths) {
        Ok(code) => ExitCode::from(code),
        Err(err) => report(&err),
    }
}

struct Paths {
    source: Option<String>,
    input: Option<String>,
}

impl Paths {
    /// Mirrors the original's argument handling (§15): a program must name
    /// at least one of `--source`/`--input`, since both can't default to
    /// stdin at once.
    fn parse(args: &[String]) -> Result<Self, IppError> {
        let mut source = None;
        let mut input = None;
        for arg in args {
            if let Some(value) = arg.strip_prefix("--source=") {
                source = Some(value.to_string());
            } else if let Some(value) = arg.strip_prefix("--input=") {
                input = Some(value.to_string());
            } else {
                return Err(cmd_args(format!("unrecognized argument '{arg}'")));
            }
        }
        if source.is_none() && input.is_none() {
            return Err(cmd_args("at least one of --source or --input is required"));
        }
        Ok(Self { source, input })
    }
}

fn run(paths: &Paths) -> Result<u8, IppError> {
    let source_text = read_source_or_stdin(paths.source.as_deref())?;
    let program = Program::from_xml_reader(source_text.as_bytes())?;
    let driver = Driver::new(program);

    let outcome = match &paths.input {
        Some(path) => {
            let file = fs::File::open(path).map_err(|err| open_input_error(path, &err))?;
            let mut io = StdIo::new(BufReader::new(file));
            driver.run(&mut io)?
        }
        None => {
            let mut io = StdIo::new(io::stdin().lock());
            driver.run(&mut io)?
        }
    };

    match outcome {
        ippcode23::RunOutcome::Completed => Ok(0),
        ippcode23::RunOutcome::Exit(code) => Ok(code),
    }
}

/// Reads `--source`'s XML text. A missing/unreadable source file is
/// `FORMAT_XML` (31), not `OPEN_INPUT_FILE` (11): the original hands the
/// source path straight to `ET.parse`, whose failure (including a file that
/// can't be opened) is caught only by the surrounding `FORMAT_XML` handler —
/// `OPEN_INPUT_FILE` is reserved for `--input`'s own `open()` call.
fn read_source_or_stdin(path: Option<&str>) -> Result<String, IppError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|err| format_xml_error(path, &err)),
        None => {
            let mut buf = String::new();
            let mut stdin = io::stdin().lock();
            loop {
                let mut line = String::new();
                match stdin.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => buf.push_str(&line),
                    Err(err) => return Err(format_xml_error("<stdin>", &err)),
                }
            }
            Ok(buf)
        }
    }
}

fn format_xml_error(path: &str, err: &io::Error) -> IppError {
    IppError::new(ErrorKind::FormatXml, format!("cannot read source '{path}': {err}"))
}

fn open_input_error(path: &str, err: &io::Error) -> IppError {
    IppError::new(ErrorKind::OpenInputFile, format!("cannot open '{path}': {err}"))
}

fn cmd_args(message: impl Into<String>) -> IppError {
    IppError::new(ErrorKind::CmdArgs, message.into())
}

fn report(err: &IppError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::from(err.kind.exit_code())
}
