//! Program-facing I/O: `READ`'s input source and `WRITE`/`DPRINT`'s output
//! sinks, abstracted behind a trait so the engine never touches real stdio
//! directly and tests can swap in an in-memory implementation.

use std::io::BufRead;

/// Everything an executing program can do to the outside world. The driver
/// takes `&mut dyn ProgramIo` rather than owning a concrete stream type, so
/// the same engine binary serves both the CLI (real stdin/stdout/stderr) and
/// tests (buffers asserted against afterward).
pub trait ProgramIo {
    /// Reads and returns the next line of input, without its trailing
    /// newline, or `None` at end of input. Mirrors `READ`'s "missing value"
    /// case, which is not an error (§4.6: defaults per type, `nil` for most).
    fn read_line(&mut self) -> Option<String>;

    /// `WRITE`'s destination.
    fn write_stdout(&mut self, text: &str);

    /// `DPRINT`'s destination. Kept distinct from `write_stdout` even though
    /// both implementations below write the same place in production, since
    /// a test harness may want to assert on them separately.
    fn write_stderr(&mut self, text: &str);
}

/// The production implementation: real stdin wrapped in a buffered reader
/// (so `--input` can point at either a file or, by omission, process stdin),
/// real stdout, real stderr.
pub struct StdIo<R> {
    input: R,
}

impl<R: BufRead> StdIo<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> ProgramIo for StdIo<R> {
    fn read_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                Some(buf)
            }
            Err(_) => None,
        }
    }

    fn write_stdout(&mut self, text: &str) {
        print!("{text}");
    }

    fn write_stderr(&mut self, text: &str) {
        eprint!("{text}");
    }
}

/// An in-memory implementation for tests: a fixed queue of input lines and
/// two collected output buffers.
#[derive(Debug, Default)]
pub struct CollectIo {
    input: std::collections::VecDeque<String>,
    pub stdout: String,
    pub stderr: String,
}

impl CollectIo {
    pub fn with_input<I: IntoIterator<Item = S>, S: Into<String>>(lines: I) -> Self {
        Self { input: lines.into_iter().map(Into::into).collect(), ..Self::default() }
    }
}

impl ProgramIo for CollectIo {
    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write_stdout(&mut self, text: &str) {
        self.stdout.push_str(text);
    }

    fn write_stderr(&mut self, text: &str) {
        self.stderr.push_str(text);
    }
}
