//! The scanning pass: load input, run the matcher, report tokens.

use std::io::{self, Read, Write};
use std::path::Path;

use tabscan_core::{BufferError, CursorBuffer, Matcher, PassEnd, Scanner, Token};
use tracing::debug;

use crate::config::{Config, InputSource, OutputFormat};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{}", read_message(.path, .source))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot read standard input: {0}")]
    Stdin(#[source] io::Error),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

fn read_message(path: &str, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        _ => format!("error reading '{path}': {err}"),
    }
}

/// Outcome of one scanning pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassSummary {
    pub tokens: usize,
    pub input_len: usize,
    pub end: PassEnd,
}

impl PassSummary {
    /// Diagnostic for a pass that stopped before consuming all input.
    pub fn stall_message(&self) -> Option<String> {
        match self.end {
            PassEnd::Exhausted => None,
            PassEnd::Stalled { offset, remaining } => Some(format!(
                "scanning stopped at byte offset {offset} of {}: no token matches here \
                 ({remaining} bytes left unread, likely an unterminated literal or comment)",
                self.input_len
            )),
        }
    }
}

/// Read the whole input into memory.
pub fn load_input(source: &InputSource) -> Result<Vec<u8>, DriverError> {
    match source {
        InputSource::Path(path) => read_path(path),
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(DriverError::Stdin)?;
            Ok(bytes)
        }
    }
}

fn read_path(path: &Path) -> Result<Vec<u8>, DriverError> {
    std::fs::read(path).map_err(|source| DriverError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Tokenize `source` and write one line per token to `out`.
///
/// A null byte in `source` fails before anything is written. Tokens already
/// written stay written if a later buffer growth fails.
#[tracing::instrument(name = "scan", level = "info", skip_all, fields(bytes = source.len()))]
pub fn run_pass<W: Write>(
    source: &[u8],
    config: &Config,
    out: &mut W,
) -> Result<PassSummary, DriverError> {
    let input = CursorBuffer::from_source(source, config.buffer)?;
    let matcher = Matcher::default();
    let table = matcher.table();
    let mut scanner = Scanner::new(matcher, input);

    let mut tokens = 0;
    for token in scanner.by_ref() {
        let token = token?;
        write_token(out, config, table.name(token.id), &token)?;
        tokens += 1;
    }

    let summary = PassSummary {
        tokens,
        input_len: source.len(),
        end: scanner.finish(),
    };
    debug!(tokens, end = ?summary.end, "pass finished");

    if !config.quiet {
        writeln!(out, "Ended.")?;
    }
    out.flush()?;
    Ok(summary)
}

fn write_token<W: Write>(
    out: &mut W,
    config: &Config,
    label: &str,
    token: &Token,
) -> io::Result<()> {
    if config.offsets {
        write!(out, "{}: ", token.offset)?;
    }
    match config.format {
        OutputFormat::Plain => {
            write!(out, "token: {label} ")?;
            out.write_all(token.lexeme())?;
            writeln!(out)
        }
        OutputFormat::Tsv => writeln!(out, "{label}\t{}", escape_lexeme(token.lexeme())),
    }
}

/// Render a lexeme on one line: `\t`, `\n`, `\r` and `\\` become two-byte
/// escapes, other non-printable bytes become `\xNN`.
pub fn escape_lexeme(bytes: &[u8]) -> String {
    let mut escaped = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\t' => escaped.push_str("\\t"),
            b'\n' => escaped.push_str("\\n"),
            b'\r' => escaped.push_str("\\r"),
            b'\\' => escaped.push_str("\\\\"),
            0x20..=0x7E => escaped.push(char::from(b)),
            _ => escaped.push_str(&format!("\\x{b:02x}")),
        }
    }
    escaped
}
