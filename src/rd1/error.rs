use std::{error::Error, fmt, io};

pub type ParseResult<T> = Result<T, ParseError>;

/// Failures while parsing an rd1 register list.
///
/// Line numbers are 1-based and count the device-name header as line 1, so
/// the first data line reports as line 2.
#[derive(Debug)]
pub enum ParseError {
    MissingHeader,
    BadLine { line: usize },
    BadHex { line: usize, token: String },
    NoEntries,
    Io(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader => {
                write!(f, "invalid file format: expected a two-token device name header")
            }
            ParseError::BadLine { line } => {
                write!(f, "invalid file format at line {line}: expected `addr value`")
            }
            ParseError::BadHex { line, token } => {
                write!(f, "invalid register token '{token}' at line {line}")
            }
            ParseError::NoEntries => write!(f, "invalid file format: no register data"),
            ParseError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Io(err)
    }
}

impl Error for ParseError {}

/// Output I/O failure while generating an rd1 register list. Generation
/// stops at the first failed write; partial output is not rolled back.
#[derive(Debug)]
pub struct WriteError {
    pub source: io::Error,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write failed: {}", self.source)
    }
}

impl From<io::Error> for WriteError {
    fn from(source: io::Error) -> Self {
        WriteError { source }
    }
}

impl Error for WriteError {}
