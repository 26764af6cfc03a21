//! Driver for a dump run: parse the register list, read every register live,
//! regenerate the list.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::{error::Error, fmt};

use crate::mem::{ReadError, RegisterReader};
use crate::rd1::{ParseError, RegisterSet, WriteError};

pub type DumpResult<T> = Result<T, DumpError>;

/// Any failure of a dump run, labeled by the operation that failed. The
/// underlying cause is reachable through `Error::source`.
#[derive(Debug)]
pub enum DumpError {
    Input { path: PathBuf, source: io::Error },
    Parse(ParseError),
    Read(ReadError),
    Output { path: PathBuf, source: io::Error },
    Write(WriteError),
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpError::Input { path, .. } => {
                write!(f, "could not open input \"{}\"", path.display())
            }
            DumpError::Parse(_) => write!(f, "invalid rd1 input"),
            DumpError::Read(_) => write!(f, "register read failed"),
            DumpError::Output { path, .. } => {
                write!(f, "could not create output \"{}\"", path.display())
            }
            DumpError::Write(_) => write!(f, "register dump write failed"),
        }
    }
}

impl Error for DumpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DumpError::Input { source, .. } => Some(source),
            DumpError::Parse(err) => Some(err),
            DumpError::Read(err) => Some(err),
            DumpError::Output { source, .. } => Some(source),
            DumpError::Write(err) => Some(err),
        }
    }
}

impl From<ParseError> for DumpError {
    fn from(err: ParseError) -> Self {
        DumpError::Parse(err)
    }
}

impl From<ReadError> for DumpError {
    fn from(err: ReadError) -> Self {
        DumpError::Read(err)
    }
}

impl From<WriteError> for DumpError {
    fn from(err: WriteError) -> Self {
        DumpError::Write(err)
    }
}

/// Run one dump: parse `input`, overwrite every entry's value with a live
/// read in file order, then generate the list to `output` (or stdout when
/// `None`).
///
/// Reads are all-or-nothing: the first failed read aborts the run before any
/// output exists, discarding values already read. The output file is only
/// created once every read has succeeded, so a failed run leaves no partial
/// artifact behind.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    reader: &mut dyn RegisterReader,
) -> DumpResult<()> {
    let file = File::open(input).map_err(|source| DumpError::Input {
        path: input.to_owned(),
        source,
    })?;
    let mut set = RegisterSet::parse(BufReader::new(file))?;

    for entry in &mut set.entries {
        entry.value = reader.read_register(entry.address)?;
    }

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| DumpError::Output {
                path: path.to_owned(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            set.serialize(&mut out)?;
            out.flush().map_err(WriteError::from)?;
        }
        None => set.serialize(io::stdout().lock())?,
    }
    Ok(())
}
