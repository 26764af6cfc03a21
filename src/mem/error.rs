use std::{error::Error, fmt, io};

use nix::errno::Errno;

pub type ReadResult<T> = Result<T, ReadError>;

/// Failures while reading a register through the physical-memory device.
/// Both carry the underlying OS error; neither is retried.
#[derive(Debug)]
pub enum ReadError {
    DeviceOpenFailed { device: &'static str, source: io::Error },
    MapFailed { page_base: u32, source: Errno },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::DeviceOpenFailed { device, source } => {
                write!(f, "could not open \"{device}\": {source}")
            }
            ReadError::MapFailed { page_base, source } => {
                write!(f, "could not map page at 0x{page_base:08x}: {source}")
            }
        }
    }
}

impl Error for ReadError {}
