//! Physical register access through the `/dev/mem` mapping interface.

pub mod error;

pub use error::{ReadError, ReadResult};

use std::fs::OpenOptions;
use std::num::NonZeroUsize;
use std::os::unix::fs::OpenOptionsExt;
use std::ptr;

use log::warn;
use nix::libc;
use nix::sys::mman::{MapFlags, ProtFlags, mmap, munmap};

/// Path of the physical-memory device node.
pub const MEM_DEVICE: &str = "/dev/mem";

/// Mapping granularity. Exactly one page is mapped per register read.
pub const PAGE_SIZE: usize = 4096;

const PAGE_LEN: NonZeroUsize = match NonZeroUsize::new(PAGE_SIZE) {
    Some(len) => len,
    None => unreachable!(),
};

/// Source of live register values. The one real implementation is
/// [`DevMemReader`]; the trait is the seam for platforms that expose
/// physical memory some other way, and for test stubs.
pub trait RegisterReader {
    fn read_register(&mut self, address: u32) -> ReadResult<u32>;
}

/// Split an address into its page base and in-page byte offset.
#[inline(always)]
pub fn page_split(address: u32) -> (u32, usize) {
    let mask = PAGE_SIZE as u32 - 1;
    (address & !mask, (address & mask) as usize)
}

/// Reads registers by mapping one page of `/dev/mem` per access.
///
/// The device is opened `O_RDWR | O_SYNC` on every call and released before
/// the call returns; no handle survives across reads. The 32-bit load is a
/// single volatile native-endian access with no normalization, so a dump and
/// its restore must run on the same architecture. Opening `/dev/mem`
/// typically requires elevated privilege.
#[derive(Debug, Default)]
pub struct DevMemReader;

impl RegisterReader for DevMemReader {
    fn read_register(&mut self, address: u32) -> ReadResult<u32> {
        let (page_base, offset) = page_split(address);

        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(MEM_DEVICE)
            .map_err(|source| ReadError::DeviceOpenFailed {
                device: MEM_DEVICE,
                source,
            })?;

        let page = unsafe {
            mmap(
                None,
                PAGE_LEN,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &device,
                page_base as libc::off_t,
            )
        }
        .map_err(|source| ReadError::MapFailed { page_base, source })?;

        let value =
            unsafe { ptr::read_volatile(page.as_ptr().cast::<u8>().add(offset).cast::<u32>()) };

        // The value is already in hand; a failed unmap only leaks the
        // mapping until process exit.
        if let Err(errno) = unsafe { munmap(page, PAGE_SIZE) } {
            warn!("could not unmap page at 0x{page_base:08x}: {errno}");
        }

        Ok(value)
    }
}

/// Value returned by [`SandboxReader`] for every address.
pub const SANDBOX_VALUE: u32 = 0xDEAD_BEEF;

/// Fixed-value stand-in for [`DevMemReader`], for exercising the file
/// plumbing on hosts without the target hardware.
#[derive(Debug, Default)]
pub struct SandboxReader;

impl RegisterReader for SandboxReader {
    fn read_register(&mut self, _address: u32) -> ReadResult<u32> {
        Ok(SANDBOX_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_page_aligned_address() {
        assert_eq!(page_split(0x44e1_0000), (0x44e1_0000, 0));
    }

    #[test]
    fn splits_offset_within_page() {
        assert_eq!(page_split(0x44e1_0048), (0x44e1_0000, 0x48));
        assert_eq!(page_split(0x44e1_0fff), (0x44e1_0000, 0xfff));
        assert_eq!(page_split(0x44e1_1000), (0x44e1_1000, 0));
    }

    #[test]
    fn sandbox_reader_returns_fixed_value() {
        let mut reader = SandboxReader;
        assert_eq!(reader.read_register(0x4800_2000).unwrap(), 0xdead_beef);
        assert_eq!(reader.read_register(0).unwrap(), 0xdead_beef);
    }
}
