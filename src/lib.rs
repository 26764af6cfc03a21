//! `rd1dump` reads a CTT-generated register list in the rd1 text format,
//! fetches each register's live value from physical memory through the
//! `/dev/mem` mapping interface, and regenerates the list with the values
//! just read.
//!
//! The layout mirrors the data flow: [`rd1`] is the file codec, [`mem`] the
//! physical register reader, and [`dump`] the driver wiring them together.

pub mod dump;
pub mod mem;
pub mod rd1;
