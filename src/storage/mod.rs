//! Storage layer for SaveKeeper
//!
//! Provides the whole-file copy and atomic replace primitives used by the
//! backup system.

pub mod file_io;

pub use file_io::{copy_to_new, write_atomic};
