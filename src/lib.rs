//! Oxicmp: streaming byte-for-byte equality of two sources.
//!
//! Two sources are read in lock-step into two fixed-size buffers and
//! compared incrementally, so neither input needs a known length or has to
//! fit in memory. Sources may return short reads, differ in length, or
//! stall; a stalled source is cut off after a configurable number of empty
//! reads instead of spinning forever.
//!
//! The crate provides:
//! - The comparator (`compare`) and its per-source window state (`window`)
//! - The `ByteSource` read abstraction with `std::io::Read` adapters (`source`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxicmp::{CompareOptions, compare};
//!
//! let mut a: &[u8] = b"hello streaming world";
//! let mut b: &[u8] = b"hello streaming world";
//! let equal = compare(&CompareOptions::with_capacity(4), &mut a, &mut b).unwrap();
//! assert!(equal);
//! ```

pub mod compare;
pub mod error;
pub mod io;
pub mod source;
pub mod window;

#[cfg(feature = "cli")]
pub mod cli;

pub use compare::{
    CompareOptions, CompareReport, Mismatch, StreamComparator, compare, compare_readers,
    compare_report, compare_with_buffers,
};
pub use error::{CompareError, Side};
pub use source::{ByteSource, Fill, ReadSource};
