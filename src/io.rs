// File-level helpers for stream comparison.
//
// Opens two paths (or stdin for "-") and compares them through the core
// comparator. No BufReader is layered on top: the comparator's own buffers
// are the only buffering, so memory stays within the configured capacities.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::compare::{self, CompareOptions, CompareReport};
use crate::error::CompareError;
use crate::source::ReadSource;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file comparisons.
#[derive(Debug, thiserror::Error)]
pub enum FileCompareError {
    /// A path could not be opened.
    #[error("failed to open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Standard input was requested for both sides.
    #[error("standard input can only be used for one of the two inputs")]
    BothStdin,
    /// The comparison itself failed.
    #[error("failed to compare files: {0}")]
    Compare(#[from] CompareError),
}

// ---------------------------------------------------------------------------
// compare_files
// ---------------------------------------------------------------------------

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

fn open(path: &Path) -> Result<Box<dyn Read>, FileCompareError> {
    if is_stdin(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|source| FileCompareError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(file))
}

/// Compare the contents of two files.
///
/// Either path may be `-` to read standard input. Both files are opened
/// before any byte is read, so an open failure leaves neither consumed.
pub fn compare_files(
    first: &Path,
    second: &Path,
    opts: &CompareOptions,
) -> Result<CompareReport, FileCompareError> {
    if is_stdin(first) && is_stdin(second) {
        return Err(FileCompareError::BothStdin);
    }
    opts.validate()?;

    let mut r1 = ReadSource::new(open(first)?);
    let mut r2 = ReadSource::new(open(second)?);

    log::debug!(
        "comparing {} ({} byte buffer) with {} ({} byte buffer)",
        first.display(),
        opts.first_capacity,
        second.display(),
        opts.second_capacity
    );

    Ok(compare::compare_report(opts, &mut r1, &mut r2)?)
}

/// Convenience wrapper around [`compare_files`] returning only the verdict.
pub fn files_equal(
    first: &Path,
    second: &Path,
    opts: &CompareOptions,
) -> Result<bool, FileCompareError> {
    compare_files(first, second, opts).map(|r| r.equal)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
