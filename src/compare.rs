// Streaming equality of two byte sources.
//
// Both sources are pulled in lock-step, source 1 then source 2, one read
// each per iteration. Whatever both windows hold in common is compared and
// dropped; the longer window keeps its surplus for the next round. Memory
// use is bounded by the two buffer capacities regardless of input length.

use std::io::Read;

use crate::error::{CompareError, Side};
use crate::source::{ByteSource, ReadSource};
use crate::window::Window;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Default per-source buffer capacity.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default number of empty, non-terminal reads tolerated per source.
pub const DEFAULT_MAX_ZERO_READS: u32 = 2;

/// Configuration for a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Buffer capacity for source 1, in bytes. Must be non-zero.
    pub first_capacity: usize,
    /// Buffer capacity for source 2, in bytes. Must be non-zero.
    pub second_capacity: usize,
    /// Empty reads without exhaustion tolerated per source. `0` means the
    /// first such read is a liveness fault.
    pub max_zero_reads: u32,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            first_capacity: DEFAULT_BUFFER_SIZE,
            second_capacity: DEFAULT_BUFFER_SIZE,
            max_zero_reads: DEFAULT_MAX_ZERO_READS,
        }
    }
}

impl CompareOptions {
    /// Same capacity for both sources, default zero-read tolerance.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            first_capacity: capacity,
            second_capacity: capacity,
            ..Self::default()
        }
    }

    pub fn max_zero_reads(mut self, n: u32) -> Self {
        self.max_zero_reads = n;
        self
    }

    /// Reject zero capacities.
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.first_capacity == 0 {
            return Err(CompareError::InvalidCapacity { side: Side::First });
        }
        if self.second_capacity == 0 {
            return Err(CompareError::InvalidCapacity { side: Side::Second });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The first evidence that two sources differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Both sources produced a byte at `offset` and the bytes differ.
    Content { offset: u64 },
    /// `shorter` ended after `len` bytes while the other side kept going.
    Length { shorter: Side, len: u64 },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Content { offset } => write!(f, "first difference at byte {offset}"),
            Self::Length { shorter, len } => write!(f, "{shorter} ends after {len} bytes"),
        }
    }
}

/// Result of a comparison that ran to a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareReport {
    /// Both sources hold identical content.
    pub equal: bool,
    /// Why they differ, when they do.
    pub mismatch: Option<Mismatch>,
    /// Bytes pulled from source 1 when the verdict was reached.
    pub first_read: u64,
    /// Bytes pulled from source 2 when the verdict was reached.
    pub second_read: u64,
    /// Loop iterations executed.
    pub iterations: u64,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compare two sources for byte-for-byte equality.
///
/// Allocates one buffer per source as sized by `opts`. Returns `Ok(false)`
/// as soon as a difference is found, without draining either source.
pub fn compare<S1, S2>(
    opts: &CompareOptions,
    first: &mut S1,
    second: &mut S2,
) -> Result<bool, CompareError>
where
    S1: ByteSource + ?Sized,
    S2: ByteSource + ?Sized,
{
    compare_report(opts, first, second).map(|r| r.equal)
}

/// Like [`compare`], returning the full [`CompareReport`].
pub fn compare_report<S1, S2>(
    opts: &CompareOptions,
    first: &mut S1,
    second: &mut S2,
) -> Result<CompareReport, CompareError>
where
    S1: ByteSource + ?Sized,
    S2: ByteSource + ?Sized,
{
    opts.validate()?;
    let mut buf1 = vec![0u8; opts.first_capacity];
    let mut buf2 = vec![0u8; opts.second_capacity];
    run(&mut buf1, &mut buf2, opts.max_zero_reads, first, second)
}

/// Compare two `std::io::Read`ers.
pub fn compare_readers<R1: Read, R2: Read>(
    opts: &CompareOptions,
    first: R1,
    second: R2,
) -> Result<bool, CompareError> {
    let mut first = ReadSource::new(first);
    let mut second = ReadSource::new(second);
    compare(opts, &mut first, &mut second)
}

/// Compare using caller-supplied buffers. Each buffer's length is its
/// capacity; an empty buffer is a configuration error.
pub fn compare_with_buffers<S1, S2>(
    buf1: &mut [u8],
    buf2: &mut [u8],
    max_zero_reads: u32,
    first: &mut S1,
    second: &mut S2,
) -> Result<CompareReport, CompareError>
where
    S1: ByteSource + ?Sized,
    S2: ByteSource + ?Sized,
{
    if buf1.is_empty() {
        return Err(CompareError::InvalidCapacity { side: Side::First });
    }
    if buf2.is_empty() {
        return Err(CompareError::InvalidCapacity { side: Side::Second });
    }
    run(buf1, buf2, max_zero_reads, first, second)
}

// ---------------------------------------------------------------------------
// Reusable comparator
// ---------------------------------------------------------------------------

/// Holds the two buffers across comparisons so repeated calls do not
/// reallocate. No other state survives between calls.
#[derive(Debug)]
pub struct StreamComparator {
    opts: CompareOptions,
    buf1: Vec<u8>,
    buf2: Vec<u8>,
}

impl StreamComparator {
    pub fn new(opts: CompareOptions) -> Result<Self, CompareError> {
        opts.validate()?;
        Ok(Self {
            opts,
            buf1: vec![0u8; opts.first_capacity],
            buf2: vec![0u8; opts.second_capacity],
        })
    }

    pub fn options(&self) -> &CompareOptions {
        &self.opts
    }

    pub fn compare<S1, S2>(&mut self, first: &mut S1, second: &mut S2) -> Result<bool, CompareError>
    where
        S1: ByteSource + ?Sized,
        S2: ByteSource + ?Sized,
    {
        self.compare_report(first, second).map(|r| r.equal)
    }

    pub fn compare_report<S1, S2>(
        &mut self,
        first: &mut S1,
        second: &mut S2,
    ) -> Result<CompareReport, CompareError>
    where
        S1: ByteSource + ?Sized,
        S2: ByteSource + ?Sized,
    {
        run(
            &mut self.buf1,
            &mut self.buf2,
            self.opts.max_zero_reads,
            first,
            second,
        )
    }
}

// ---------------------------------------------------------------------------
// Core loop
// ---------------------------------------------------------------------------

fn run<S1, S2>(
    buf1: &mut [u8],
    buf2: &mut [u8],
    max_zero_reads: u32,
    first: &mut S1,
    second: &mut S2,
) -> Result<CompareReport, CompareError>
where
    S1: ByteSource + ?Sized,
    S2: ByteSource + ?Sized,
{
    let mut w1 = Window::new(Side::First, buf1, max_zero_reads);
    let mut w2 = Window::new(Side::Second, buf2, max_zero_reads);
    // Bytes confirmed equal so far; also the offset of the next comparison.
    let mut compared = 0u64;
    let mut iterations = 0u64;

    while !(w1.is_exhausted() && w2.is_exhausted()) {
        iterations += 1;

        w1.refill(first, w2.is_exhausted(), w2.total_read())?;
        w2.refill(second, w1.is_exhausted(), w1.total_read())?;

        let common = w1.pending().min(w2.pending());
        let a = &w1.unread()[..common];
        let b = &w2.unread()[..common];
        if a != b {
            let pos = a.iter().zip(b).position(|(x, y)| x != y).unwrap_or(0);
            let offset = compared + pos as u64;
            log::debug!("content differs at byte {offset}");
            return Ok(report(&w1, &w2, iterations, Some(Mismatch::Content { offset })));
        }
        w1.consume(common);
        w2.consume(common);
        compared += common as u64;

        // Only after this round's bytes are compared: an exhausted side that
        // is behind can never catch up.
        if let Some(shorter) = length_mismatch(&w1, &w2) {
            let len = match shorter {
                Side::First => w1.total_read(),
                Side::Second => w2.total_read(),
            };
            log::debug!("{shorter} ended after {len} bytes");
            return Ok(report(
                &w1,
                &w2,
                iterations,
                Some(Mismatch::Length { shorter, len }),
            ));
        }
    }

    let mismatch = match (w1.pending(), w2.pending()) {
        (0, 0) => None,
        (0, _) => Some(Mismatch::Length {
            shorter: Side::First,
            len: w1.total_read(),
        }),
        _ => Some(Mismatch::Length {
            shorter: Side::Second,
            len: w2.total_read(),
        }),
    };
    log::debug!(
        "comparison finished after {iterations} iterations, {compared} bytes equal, verdict {}",
        mismatch.is_none()
    );
    Ok(report(&w1, &w2, iterations, mismatch))
}

fn report(
    w1: &Window<'_>,
    w2: &Window<'_>,
    iterations: u64,
    mismatch: Option<Mismatch>,
) -> CompareReport {
    CompareReport {
        equal: mismatch.is_none(),
        mismatch,
        first_read: w1.total_read(),
        second_read: w2.total_read(),
        iterations,
    }
}

fn length_mismatch(w1: &Window<'_>, w2: &Window<'_>) -> Option<Side> {
    if w1.is_exhausted() && w1.total_read() < w2.total_read() {
        Some(Side::First)
    } else if w2.is_exhausted() && w2.total_read() < w1.total_read() {
        Some(Side::Second)
    } else {
        None
    }
}
