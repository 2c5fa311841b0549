// Per-source buffered window.
//
// A window is the range `buf[start..end]` of bytes pulled from a source but
// not yet compared against the other side. Reads append at `end`; the
// comparator consumes from `start`. When the window drains both offsets
// snap back to zero so the whole buffer is reused.
//
// Invariants:
//   - 0 <= start <= end <= buf.len()
//   - total_read never decreases
//   - start == end implies start == end == 0 between operations
//   - zero_reads_left only decreases

use crate::error::{CompareError, Side};
use crate::source::ByteSource;

/// Upper bound (exclusive buffer offset) for the next read into a window.
///
/// Normally the full `capacity`. Once the other source is exhausted and this
/// source has not yet read more than it, only one byte beyond the other's
/// known length is needed to settle the length question, so the read is
/// capped at `end + (other_total - own_total + 1)`.
///
/// If this side is already ahead of an exhausted other side the verdict is
/// decided elsewhere and the ceiling stays at `capacity`.
pub fn read_ceiling(
    capacity: usize,
    end: usize,
    own_total: u64,
    other_exhausted: bool,
    other_total: u64,
) -> usize {
    debug_assert!(end <= capacity);
    if other_exhausted && own_total <= other_total {
        let needed = other_total - own_total + 1;
        let room = (capacity - end) as u64;
        end + needed.min(room) as usize
    } else {
        capacity
    }
}

/// Buffered, not-yet-compared state for one source.
#[derive(Debug)]
pub(crate) struct Window<'b> {
    side: Side,
    buf: &'b mut [u8],
    start: usize,
    end: usize,
    total_read: u64,
    exhausted: bool,
    zero_reads_left: u32,
    max_zero_reads: u32,
}

impl<'b> Window<'b> {
    pub(crate) fn new(side: Side, buf: &'b mut [u8], max_zero_reads: u32) -> Self {
        Self {
            side,
            buf,
            start: 0,
            end: 0,
            total_read: 0,
            exhausted: false,
            zero_reads_left: max_zero_reads,
            max_zero_reads,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Buffered bytes not yet compared.
    pub(crate) fn pending(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn unread(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    pub(crate) fn total_read(&self) -> u64 {
        self.total_read
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Issue at most one read into the free region, bounded by the ceiling
    /// derived from the other window's state. Returns the byte count read.
    pub(crate) fn refill<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
        other_exhausted: bool,
        other_total: u64,
    ) -> Result<usize, CompareError> {
        if self.exhausted || self.end >= self.capacity() {
            return Ok(0);
        }

        let ceiling = read_ceiling(
            self.capacity(),
            self.end,
            self.total_read,
            other_exhausted,
            other_total,
        );
        let requested = ceiling - self.end;

        let fill = source
            .fill(&mut self.buf[self.end..ceiling])
            .map_err(|source| CompareError::Source {
                side: self.side,
                source,
            })?;
        // Guard against a source claiming more than it was offered.
        let read = fill.len.min(requested);

        if fill.exhausted {
            self.exhausted = true;
        } else if read == 0 && requested > 0 {
            if self.zero_reads_left == 0 {
                return Err(CompareError::NonTerminating {
                    side: self.side,
                    max_zero_reads: self.max_zero_reads,
                });
            }
            self.zero_reads_left -= 1;
            log::debug!(
                "{}: empty read without end of stream ({} left)",
                self.side,
                self.zero_reads_left
            );
        }

        log::trace!(
            "{}: requested {requested}, read {read}, exhausted {}",
            self.side,
            self.exhausted
        );

        self.end += read;
        self.total_read += read as u64;
        Ok(read)
    }

    /// Mark `n` buffered bytes as compared.
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.pending());
        self.start += n;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }
}
