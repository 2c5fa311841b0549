// Byte source abstraction.
//
// A source fills a caller-provided region with up to `buf.len()` bytes and
// reports, alongside the count, whether it is now exhausted. Faults come
// back as `Err` and are never combined with exhaustion.

use std::io::{self, Read};

/// Outcome of one successful `ByteSource::fill` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fill {
    /// Number of bytes written to the front of the buffer.
    pub len: usize,
    /// The source will never produce more bytes.
    pub exhausted: bool,
}

impl Fill {
    pub fn more(len: usize) -> Self {
        Self {
            len,
            exhausted: false,
        }
    }

    pub fn last(len: usize) -> Self {
        Self {
            len,
            exhausted: true,
        }
    }
}

/// Pull-based provider of bytes.
///
/// A call may return fewer bytes than requested, including zero, without
/// being exhausted. Retrying transient failures is the implementor's job;
/// any `Err` aborts a comparison.
pub trait ByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).fill(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).fill(buf)
    }
}

/// In-memory source. Signals exhaustion together with its final bytes.
impl ByteSource for &[u8] {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(Fill {
            len: n,
            exhausted: self.is_empty(),
        })
    }
}

// ---------------------------------------------------------------------------
// std::io::Read adapter
// ---------------------------------------------------------------------------

/// Adapts any `std::io::Read` into a `ByteSource`.
///
/// `Ok(0)` for a non-empty request is end of stream. Reads interrupted by
/// a signal are retried here rather than surfaced as faults.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> From<R> for ReadSource<R> {
    fn from(inner: R) -> Self {
        Self::new(inner)
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        if buf.is_empty() {
            return Ok(Fill::more(0));
        }
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(Fill::last(0)),
                Ok(n) => return Ok(Fill::more(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
