// Error taxonomy for stream comparison.
//
// Three failure classes: bad configuration (caught before any read), a
// source fault reported by a read call, and a liveness fault raised when a
// source keeps returning empty reads without ever signaling exhaustion.

use std::fmt;
use std::io;

/// Identifies one of the two compared sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The opposite source.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// One-based index, as used in messages.
    pub fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source {}", self.index())
    }
}

/// Error returned by the comparator. Every variant is terminal for the call.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// A buffer capacity of zero was supplied. Detected before any read.
    #[error("buffer capacity for {side} must be greater than zero")]
    InvalidCapacity { side: Side },

    /// A read call on `side` failed with something other than exhaustion.
    #[error("read from {side} failed: {source}")]
    Source {
        side: Side,
        #[source]
        source: io::Error,
    },

    /// `side` returned more than `max_zero_reads` empty reads without
    /// signaling exhaustion.
    #[error(
        "too many zero byte count reads without end of stream in {side} (tolerance {max_zero_reads})"
    )]
    NonTerminating { side: Side, max_zero_reads: u32 },
}

impl CompareError {
    /// The source the error is attributed to.
    pub fn side(&self) -> Side {
        match self {
            Self::InvalidCapacity { side }
            | Self::Source { side, .. }
            | Self::NonTerminating { side, .. } => *side,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidCapacity { .. })
    }

    pub fn is_source_fault(&self) -> bool {
        matches!(self, Self::Source { .. })
    }

    pub fn is_liveness_fault(&self) -> bool {
        matches!(self, Self::NonTerminating { .. })
    }
}
