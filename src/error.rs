//! Errors reported by fallible `Vector` operations.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Recoverable failures of `Vector` operations.
///
/// Whenever one of these is returned, the container is left exactly as it was
/// before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// Checked access past the live elements.
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// Requested capacity does not fit in the address space.
    CapacityOverflow,
    /// The global allocator refused the request.
    AllocFailed {
        /// Layout of the refused allocation.
        layout: Layout,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::AllocFailed { layout } => {
                write!(
                    f,
                    "allocation of {} bytes (align {}) failed",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for VectorError {}
