use core::fmt;

use thiserror::Error;

/// Names the argument that was missing from a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    /// The text being rewritten.
    Buffer,
    /// The literal searched for.
    Pattern,
    /// The literal inserted at each occurrence.
    Replacement,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Argument::Buffer => "buffer",
            Argument::Pattern => "pattern",
            Argument::Replacement => "replacement",
        })
    }
}

/// Reasons a replacement was not performed.
///
/// Whatever the variant, the caller's buffer is left exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceError {
    /// A required argument was absent (a null pointer at the C boundary).
    #[error("missing {0} argument")]
    InvalidArgument(Argument),
    /// The pattern had length zero, so occurrences are undefined.
    #[error("pattern is empty")]
    EmptyPattern,
    /// Scratch storage for the output could not be acquired.
    #[error("unable to acquire {requested} bytes of scratch storage")]
    AllocationFailed {
        /// Size of the refused request, in bytes.
        requested: usize,
    },
    /// The output does not fit in the storage available for it.
    ///
    /// Both fields count text bytes, NUL terminator excluded. For a
    /// [`NulBuffer`](crate::NulBuffer), storage of `required + 1` bytes is
    /// enough.
    #[error("output needs {required} bytes but only {capacity} are available")]
    CapacityExceeded {
        /// Length of the complete output.
        required: usize,
        /// Longest output the storage could hold.
        capacity: usize,
    },
    /// Caller storage held no NUL terminator.
    #[error("buffer has no NUL terminator")]
    Unterminated,
}

impl ReplaceError {
    /// Whether this condition was absorbed as a silent no-op by the legacy
    /// runtime routine.
    ///
    /// Callers that need the old behaviour can ignore these errors; capacity
    /// violations were memory corruption there and must not be ignored.
    #[must_use]
    pub fn is_silent_noop(&self) -> bool {
        matches!(
            self,
            ReplaceError::InvalidArgument(_)
                | ReplaceError::EmptyPattern
                | ReplaceError::AllocationFailed { .. }
        )
    }
}
