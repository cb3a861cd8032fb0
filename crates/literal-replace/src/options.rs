/// How much scratch storage a replacement acquires before scanning.
///
/// # Default
///
/// [`ScratchSizing::Exact`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScratchSizing {
    /// Count occurrences first and acquire exactly
    /// `len + occurrences × (replacement − pattern)` bytes.
    #[default]
    Exact,
    /// Acquire twice the input length without counting.
    ///
    /// This is the bound the legacy runtime routine used. It only holds while
    /// the output is at most twice as long as the input; larger outputs are
    /// rejected with [`ReplaceError::CapacityExceeded`](crate::ReplaceError).
    Doubled,
}

impl ScratchSizing {
    pub(crate) fn doubled_limit(input_len: usize) -> usize {
        input_len.saturating_mul(2)
    }
}

/// Configuration options for [`SubstringReplacer`](crate::SubstringReplacer).
///
/// # Examples
///
/// ```rust
/// use literal_replace::{ReplaceOptions, ScratchSizing, SubstringReplacer};
///
/// let options = ReplaceOptions {
///     scratch_sizing: ScratchSizing::Doubled,
///     max_output_len: Some(4096),
/// };
/// let mut replacer = SubstringReplacer::new(options);
/// assert_eq!(replacer.replace_all(b"a-b", b"-", b"+").unwrap(), "a+b");
/// ```
///
/// # Default
///
/// Exact scratch sizing with no ceiling on the output length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplaceOptions {
    /// Strategy used to size scratch storage.
    ///
    /// # Default
    ///
    /// [`ScratchSizing::Exact`]
    pub scratch_sizing: ScratchSizing,

    /// Longest output, in bytes, a single call may produce.
    ///
    /// Calls whose output would be longer fail with
    /// [`ReplaceError::CapacityExceeded`](crate::ReplaceError) before any
    /// scratch storage is acquired (exact sizing) or as soon as the limit is
    /// crossed (doubled sizing).
    ///
    /// # Default
    ///
    /// `None`
    pub max_output_len: Option<usize>,
}
