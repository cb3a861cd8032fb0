use alloc::{string::String, vec::Vec};

use bstr::BString;
use log::{debug, trace, warn};

use crate::{
    NulBuffer, ReplaceError, ReplaceOptions, ScratchSizing,
    matcher::{count_occurrences, occurrences},
    scratch::{GlobalScratch, ScratchAllocator, ScratchBuffer, ScratchFull},
};

/// Outcome of a successful in-place replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replaced {
    /// Number of occurrences that were substituted.
    pub occurrences: usize,
    /// Length of the buffer's text afterwards, terminator excluded.
    pub len: usize,
}

/// Replaces every non-overlapping occurrence of a literal pattern.
///
/// The scan runs once, left to right. At each position the next
/// `pattern.len()` bytes are compared with the pattern; on a match the
/// replacement is emitted and the cursor skips the whole match, otherwise one
/// byte is copied through. Emitted replacement text is never rescanned.
///
/// Output is assembled in a [`ScratchBuffer`] from the replacer's
/// [`ScratchAllocator`] and released before the call returns.
#[derive(Debug, Clone, Default)]
pub struct SubstringReplacer<A = GlobalScratch> {
    allocator: A,
    options: ReplaceOptions,
}

impl SubstringReplacer<GlobalScratch> {
    /// Creates a replacer drawing scratch storage from the global allocator.
    #[must_use]
    pub fn new(options: ReplaceOptions) -> Self {
        Self::with_allocator(GlobalScratch, options)
    }
}

impl<A: ScratchAllocator> SubstringReplacer<A> {
    /// Creates a replacer drawing scratch storage from `allocator`.
    #[must_use]
    pub fn with_allocator(allocator: A, options: ReplaceOptions) -> Self {
        Self { allocator, options }
    }

    /// Options this replacer was created with.
    #[must_use]
    pub fn options(&self) -> &ReplaceOptions {
        &self.options
    }

    /// Returns `haystack` with every occurrence of `pattern` replaced.
    ///
    /// # Errors
    ///
    /// - [`ReplaceError::EmptyPattern`] if `pattern` is empty.
    /// - [`ReplaceError::AllocationFailed`] if scratch storage is refused.
    /// - [`ReplaceError::CapacityExceeded`] if the output is longer than the
    ///   configured ceiling or than doubled scratch sizing allows.
    pub fn replace_all(
        &mut self,
        haystack: &[u8],
        pattern: &[u8],
        replacement: &[u8],
    ) -> Result<BString, ReplaceError> {
        let scratch_len = self.scratch_len(haystack, pattern, replacement)?;
        let (scratch, _) = self.substitute(scratch_len, haystack, pattern, replacement)?;
        Ok(BString::from(scratch.into_vec()))
    }

    /// UTF-8 form of [`replace_all`](Self::replace_all).
    ///
    /// # Errors
    ///
    /// Same as [`replace_all`](Self::replace_all).
    pub fn replace_all_str(
        &mut self,
        haystack: &str,
        pattern: &str,
        replacement: &str,
    ) -> Result<String, ReplaceError> {
        let bytes = self
            .replace_all(haystack.as_bytes(), pattern.as_bytes(), replacement.as_bytes())?
            .into();
        // A UTF-8 pattern only matches on character boundaries of UTF-8 text,
        // so splicing in UTF-8 replacements keeps the output valid.
        Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
            debug_assert!(false, "replacement produced invalid UTF-8: {e}");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }))
    }

    /// Rewrites the text in `buffer` in place.
    ///
    /// The new text plus its terminator must fit in the buffer's storage. If
    /// it does not, nothing is written and
    /// [`ReplaceError::CapacityExceeded`] reports the text length required
    /// against the room left once the terminator is set aside.
    ///
    /// ```rust
    /// use literal_replace::{NulBuffer, ReplaceError, ReplaceOptions, SubstringReplacer};
    ///
    /// let mut replacer = SubstringReplacer::new(ReplaceOptions::default());
    ///
    /// let mut storage = [0u8; 8];
    /// storage[..3].copy_from_slice(b"aaa");
    /// let mut buffer = NulBuffer::new(&mut storage).unwrap();
    /// let done = replacer.replace_in_place(&mut buffer, b"a", b"bb").unwrap();
    /// assert_eq!(buffer.as_bytes(), b"bbbbbb");
    /// assert_eq!((done.occurrences, done.len), (3, 6));
    ///
    /// let err = replacer.replace_in_place(&mut buffer, b"b", b"cc").unwrap_err();
    /// assert_eq!(err, ReplaceError::CapacityExceeded { required: 12, capacity: 7 });
    /// assert_eq!(buffer.as_bytes(), b"bbbbbb");
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`replace_all`](Self::replace_all), plus
    /// [`ReplaceError::CapacityExceeded`] when the buffer's storage is too
    /// small.
    pub fn replace_in_place(
        &mut self,
        buffer: &mut NulBuffer<'_>,
        pattern: &[u8],
        replacement: &[u8],
    ) -> Result<Replaced, ReplaceError> {
        let scratch_len = self.scratch_len(buffer.as_bytes(), pattern, replacement)?;
        if self.options.scratch_sizing == ScratchSizing::Exact {
            // Exact sizing already knows the output length: fail before
            // acquiring anything.
            fits_in(scratch_len, buffer.capacity())?;
        }

        let (scratch, occurrences) =
            self.substitute(scratch_len, buffer.as_bytes(), pattern, replacement)?;
        fits_in(scratch.len(), buffer.capacity())?;

        buffer.write(scratch.as_bytes());
        Ok(Replaced {
            occurrences,
            len: scratch.len(),
        })
    }

    /// Rewrites `buffer` in place, growing or shrinking it as needed.
    ///
    /// # Errors
    ///
    /// Same as [`replace_all`](Self::replace_all). On error `buffer` is
    /// unchanged.
    pub fn replace_vec(
        &mut self,
        buffer: &mut Vec<u8>,
        pattern: &[u8],
        replacement: &[u8],
    ) -> Result<Replaced, ReplaceError> {
        let scratch_len = self.scratch_len(buffer, pattern, replacement)?;
        let (scratch, occurrences) = self.substitute(scratch_len, buffer, pattern, replacement)?;
        *buffer = scratch.into_vec();
        Ok(Replaced {
            occurrences,
            len: buffer.len(),
        })
    }

    fn scratch_len(
        &self,
        haystack: &[u8],
        pattern: &[u8],
        replacement: &[u8],
    ) -> Result<usize, ReplaceError> {
        trace!(
            "replace: haystack {} bytes, pattern {} bytes, replacement {} bytes",
            haystack.len(),
            pattern.len(),
            replacement.len()
        );
        if pattern.is_empty() {
            debug!("replace: empty pattern, nothing to do");
            return Err(ReplaceError::EmptyPattern);
        }

        match self.options.scratch_sizing {
            ScratchSizing::Exact => {
                let required = output_len(haystack, pattern, replacement)?;
                match self.options.max_output_len {
                    Some(max) if required > max => {
                        warn!("replace: output of {required} bytes exceeds ceiling of {max}");
                        Err(ReplaceError::CapacityExceeded {
                            required,
                            capacity: max,
                        })
                    }
                    _ => Ok(required),
                }
            }
            ScratchSizing::Doubled => {
                let limit = ScratchSizing::doubled_limit(haystack.len());
                Ok(self
                    .options
                    .max_output_len
                    .map_or(limit, |max| limit.min(max)))
            }
        }
    }

    fn substitute(
        &mut self,
        scratch_len: usize,
        haystack: &[u8],
        pattern: &[u8],
        replacement: &[u8],
    ) -> Result<(ScratchBuffer, usize), ReplaceError> {
        let mut scratch = self
            .allocator
            .acquire(scratch_len)
            .inspect_err(|e| debug!("replace: {e}"))?;

        let overflow = |scratch: &ScratchBuffer| {
            let required = output_len(haystack, pattern, replacement).unwrap_or(usize::MAX);
            warn!(
                "replace: output of {required} bytes overflows {} bytes of scratch",
                scratch.limit()
            );
            ReplaceError::CapacityExceeded {
                required,
                capacity: scratch.limit(),
            }
        };

        let mut copied = 0;
        let mut count = 0;
        for at in occurrences(haystack, pattern) {
            let emitted = scratch
                .try_extend(&haystack[copied..at])
                .and_then(|()| scratch.try_extend(replacement));
            if let Err(ScratchFull) = emitted {
                return Err(overflow(&scratch));
            }
            copied = at + pattern.len();
            count += 1;
        }
        if let Err(ScratchFull) = scratch.try_extend(&haystack[copied..]) {
            return Err(overflow(&scratch));
        }

        trace!("replace: {count} occurrences, {} bytes out", scratch.len());
        Ok((scratch, count))
    }
}

/// Exact length of the output of replacing `pattern` with `replacement` in
/// `haystack`: `len + occurrences × (replacement − pattern)`.
///
/// # Errors
///
/// - [`ReplaceError::EmptyPattern`] if `pattern` is empty.
/// - [`ReplaceError::CapacityExceeded`] if the length is not representable.
pub fn output_len(
    haystack: &[u8],
    pattern: &[u8],
    replacement: &[u8],
) -> Result<usize, ReplaceError> {
    if pattern.is_empty() {
        return Err(ReplaceError::EmptyPattern);
    }
    let count = count_occurrences(haystack, pattern);
    // Matches never overlap, so they cover at most the whole haystack.
    let kept = haystack.len() - count * pattern.len();
    count
        .checked_mul(replacement.len())
        .and_then(|added| kept.checked_add(added))
        .ok_or(ReplaceError::CapacityExceeded {
            required: usize::MAX,
            capacity: isize::MAX.unsigned_abs(),
        })
}

/// Checks that `len` bytes of text and a terminator fit in `capacity` bytes
/// of storage. Errors count text bytes only, so one byte of `capacity` goes
/// to the terminator.
fn fits_in(len: usize, capacity: usize) -> Result<(), ReplaceError> {
    let room = capacity.saturating_sub(1);
    if len <= room {
        return Ok(());
    }
    warn!("replace: output of {len} bytes exceeds room for {room} in buffer");
    Err(ReplaceError::CapacityExceeded {
        required: len,
        capacity: room,
    })
}

/// Replaces every occurrence of `pattern` in `haystack` using default options.
///
/// # Errors
///
/// See [`SubstringReplacer::replace_all`].
pub fn replace_all(
    haystack: &[u8],
    pattern: &[u8],
    replacement: &[u8],
) -> Result<BString, ReplaceError> {
    SubstringReplacer::new(ReplaceOptions::default()).replace_all(haystack, pattern, replacement)
}

/// Replaces every occurrence of `pattern` in `haystack` using default options.
///
/// # Errors
///
/// See [`SubstringReplacer::replace_all`].
pub fn replace_all_str(
    haystack: &str,
    pattern: &str,
    replacement: &str,
) -> Result<String, ReplaceError> {
    SubstringReplacer::new(ReplaceOptions::default()).replace_all_str(
        haystack,
        pattern,
        replacement,
    )
}

/// Rewrites `buffer` in place using default options.
///
/// # Errors
///
/// See [`SubstringReplacer::replace_in_place`].
pub fn replace_in_place(
    buffer: &mut NulBuffer<'_>,
    pattern: &[u8],
    replacement: &[u8],
) -> Result<Replaced, ReplaceError> {
    SubstringReplacer::new(ReplaceOptions::default()).replace_in_place(buffer, pattern, replacement)
}
