//! Naive literal matching.
//!
//! The cursor tests the pattern at every position and, after a hit, jumps past
//! the whole match. That makes occurrences non-overlapping and strictly left
//! to right: in `aaaa` the pattern `aa` occurs at 0 and 2, never at 1 or 3.
//! No skip tables are precomputed; the worst case is `O(n·p)` comparisons.

/// Iterator over the byte offsets of non-overlapping occurrences of a pattern.
///
/// Created by [`occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences<'h, 'p> {
    haystack: &'h [u8],
    pattern: &'p [u8],
    cursor: usize,
}

/// Returns an iterator over every non-overlapping occurrence of `pattern` in
/// `haystack`, left to right.
///
/// An empty pattern has no occurrences.
///
/// ```rust
/// use literal_replace::occurrences;
///
/// let found: Vec<usize> = occurrences(b"aaaa", b"aa").collect();
/// assert_eq!(found, [0, 2]);
/// ```
#[must_use]
pub fn occurrences<'h, 'p>(haystack: &'h [u8], pattern: &'p [u8]) -> Occurrences<'h, 'p> {
    Occurrences {
        haystack,
        pattern,
        cursor: 0,
    }
}

/// Counts the non-overlapping occurrences of `pattern` in `haystack`.
#[must_use]
pub fn count_occurrences(haystack: &[u8], pattern: &[u8]) -> usize {
    occurrences(haystack, pattern).count()
}

impl Occurrences<'_, '_> {
    /// Offset the next search starts from.
    ///
    /// Everything before it has either matched or been ruled out.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Occurrences<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let p = self.pattern.len();
        if p == 0 {
            return None;
        }

        while self.cursor + p <= self.haystack.len() {
            let at = self.cursor;
            if self.haystack[at..at + p] == *self.pattern {
                self.cursor = at + p;
                return Some(at);
            }
            self.cursor += 1;
        }

        // Too few bytes left for another match.
        self.cursor = self.haystack.len();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.pattern.len() {
            0 => (0, Some(0)),
            p => (0, Some((self.haystack.len() - self.cursor) / p)),
        }
    }
}

impl core::iter::FusedIterator for Occurrences<'_, '_> {}
