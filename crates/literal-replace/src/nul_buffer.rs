use bstr::BStr;

use crate::ReplaceError;

/// Caller-owned storage holding a NUL-terminated string.
///
/// The text is everything before the first NUL byte. Bytes after the
/// terminator are spare capacity that an in-place replacement may grow into.
///
/// ```rust
/// use literal_replace::NulBuffer;
///
/// let mut storage = *b"abc\0\0\0";
/// let buffer = NulBuffer::new(&mut storage).unwrap();
/// assert_eq!(buffer.as_bytes(), b"abc");
/// assert_eq!(buffer.len(), 3);
/// assert_eq!(buffer.capacity(), 6);
/// ```
#[derive(Debug)]
pub struct NulBuffer<'a> {
    storage: &'a mut [u8],
    len: usize,
}

impl<'a> NulBuffer<'a> {
    /// Wraps `storage`, locating its terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::Unterminated`] if `storage` has no NUL byte.
    pub fn new(storage: &'a mut [u8]) -> Result<Self, ReplaceError> {
        let len = storage
            .iter()
            .position(|&b| b == 0)
            .ok_or(ReplaceError::Unterminated)?;
        Ok(Self { storage, len })
    }

    /// Length of the text, terminator excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the underlying storage, terminator included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The text, terminator excluded.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// The text as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Overwrites the text with `text` and terminates it.
    ///
    /// Callers check `text.len() < self.capacity()` first.
    pub(crate) fn write(&mut self, text: &[u8]) {
        debug_assert!(text.len() < self.storage.len());
        self.storage[..text.len()].copy_from_slice(text);
        self.storage[text.len()] = 0;
        self.len = text.len();
    }
}
