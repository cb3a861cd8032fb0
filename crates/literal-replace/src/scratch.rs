//! Transient storage for building one replacement's output.
//!
//! A [`ScratchBuffer`] lives for a single call. It is acquired before the scan
//! starts and dropped when the call returns, whichever way it returns.

use alloc::vec::Vec;

use bstr::BStr;

use crate::ReplaceError;

/// Provider of scratch storage.
///
/// Implementations hand out a buffer able to hold `size` bytes without
/// reallocating, or refuse with [`ReplaceError::AllocationFailed`].
pub trait ScratchAllocator {
    /// Acquires a buffer with room for exactly `size` bytes of output.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::AllocationFailed`] when the storage is not
    /// available.
    fn acquire(&mut self, size: usize) -> Result<ScratchBuffer, ReplaceError>;
}

impl<A: ScratchAllocator + ?Sized> ScratchAllocator for &mut A {
    fn acquire(&mut self, size: usize) -> Result<ScratchBuffer, ReplaceError> {
        (**self).acquire(size)
    }
}

/// Allocates from the global allocator.
///
/// Reservation is fallible, so an exhausted heap is reported instead of
/// aborting the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalScratch;

impl ScratchAllocator for GlobalScratch {
    fn acquire(&mut self, size: usize) -> Result<ScratchBuffer, ReplaceError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| ReplaceError::AllocationFailed { requested: size })?;
        Ok(ScratchBuffer { bytes, limit: size })
    }
}

/// Allocates from the global allocator but refuses any single request larger
/// than a fixed budget.
#[derive(Debug, Clone, Copy)]
pub struct BudgetedScratch {
    budget: usize,
}

impl BudgetedScratch {
    /// Creates an allocator that grants requests of at most `budget` bytes.
    #[must_use]
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    /// Largest request this allocator grants.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }
}

impl ScratchAllocator for BudgetedScratch {
    fn acquire(&mut self, size: usize) -> Result<ScratchBuffer, ReplaceError> {
        if size > self.budget {
            return Err(ReplaceError::AllocationFailed { requested: size });
        }
        GlobalScratch.acquire(size)
    }
}

/// Returned when a write would take a [`ScratchBuffer`] past its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchFull;

/// Bounded output buffer handed out by a [`ScratchAllocator`].
///
/// Writes never grow it past the limit it was acquired with.
pub struct ScratchBuffer {
    bytes: Vec<u8>,
    limit: usize,
}

impl ScratchBuffer {
    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Most bytes this buffer will accept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends `bytes`, or nothing at all if they would not fit.
    ///
    /// # Errors
    ///
    /// Returns [`ScratchFull`] when the limit would be exceeded.
    pub fn try_extend(&mut self, bytes: &[u8]) -> Result<(), ScratchFull> {
        if bytes.len() > self.limit - self.bytes.len() {
            return Err(ScratchFull);
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`ScratchFull`] when the buffer is already at its limit.
    pub fn try_push(&mut self, byte: u8) -> Result<(), ScratchFull> {
        self.try_extend(&[byte])
    }

    /// Consumes the buffer, returning what was written.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl core::fmt::Debug for ScratchBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchBuffer")
            .field("bytes", &BStr::new(&self.bytes))
            .field("limit", &self.limit)
            .finish()
    }
}
