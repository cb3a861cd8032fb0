//! Literal substring replacement for language toolchain runtimes.
//!
//! Every non-overlapping occurrence of a literal pattern is replaced, scanning
//! left to right. Text emitted for a replacement is never scanned again, so a
//! replacement that contains its own pattern expands exactly once.
//!
//! ```rust
//! use literal_replace::{ReplaceError, replace_all, replace_all_str};
//!
//! assert_eq!(replace_all_str("hello world", "world", "there").unwrap(), "hello there");
//! assert_eq!(replace_all(b"aaaa", b"aa", b"a").unwrap(), "aa");
//! assert_eq!(replace_all(b"abc", b"", b"x"), Err(ReplaceError::EmptyPattern));
//! ```
//!
//! The output is built in scratch storage obtained from a [`ScratchAllocator`]
//! and sized exactly by a counting prepass. Writing back into caller storage
//! ([`replace_in_place`]) checks the caller's capacity first and fails without
//! touching the buffer when the result would not fit.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod matcher;
mod nul_buffer;
mod options;
mod replacer;
mod scratch;

#[cfg(test)]
mod tests;

pub use error::{Argument, ReplaceError};
pub use matcher::{Occurrences, count_occurrences, occurrences};
pub use nul_buffer::NulBuffer;
pub use options::{ReplaceOptions, ScratchSizing};
pub use replacer::{
    Replaced, SubstringReplacer, output_len, replace_all, replace_all_str, replace_in_place,
};
pub use scratch::{BudgetedScratch, GlobalScratch, ScratchAllocator, ScratchBuffer, ScratchFull};

pub use bstr::BString;
