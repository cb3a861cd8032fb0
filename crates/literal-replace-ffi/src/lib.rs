//! C ABI for `literal-replace`.
//!
//! Compiled programs link these symbols to rewrite NUL-terminated strings.
//! Pointers are borrowed for the duration of a call only. Strings returned by
//! [`literal_replace`] are owned by the caller and must be released with
//! [`literal_replace_free`].

use std::ffi::{CStr, CString, c_char, c_int};

use literal_replace::{Argument, BString, NulBuffer, ReplaceError, replace_all, replace_in_place};

/// The buffer was rewritten.
pub const LITERAL_REPLACE_OK: c_int = 0;
/// A required pointer was null.
pub const LITERAL_REPLACE_INVALID_ARGUMENT: c_int = 1;
/// The pattern was the empty string.
pub const LITERAL_REPLACE_EMPTY_PATTERN: c_int = 2;
/// Scratch storage could not be acquired.
pub const LITERAL_REPLACE_ALLOCATION_FAILED: c_int = 3;
/// The result and its terminator do not fit in the buffer.
pub const LITERAL_REPLACE_CAPACITY_EXCEEDED: c_int = 4;
/// The buffer had no terminator within its capacity.
pub const LITERAL_REPLACE_UNTERMINATED: c_int = 5;

fn status(err: ReplaceError) -> c_int {
    match err {
        ReplaceError::InvalidArgument(_) => LITERAL_REPLACE_INVALID_ARGUMENT,
        ReplaceError::EmptyPattern => LITERAL_REPLACE_EMPTY_PATTERN,
        ReplaceError::AllocationFailed { .. } => LITERAL_REPLACE_ALLOCATION_FAILED,
        ReplaceError::CapacityExceeded { .. } => LITERAL_REPLACE_CAPACITY_EXCEEDED,
        ReplaceError::Unterminated => LITERAL_REPLACE_UNTERMINATED,
    }
}

/// Borrows a C string as bytes, naming `which` if the pointer is null.
///
/// # Safety
///
/// `s` must be null or a valid NUL-terminated C string that outlives `'a`.
unsafe fn arg<'a>(s: *const c_char, which: Argument) -> Result<&'a [u8], ReplaceError> {
    if s.is_null() {
        return Err(ReplaceError::InvalidArgument(which));
    }
    // SAFETY: non-null and NUL-terminated per caller contract.
    Ok(unsafe { CStr::from_ptr(s) }.to_bytes())
}

/// Replaces every occurrence of `pattern` in the string at `buffer`, in place.
///
/// `capacity` is the size of the storage at `buffer` in bytes, terminator
/// included. Returns [`LITERAL_REPLACE_OK`] on success. On any other status
/// the buffer is unchanged.
///
/// # Safety
///
/// - `buffer` must be null or point to `capacity` writable bytes containing a
///   NUL terminator.
/// - `pattern` and `replacement` must be null or valid NUL-terminated strings
///   that do not overlap `buffer`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn literal_replace_in_place(
    buffer: *mut c_char,
    capacity: usize,
    pattern: *const c_char,
    replacement: *const c_char,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let result = unsafe { in_place(buffer, capacity, pattern, replacement) };
    match result {
        Ok(()) => LITERAL_REPLACE_OK,
        Err(err) => {
            log::debug!("literal_replace_in_place: {err}");
            status(err)
        }
    }
}

/// # Safety
///
/// See [`literal_replace_in_place`].
unsafe fn in_place(
    buffer: *mut c_char,
    capacity: usize,
    pattern: *const c_char,
    replacement: *const c_char,
) -> Result<(), ReplaceError> {
    if buffer.is_null() {
        return Err(ReplaceError::InvalidArgument(Argument::Buffer));
    }
    // SAFETY: caller contract.
    let pattern = unsafe { arg(pattern, Argument::Pattern) }?;
    // SAFETY: caller contract.
    let replacement = unsafe { arg(replacement, Argument::Replacement) }?;
    // SAFETY: `buffer` is non-null and valid for `capacity` writable bytes
    // that nothing else references during the call.
    let storage = unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), capacity) };

    let mut buffer = NulBuffer::new(storage)?;
    replace_in_place(&mut buffer, pattern, replacement)?;
    Ok(())
}

/// Returns a newly allocated copy of `src` with every occurrence of `pattern`
/// replaced, or null on any failure.
///
/// Release the result with [`literal_replace_free`].
///
/// # Safety
///
/// Each pointer must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn literal_replace(
    src: *const c_char,
    pattern: *const c_char,
    replacement: *const c_char,
) -> *mut c_char {
    // SAFETY: forwarded caller contract.
    let replaced = unsafe { copied(src, pattern, replacement) };

    match replaced {
        // Inputs hold no NUL, so neither does the output.
        Ok(out) => CString::new(Vec::from(out)).map_or(std::ptr::null_mut(), CString::into_raw),
        Err(err) => {
            log::debug!("literal_replace: {err}");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
///
/// See [`literal_replace`].
unsafe fn copied(
    src: *const c_char,
    pattern: *const c_char,
    replacement: *const c_char,
) -> Result<BString, ReplaceError> {
    // SAFETY: caller contract.
    let src = unsafe { arg(src, Argument::Buffer) }?;
    // SAFETY: caller contract.
    let pattern = unsafe { arg(pattern, Argument::Pattern) }?;
    // SAFETY: caller contract.
    let replacement = unsafe { arg(replacement, Argument::Replacement) }?;
    replace_all(src, pattern, replacement)
}

/// Releases a string returned by [`literal_replace`]. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a pointer returned by [`literal_replace`] that has not
/// been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn literal_replace_free(s: *mut c_char) {
    if !s.is_null() {
        // SAFETY: `s` came from `CString::into_raw` per caller contract.
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Static, NUL-terminated description of a status code.
#[unsafe(no_mangle)]
pub extern "C" fn literal_replace_status_message(code: c_int) -> *const c_char {
    let message: &'static CStr = match code {
        LITERAL_REPLACE_OK => c"ok",
        LITERAL_REPLACE_INVALID_ARGUMENT => c"missing argument",
        LITERAL_REPLACE_EMPTY_PATTERN => c"pattern is empty",
        LITERAL_REPLACE_ALLOCATION_FAILED => c"unable to acquire scratch storage",
        LITERAL_REPLACE_CAPACITY_EXCEEDED => c"output does not fit in buffer",
        LITERAL_REPLACE_UNTERMINATED => c"buffer has no NUL terminator",
        _ => c"unknown status",
    };
    message.as_ptr()
}
