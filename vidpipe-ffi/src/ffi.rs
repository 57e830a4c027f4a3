// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Boundary plumbing shared by every entry point.

use std::ffi::{CStr, c_char};

use tracing::error;

use crate::Error;

/// Positive handle addressing a player in the table.
pub type Id = i32;

/// Runs an entry point body, converting its outcome and any panic into a
/// status code. Nothing may unwind into the host runtime.
pub fn return_code<C: ReturnCode, F: FnOnce() -> C>(f: F) -> i32 {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(ret) => ret.code(),
        Err(_) => {
            error!("panic caught at the FFI boundary");
            Error::Panic.code()
        }
    }
}

/// Conversion of entry-point outcomes to the status-code convention:
/// zero or positive on success, negative on failure.
pub trait ReturnCode {
    fn code(&self) -> i32;
}

impl ReturnCode for Result<(), Error> {
    fn code(&self) -> i32 {
        match self {
            Ok(()) => 0,
            Err(err) => {
                error!("{err}");
                err.code()
            }
        }
    }
}

impl ReturnCode for Result<Id, Error> {
    fn code(&self) -> i32 {
        match self {
            Ok(id) => *id,
            Err(err) => {
                error!("{err}");
                err.code()
            }
        }
    }
}

/// Validates a handle coming in from the host side.
pub fn parse_id(id: i32) -> Result<Id, Error> {
    if id > 0 { Ok(id) } else { Err(Error::InvalidHandle) }
}

/// Borrows a C string for the duration of a call.
///
/// # Safety
///
/// `cstr` must be null or a valid null-terminated C string that outlives
/// `'a`.
pub unsafe fn parse_str<'a>(cstr: *const c_char) -> Result<&'a str, Error> {
    if cstr.is_null() {
        return Err(Error::InvalidPointer);
    }
    let string = unsafe { CStr::from_ptr(cstr) };
    Ok(string.to_str()?)
}

/// Like [`parse_str`], but a null pointer reads as the empty string, for
/// arguments where "not given" is a meaningful value.
///
/// # Safety
///
/// Same contract as [`parse_str`].
pub unsafe fn parse_str_opt<'a>(cstr: *const c_char) -> Result<&'a str, Error> {
    if cstr.is_null() {
        return Ok("");
    }
    unsafe { parse_str(cstr) }
}
