// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! C ABI for the vidpipe playback layer.
//!
//! A host application runtime (typically one driving its own UI thread and
//! isolates) loads this library and talks to it through the `vidpipe_*`
//! entry points in [`api`]. Players are addressed by positive integer
//! handles from a process-wide table; every fallible entry point returns
//! zero or a positive value on success and a negative [`Error`] code on
//! failure, and never unwinds across the boundary.
//!
//! On Android the library additionally exports the JNI surface lifecycle
//! callbacks the platform view invokes directly.

mod api;
mod error;
mod ffi;
mod state;

#[cfg(target_os = "android")]
mod android;

pub use api::*;
pub use error::Error;
