// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! The exported entry points.
//!
//! Conventions, shared by every function here:
//!
//! - players are addressed by the positive handle returned from
//!   [`vidpipe_player_new`]; zero and negative values are never valid
//! - fallible functions return `0` (or a positive handle) on success and a
//!   negative [`crate::Error`] code on failure
//! - no call unwinds into the host runtime

use std::ffi::{c_char, c_void};
use std::sync::OnceLock;

use tracing::debug;

use vidpipe::{PipelineConfig, PlatformWindow, Player};

use crate::Error;
use crate::ffi;
use crate::state::State;

/// One-time process setup: logging and the multimedia framework.
///
/// Must be called once before any other entry point. Further calls are
/// no-ops that report the first call's outcome, so a host runtime that
/// restarts its own engine cannot re-initialize the framework underneath
/// live pipelines.
///
/// `log_level` is one of `"trace"`, `"debug"`, `"info"`, `"warn"`,
/// `"error"`; null or empty selects `"info"`. The `RUST_LOG` environment
/// variable still takes precedence.
///
/// # Safety
///
/// `log_level` must be null or a valid null-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpipe_init(log_level: *const c_char) -> i32 {
    static INIT: OnceLock<i32> = OnceLock::new();

    *INIT.get_or_init(|| {
        ffi::return_code(|| -> Result<(), Error> {
            let level = match unsafe { ffi::parse_str_opt(log_level) }? {
                "" => tracing::level_filters::LevelFilter::INFO,
                level => level
                    .parse()
                    .map_err(|_| Error::Init(format!("unknown log level \"{level}\"")))?,
            };

            // try_init: embedding hosts may already have installed a
            // subscriber for the process.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::builder()
                        .with_default_directive(level.into())
                        .from_env_lossy(),
                )
                .try_init();

            gstreamer::init().map_err(|err| Error::Init(err.to_string()))?;
            Ok(())
        })
    })
}

/// Creates a player from a JSON pipeline configuration.
///
/// `config_json` is the JSON form of the pipeline configuration; null or
/// empty selects the default decode graph. Returns a positive player handle,
/// or a negative code if the configuration is unusable.
///
/// Call [`vidpipe_player_free`] to release the player.
///
/// # Safety
///
/// `config_json` must be null or a valid null-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpipe_player_new(config_json: *const c_char) -> i32 {
    ffi::return_code(|| -> Result<ffi::Id, Error> {
        let config = match unsafe { ffi::parse_str_opt(config_json) }? {
            "" => PipelineConfig::default(),
            json => PipelineConfig::from_json(json).map_err(Error::Player)?,
        };
        let player = Player::new(config).map_err(Error::Player)?;
        State::lock().insert(player)
    })
}

/// Builds the player's pipeline and brings it to the ready state.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_player_build(player: i32) -> i32 {
    with_player(player, |player| player.build())
}

/// Starts playback.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_player_play(player: i32) -> i32 {
    with_player(player, |player| player.play())
}

/// Tears the pipeline down without releasing the handle. The player can be
/// built again afterwards.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_player_stop(player: i32) -> i32 {
    with_player(player, |player| player.stop())
}

/// Tears the player down and releases its handle.
///
/// The handle is invalid after this call, even when a negative code is
/// returned for the teardown itself.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_player_free(player: i32) -> i32 {
    ffi::return_code(|| -> Result<(), Error> {
        let id = ffi::parse_id(player)?;
        let player = State::lock().remove(id)?;
        // Tear down now rather than when the last Arc clone drops; in-flight
        // calls on other threads may briefly keep the player alive.
        player.stop().map_err(Error::Player)
    })
}

/// Designates the player that receives platform surface events.
///
/// The Android JNI surface callbacks carry no user data, so they are routed
/// to the player attached here.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_surface_attach_player(player: i32) -> i32 {
    ffi::return_code(|| -> Result<(), Error> {
        let id = ffi::parse_id(player)?;
        State::lock().attach_surface_consumer(id)
    })
}

/// Binds a raw platform window handle to the player's video overlay.
///
/// The window stays owned by the caller; vidpipe only forwards the handle
/// to the overlay and forgets it again on unbind or teardown. Platforms
/// whose windows vidpipe must release itself (Android) go through the JNI
/// path instead.
///
/// # Safety
///
/// `window` must be a live native window handle in whatever representation
/// the sink's overlay interface expects on this platform, and must outlive
/// the binding.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vidpipe_surface_bind(player: i32, window: *mut c_void) -> i32 {
    ffi::return_code(|| -> Result<(), Error> {
        if window.is_null() {
            return Err(Error::InvalidPointer);
        }
        let id = ffi::parse_id(player)?;
        let player = State::lock().player(id)?;
        let window = RawWindow {
            handle: window as usize,
        };
        player.bind_surface(Box::new(window)).map_err(Error::Player)?;
        Ok(())
    })
}

/// Unbinds whatever window is bound to the player's video overlay.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_surface_unbind(player: i32) -> i32 {
    with_player(player, |player| player.unbind_surface())
}

/// A very short-lived call, safe to make from the host's main execution
/// context: it blocks the caller only for the duration of the addition.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_sum(a: isize, b: isize) -> isize {
    a + b
}

/// A long-running call that occupies the calling thread for five seconds.
///
/// Hosts must dispatch calls like this one to a worker isolate or thread;
/// made from the main execution context it stalls the host's event loop for
/// the whole duration.
#[unsafe(no_mangle)]
pub extern "C" fn vidpipe_sum_long_running(a: isize, b: isize) -> isize {
    std::thread::sleep(std::time::Duration::from_secs(5));
    a + b
}

/// Looks a player up and runs one of its fallible operations, with the
/// table lock released before the operation itself.
fn with_player(id: i32, f: impl FnOnce(&Player) -> vidpipe::Result<()>) -> i32 {
    ffi::return_code(|| -> Result<(), Error> {
        let id = ffi::parse_id(id)?;
        let player = State::lock().player(id)?;
        f(&player).map_err(Error::Player)
    })
}

/// A window handle owned by the host; releasing the underlying platform
/// resource is the host's job, so dropping this is a no-op.
struct RawWindow {
    handle: usize,
}

impl PlatformWindow for RawWindow {
    fn raw_handle(&self) -> usize {
        self.handle
    }
}

impl Drop for RawWindow {
    fn drop(&mut self) {
        // Ownership stays with the host; nothing to release here.
        debug!(handle = self.handle, "forgetting host-owned window handle");
    }
}
