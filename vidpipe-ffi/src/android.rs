// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Android surface lifecycle glue.
//!
//! The platform view calls these JNI exports directly when its `Surface` is
//! created, recreated or destroyed. Both callbacks run on whatever thread
//! the Java side happens to use; the player serializes them internally.
//!
//! JNI carries no user-data slot, so events are routed to the player the
//! host attached via `vidpipe_surface_attach_player`.

use jni::JNIEnv;
use jni::objects::JObject;
use ndk::native_window::NativeWindow;
use tracing::{debug, warn};

use vidpipe::PlatformWindow;

use crate::state::State;

/// An `ANativeWindow` acquired from a Java `Surface`.
///
/// The acquisition holds a reference on the platform window; dropping this
/// wrapper releases it again, which is exactly the release the unbind path
/// owes the platform.
struct AndroidWindow {
    window: NativeWindow,
}

impl PlatformWindow for AndroidWindow {
    fn raw_handle(&self) -> usize {
        self.window.ptr().as_ptr() as usize
    }
}

/// Surface created or recreated: bind it to the attached player.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_vidpipe_SurfaceBridge_nativeSurfaceInit(
    env: JNIEnv,
    _this: JObject,
    surface: JObject,
) {
    // Safety: the env and surface come straight from the JVM and are valid
    // for the duration of this call; from_surface acquires its own ref.
    let window = unsafe {
        NativeWindow::from_surface(env.get_raw() as *mut _, surface.as_raw() as *mut _)
    };
    let Some(window) = window else {
        warn!("could not acquire a native window from the surface");
        return;
    };
    debug!(handle = window.ptr().as_ptr() as usize, "surface created");

    let player = match State::lock().surface_consumer() {
        Ok(player) => player,
        Err(err) => {
            warn!("dropping surface event: {err}");
            return;
        }
    };

    if let Err(err) = player.bind_surface(Box::new(AndroidWindow { window })) {
        warn!("failed to bind surface: {err}");
    }
}

/// Surface about to be destroyed: detach the overlay and release the window.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_vidpipe_SurfaceBridge_nativeSurfaceFinalize(
    _env: JNIEnv,
    _this: JObject,
) {
    let player = match State::lock().surface_consumer() {
        Ok(player) => player,
        Err(err) => {
            warn!("dropping surface teardown: {err}");
            return;
        }
    };

    if let Err(err) = player.unbind_surface() {
        warn!("failed to unbind surface: {err}");
    }
}
