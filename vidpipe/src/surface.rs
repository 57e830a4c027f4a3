// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Platform surface binding.
//!
//! The host platform hands this layer a native window to render into, and may
//! do so repeatedly: the same window again after a view was recreated, a
//! different window after a rotation, or nothing at all when the view goes
//! away. [`SurfaceBinding`] is the state machine over `{unbound, bound}` that
//! keeps the bookkeeping straight, expressed against two small seams
//! ([`PlatformWindow`] and [`VideoTarget`]) so the ordering contract can be
//! exercised without a running pipeline.

use tracing::debug;

/// A native window handle owned by the platform.
///
/// Implementations wrap whatever the platform hands out (an `ANativeWindow`
/// on Android, an opaque pointer from a generic host) and release the
/// underlying platform resource in their `Drop`, so dropping the box *is*
/// the release.
pub trait PlatformWindow: Send {
    /// The raw handle value passed to the video overlay.
    ///
    /// Two [`PlatformWindow`]s are the same window exactly when their raw
    /// handles are equal.
    fn raw_handle(&self) -> usize;
}

/// What the surface logic needs from the rendering side.
///
/// The real implementation drives a video-overlay sink and the pipeline it
/// lives in; tests substitute a recorder.
pub trait VideoTarget {
    /// Bind a raw window handle to the overlay.
    fn set_window_handle(&self, handle: usize);

    /// Detach whatever window the overlay currently renders to.
    fn clear_window_handle(&self);

    /// Ask the overlay to repaint the current frame.
    fn expose(&self);

    /// Stop rendering into the surface (pipeline back to ready) before the
    /// window goes away.
    fn suspend(&self);
}

/// What [`SurfaceBinding::bind`] did with the incoming window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// Nothing was bound before; the window was adopted.
    Bound,
    /// A different window was bound; it was released and replaced.
    Rebound,
    /// The same window was already bound; only a repaint was requested.
    Exposed,
}

/// Tracks which platform window, if any, the overlay renders into.
#[derive(Default)]
pub struct SurfaceBinding {
    window: Option<Box<dyn PlatformWindow>>,
}

impl SurfaceBinding {
    /// Binds `window` to the target.
    ///
    /// Three cases, distinguished by the raw handle:
    ///
    /// - the same window is already bound: the duplicate acquisition is
    ///   dropped and two expose requests are issued — the host recreated its
    ///   view around the same native window and just needs a repaint;
    /// - a different window is bound: the old window is released first, then
    ///   the new one is adopted and set on the overlay;
    /// - nothing is bound: the window is adopted and set on the overlay.
    pub fn bind(&mut self, window: Box<dyn PlatformWindow>, target: &dyn VideoTarget) -> BindOutcome {
        if let Some(current) = &self.window {
            if current.raw_handle() == window.raw_handle() {
                debug!(handle = window.raw_handle(), "same window bound again");
                drop(window);
                target.expose();
                target.expose();
                return BindOutcome::Exposed;
            }
            let old = self.window.take();
            debug!(
                old = old.as_ref().map(|w| w.raw_handle()),
                new = window.raw_handle(),
                "replacing bound window"
            );
            // Release the previous window before the overlay learns about
            // its replacement.
            drop(old);
            let handle = window.raw_handle();
            self.window = Some(window);
            target.set_window_handle(handle);
            return BindOutcome::Rebound;
        }

        debug!(handle = window.raw_handle(), "binding window");
        target.set_window_handle(window.raw_handle());
        self.window = Some(window);
        BindOutcome::Bound
    }

    /// Unbinds whatever is bound.
    ///
    /// The overlay's window handle is cleared and rendering suspended before
    /// the platform window is released, in that order, whether or not a
    /// window is currently bound. The platform may have already invalidated
    /// the window on its side; the overlay must never observe a handle that
    /// is being torn down.
    pub fn unbind(&mut self, target: &dyn VideoTarget) {
        target.clear_window_handle();
        target.suspend();
        if let Some(window) = self.window.take() {
            debug!(handle = window.raw_handle(), "releasing window");
            drop(window);
        }
    }

    /// The raw handle of the currently bound window, if any.
    pub fn bound_handle(&self) -> Option<usize> {
        self.window.as_ref().map(|w| w.raw_handle())
    }
}

impl std::fmt::Debug for SurfaceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceBinding")
            .field("bound_handle", &self.bound_handle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Everything observable about a bind/unbind sequence, in order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        SetHandle(usize),
        ClearHandle,
        Expose,
        Suspend,
        Released(usize),
    }

    #[derive(Default)]
    struct Log(Arc<Mutex<Vec<Event>>>);

    impl Log {
        fn push(&self, event: Event) {
            self.0.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }

        fn share(&self) -> Arc<Mutex<Vec<Event>>> {
            self.0.clone()
        }
    }

    struct RecordingTarget(Arc<Mutex<Vec<Event>>>);

    impl VideoTarget for RecordingTarget {
        fn set_window_handle(&self, handle: usize) {
            self.0.lock().unwrap().push(Event::SetHandle(handle));
        }

        fn clear_window_handle(&self) {
            self.0.lock().unwrap().push(Event::ClearHandle);
        }

        fn expose(&self) {
            self.0.lock().unwrap().push(Event::Expose);
        }

        fn suspend(&self) {
            self.0.lock().unwrap().push(Event::Suspend);
        }
    }

    struct FakeWindow {
        id: usize,
        log: Arc<Mutex<Vec<Event>>>,
    }

    impl PlatformWindow for FakeWindow {
        fn raw_handle(&self) -> usize {
            self.id
        }
    }

    impl Drop for FakeWindow {
        fn drop(&mut self) {
            self.log.lock().unwrap().push(Event::Released(self.id));
        }
    }

    fn window(log: &Log, id: usize) -> Box<dyn PlatformWindow> {
        Box::new(FakeWindow {
            id,
            log: log.share(),
        })
    }

    #[test]
    fn first_bind_sets_the_handle() {
        let log = Log::default();
        let target = RecordingTarget(log.share());
        let mut binding = SurfaceBinding::default();

        assert_eq!(binding.bind(window(&log, 7), &target), BindOutcome::Bound);
        assert_eq!(binding.bound_handle(), Some(7));
        assert_eq!(log.events(), vec![Event::SetHandle(7)]);
    }

    #[test]
    fn rebinding_the_same_window_only_exposes_twice() {
        let log = Log::default();
        let target = RecordingTarget(log.share());
        let mut binding = SurfaceBinding::default();

        binding.bind(window(&log, 7), &target);
        assert_eq!(binding.bind(window(&log, 7), &target), BindOutcome::Exposed);

        // The duplicate acquisition is released; the original stays bound and
        // the overlay never sees a second assignment.
        assert_eq!(
            log.events(),
            vec![
                Event::SetHandle(7),
                Event::Released(7),
                Event::Expose,
                Event::Expose,
            ]
        );
        assert_eq!(binding.bound_handle(), Some(7));
    }

    #[test]
    fn rebinding_a_different_window_releases_the_old_one_first() {
        let log = Log::default();
        let target = RecordingTarget(log.share());
        let mut binding = SurfaceBinding::default();

        binding.bind(window(&log, 1), &target);
        assert_eq!(binding.bind(window(&log, 2), &target), BindOutcome::Rebound);

        assert_eq!(
            log.events(),
            vec![
                Event::SetHandle(1),
                Event::Released(1),
                Event::SetHandle(2),
            ]
        );
        assert_eq!(binding.bound_handle(), Some(2));
    }

    #[test]
    fn unbind_clears_and_suspends_before_releasing() {
        let log = Log::default();
        let target = RecordingTarget(log.share());
        let mut binding = SurfaceBinding::default();

        binding.bind(window(&log, 3), &target);
        binding.unbind(&target);

        assert_eq!(
            log.events(),
            vec![
                Event::SetHandle(3),
                Event::ClearHandle,
                Event::Suspend,
                Event::Released(3),
            ]
        );
        assert_eq!(binding.bound_handle(), None);
    }

    #[test]
    fn unbind_without_a_bound_window_still_clears_the_overlay() {
        let log = Log::default();
        let target = RecordingTarget(log.share());
        let mut binding = SurfaceBinding::default();

        binding.unbind(&target);

        assert_eq!(log.events(), vec![Event::ClearHandle, Event::Suspend]);
    }
}
