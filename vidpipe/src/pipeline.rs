// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline construction and lifecycle.
//!
//! [`Player`] is the caller-owned context object for one decode pipeline:
//!
//! ```text
//! filesrc ──► demux ─ ─► parser ──► decoder ──► sink
//!                  (dynamic)
//! ```
//!
//! The source→demux and parser→decoder→sink links are wired statically at
//! build time. The demux→parser link cannot be: a demuxer only knows its
//! output streams once it has read the container, so the builder registers a
//! pad-added callback that attaches the parser when a stream with the
//! configured codec caps appears. That callback runs on a GStreamer
//! streaming thread, outside the caller's control flow, which is why all
//! mutable player state lives behind a mutex and the callback itself is
//! handed only the parser element and the caps prefix — never the player.

use std::sync::Mutex;

use gst::prelude::*;
use gst_video::prelude::*;
use gstreamer as gst;
use gstreamer_video as gst_video;
use tracing::{debug, info, warn};

use crate::surface::{BindOutcome, PlatformWindow, SurfaceBinding, VideoTarget};
use crate::{Error, PipelineConfig, Result};

/// A single decode pipeline and its surface binding.
///
/// The player assumes `gst::init()` has been called once for the process;
/// the FFI layer does this in its init entry point, standalone users do it
/// themselves.
///
/// All entry points take `&self`: the player is `Send + Sync` and calls
/// arriving from platform or framework threads serialize on the internal
/// mutex.
///
/// # Examples
///
/// ```no_run
/// use vidpipe::{PipelineConfig, Player};
///
/// # fn main() -> Result<(), vidpipe::Error> {
/// gstreamer::init()?;
///
/// let config = PipelineConfig::from_json(
///     r#"{"source": {"location": "/media/clip.mp4"}}"#,
/// )?;
/// let player = Player::new(config)?;
/// player.build()?;
/// player.play()?;
/// // ... later ...
/// player.stop()?;
/// # Ok(())
/// # }
/// ```
pub struct Player {
    config: PipelineConfig,
    inner: Mutex<Inner>,
}

/// State only valid between `build()` and teardown.
#[derive(Default)]
struct Inner {
    pipeline: Option<gst::Pipeline>,
    overlay: Option<gst_video::VideoOverlay>,
    surface: SurfaceBinding,
}

impl Player {
    /// Creates a player for the given configuration.
    ///
    /// Nothing is constructed yet; the configuration is validated and kept
    /// until [`Player::build`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration fails validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Player {
            config,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// The configuration this player was created with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Builds the pipeline and brings it to the ready state.
    ///
    /// Creates the five elements, links everything that can be linked
    /// statically, registers the pad-added callback for the demuxed stream,
    /// transitions to `Ready` and looks up the video-overlay sink. On any
    /// failure the partially built graph is dropped as a whole; a failed
    /// build leaves the player exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyBuilt`] if a pipeline already exists.
    /// - [`Error::ElementCreate`] if an element factory is missing.
    /// - [`Error::Link`] if a static link is refused.
    /// - [`Error::StateChange`] if the ready transition is refused.
    pub fn build(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.pipeline.is_some() {
            return Err(Error::AlreadyBuilt);
        }

        let graph = &self.config.graph;

        let source = gst::ElementFactory::make("filesrc")
            .property("location", self.config.source.location.as_str())
            .build()
            .map_err(|_| Error::ElementCreate {
                factory: "filesrc".to_owned(),
            })?;
        let demux = make_element(&graph.demux)?;
        let parser = make_element(&graph.parser)?;
        let decoder = make_element(&graph.decoder)?;
        let sink = make_element(&graph.sink)?;

        let pipeline = gst::Pipeline::builder().name("vidpipe-decode").build();
        pipeline.add_many([&source, &demux, &parser, &decoder, &sink])?;

        source.link(&demux).map_err(|_| Error::Link {
            upstream: "filesrc".to_owned(),
            downstream: graph.demux.clone(),
        })?;
        gst::Element::link_many([&parser, &decoder, &sink]).map_err(|_| Error::Link {
            upstream: graph.parser.clone(),
            downstream: graph.sink.clone(),
        })?;

        // The callback outlives this scope and runs on a streaming thread;
        // it gets a weak ref to the parser and the caps prefix, nothing else.
        let parser_weak = parser.downgrade();
        let codec_caps = graph.codec_caps.clone();
        demux.connect_pad_added(move |_, pad| {
            let Some(parser) = parser_weak.upgrade() else {
                return;
            };
            link_demuxed_pad(pad, &parser, &codec_caps);
        });

        pipeline.set_state(gst::State::Ready)?;

        let overlay = pipeline
            .by_interface(gst_video::VideoOverlay::static_type())
            .and_then(|element| element.dynamic_cast::<gst_video::VideoOverlay>().ok());
        if overlay.is_none() {
            debug!(sink = %graph.sink, "sink does not implement the video overlay interface");
        }

        info!(location = %self.config.source.location, "pipeline built and ready");
        inner.pipeline = Some(pipeline);
        inner.overlay = overlay;
        Ok(())
    }

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// - [`Error::NoPipeline`] before [`Player::build`] or after teardown.
    /// - [`Error::StateChange`] if the playing transition is refused; the
    ///   pipeline stays intact so the caller can retry or tear down.
    pub fn play(&self) -> Result<()> {
        let inner = self.inner.lock().unwrap();
        let pipeline = inner.pipeline.as_ref().ok_or(Error::NoPipeline)?;
        pipeline.set_state(gst::State::Playing)?;
        info!("pipeline playing");
        Ok(())
    }

    /// Tears the pipeline down.
    ///
    /// Transitions to `Null` and releases the pipeline. Safe to call at any
    /// time: without a built pipeline it is a no-op, so teardown after a
    /// failed build never touches a missing handle. The player can be built
    /// again afterwards.
    pub fn stop(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.shutdown();
        Ok(())
    }

    /// The pipeline's current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPipeline`] if no pipeline is built.
    pub fn state(&self) -> Result<gst::State> {
        let inner = self.inner.lock().unwrap();
        let pipeline = inner.pipeline.as_ref().ok_or(Error::NoPipeline)?;
        let (_, current, _) = pipeline.state(gst::ClockTime::ZERO);
        Ok(current)
    }

    /// Binds a platform window to the pipeline's video overlay.
    ///
    /// See [`SurfaceBinding::bind`] for the same-window and rebind cases.
    /// After a successful bind the pipeline's current state is queried and
    /// logged, which host-side tooling can correlate with surface events.
    ///
    /// # Errors
    ///
    /// - [`Error::NoPipeline`] if no pipeline is built.
    /// - [`Error::NoOverlay`] if the sink has no overlay interface.
    pub fn bind_surface(&self, window: Box<dyn PlatformWindow>) -> Result<BindOutcome> {
        let mut inner = self.inner.lock().unwrap();
        let Inner {
            pipeline,
            overlay,
            surface,
        } = &mut *inner;
        let pipeline = pipeline.as_ref().ok_or(Error::NoPipeline)?;
        let overlay = overlay.as_ref().ok_or(Error::NoOverlay)?;

        let outcome = surface.bind(window, &OverlayTarget { pipeline, overlay });

        let (_, current, _) = pipeline.state(gst::ClockTime::ZERO);
        debug!(?outcome, state = ?current, "surface bound");
        Ok(outcome)
    }

    /// Unbinds the current platform window, if any.
    ///
    /// The overlay's window handle is cleared and the pipeline suspended to
    /// `Ready` before the window itself is released.
    ///
    /// # Errors
    ///
    /// - [`Error::NoPipeline`] if no pipeline is built.
    /// - [`Error::NoOverlay`] if the sink has no overlay interface.
    pub fn unbind_surface(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let Inner {
            pipeline,
            overlay,
            surface,
        } = &mut *inner;
        let pipeline = pipeline.as_ref().ok_or(Error::NoPipeline)?;
        let overlay = overlay.as_ref().ok_or(Error::NoOverlay)?;

        surface.unbind(&OverlayTarget { pipeline, overlay });
        Ok(())
    }
}

impl Inner {
    /// Releases the pipeline, dropping the overlay view with it.
    ///
    /// The overlay is a borrowed capability of a sink the pipeline owns; it
    /// must not survive the pipeline.
    fn shutdown(&mut self) {
        self.overlay = None;
        if let Some(pipeline) = self.pipeline.take() {
            if let Err(err) = pipeline.set_state(gst::State::Null) {
                warn!("null transition refused during teardown: {err}");
            }
            info!("pipeline released");
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.inner.lock().unwrap().shutdown();
    }
}

/// Creates an element by factory name.
fn make_element(factory: &str) -> Result<gst::Element> {
    gst::ElementFactory::make(factory)
        .build()
        .map_err(|_| Error::ElementCreate {
            factory: factory.to_owned(),
        })
}

/// Handles a pad the demuxer exposed for a discovered stream.
///
/// Links the parser's sink pad if and only if the stream's caps name carries
/// the configured codec prefix and the parser is not already fed by an
/// earlier stream. Runs on a streaming thread; failures are logged, not
/// escalated — there is no caller here to escalate to.
fn link_demuxed_pad(pad: &gst::Pad, parser: &gst::Element, codec_caps: &str) {
    let caps = pad.query_caps(None);
    if !caps_matches_codec(&caps, codec_caps) {
        debug!(pad = %pad.name(), "ignoring demuxed stream without {codec_caps} caps");
        return;
    }

    let Some(sink_pad) = parser.static_pad("sink") else {
        warn!(parser = %parser.name(), "parser has no sink pad");
        return;
    };
    if sink_pad.is_linked() {
        debug!(pad = %pad.name(), "parser already linked, ignoring further stream");
        return;
    }

    match pad.link(&sink_pad) {
        Ok(_) => info!(pad = %pad.name(), "linked demuxed stream to parser"),
        Err(err) => warn!(pad = %pad.name(), "failed to link demuxed stream: {err}"),
    }
}

/// True when the first caps structure carries the codec prefix.
fn caps_matches_codec(caps: &gst::CapsRef, prefix: &str) -> bool {
    caps.structure(0)
        .is_some_and(|structure| structure.name().starts_with(prefix))
}

/// Adapter driving the real overlay and pipeline from the surface logic.
struct OverlayTarget<'a> {
    pipeline: &'a gst::Pipeline,
    overlay: &'a gst_video::VideoOverlay,
}

impl VideoTarget for OverlayTarget<'_> {
    fn set_window_handle(&self, handle: usize) {
        // Safety: the handle is a live platform window; SurfaceBinding keeps
        // the owning PlatformWindow alive for as long as it is set here.
        unsafe { self.overlay.set_window_handle(handle) };
    }

    fn clear_window_handle(&self) {
        // Safety: a zero handle detaches the overlay.
        unsafe { self.overlay.set_window_handle(0) };
    }

    fn expose(&self) {
        self.overlay.expose();
    }

    fn suspend(&self) {
        if let Err(err) = self.pipeline.set_state(gst::State::Ready) {
            warn!("ready transition refused while unbinding surface: {err}");
        }
    }
}
