// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! # vidpipe — embeddable media playback layer
//!
//! vidpipe builds and drives a GStreamer decode pipeline (file source →
//! container demux → parser → decoder → video sink) and binds the decoded
//! video to a platform window, on behalf of a host application runtime that
//! talks to it through the companion `vidpipe-ffi` crate. Demuxing, decoding
//! and rendering are GStreamer's job; this crate owns pipeline construction,
//! lifecycle and surface bookkeeping.
//!
//! ### Key Concepts
//!
//! - **Pipeline**: the directed chain of processing elements, assembled from
//!   a [`PipelineConfig`] and owned by a [`Player`]
//! - **Pad resolution**: the demuxer's output streams only become known at
//!   runtime; the matching stream is attached to the parser from a callback
//! - **Overlay**: a capability of the video sink that accepts a platform
//!   window handle to render into
//! - **Surface binding**: the `{unbound, bound}` bookkeeping for the window
//!   the platform currently provides ([`SurfaceBinding`])
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐   build/play/stop   ┌──────────────────────────────┐
//! │ Player │ ──────────────────► │ filesrc ► demux ─ ► parser   │
//! │        │                     │             (pad-added)  │   │
//! │        │   bind/unbind       │        decoder ◄─────────┘   │
//! │        │ ◄── window handle ─ │        sink (video overlay)  │
//! └────────┘                     └──────────────────────────────┘
//! ```
//!
//! ## Examples
//!
//! ```no_run
//! use vidpipe::{PipelineConfig, Player};
//!
//! # fn main() -> Result<(), vidpipe::Error> {
//! gstreamer::init()?;
//!
//! let config = PipelineConfig::from_json(
//!     r#"{"source": {"location": "/media/clip.mp4"}}"#,
//! )?;
//! let player = Player::new(config)?;
//! player.build()?;
//! player.play()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! [`Player`] is `Send + Sync`; pad-resolution and surface callbacks arrive
//! on framework and platform threads and serialize against build/play/stop
//! on the player's internal mutex. One player drives one pipeline; create as
//! many players as you need pipelines.

mod error;
mod pipeline;
mod surface;

pub mod config;

pub use config::{GraphConfig, PipelineConfig, SourceConfig};
pub use error::{Error, Result};
pub use pipeline::Player;
pub use surface::{BindOutcome, PlatformWindow, SurfaceBinding, VideoTarget};
