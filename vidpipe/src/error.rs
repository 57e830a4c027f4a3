// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for pipeline operations.
//!
//! Every fallible operation in this crate returns a typed error instead of
//! printing a diagnostic and returning silently. Callers can decide between
//! retry, reconfigure and abort based on the variant.

use gstreamer as gst;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while constructing or driving a pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element factory lookup failed, usually because the plugin providing
    /// the element is not installed.
    #[error("No such element factory \"{factory}\"")]
    ElementCreate {
        /// The factory name that could not be resolved.
        factory: String,
    },

    /// A static link between two pipeline stages was refused.
    #[error("Failed to link {upstream} to {downstream}")]
    Link {
        /// Factory name of the upstream element.
        upstream: String,
        /// Factory name of the downstream element.
        downstream: String,
    },

    /// The framework refused a pipeline state transition.
    #[error("State change refused: {0}")]
    StateChange(#[from] gst::StateChangeError),

    /// [`crate::Player::build`] was called on a player that already holds a
    /// pipeline.
    #[error("Pipeline has already been built")]
    AlreadyBuilt,

    /// An operation that needs a pipeline was called before
    /// [`crate::Player::build`] or after teardown.
    #[error("No pipeline has been built")]
    NoPipeline,

    /// A surface bind was requested but no element in the pipeline implements
    /// the video overlay interface.
    #[error("No element in the pipeline implements the video overlay interface")]
    NoOverlay,

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configuration string was not valid JSON.
    #[error("Configuration is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A generic failure propagated from the GStreamer bindings.
    #[error(transparent)]
    Glib(#[from] glib::BoolError),
}
