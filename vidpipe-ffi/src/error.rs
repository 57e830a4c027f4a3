// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Error-to-code mapping for the C boundary.

/// Everything that can go wrong inside an entry point.
///
/// Each variant has a stable negative code so the host side can distinguish
/// failure classes without parsing strings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The handle is zero, negative, or names no live player.
    #[error("invalid player handle")]
    InvalidHandle,

    /// A required pointer argument was null.
    #[error("invalid pointer")]
    InvalidPointer,

    /// A string argument was not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// No player is attached as the surface consumer.
    #[error("no player is attached for surface events")]
    NoSurfaceConsumer,

    /// The process-wide init failed.
    #[error("initialization failed: {0}")]
    Init(String),

    /// A failure reported by the playback layer.
    #[error(transparent)]
    Player(#[from] vidpipe::Error),

    /// A panic was caught at the boundary.
    #[error("internal panic")]
    Panic,
}

impl Error {
    /// The negative status code reported across the boundary.
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidHandle => -1,
            Error::InvalidPointer => -2,
            Error::Utf8(_) => -3,
            Error::NoSurfaceConsumer => -4,
            Error::Init(_) => -5,
            Error::Player(err) => match err {
                vidpipe::Error::Config(_) | vidpipe::Error::ConfigParse(_) => -10,
                vidpipe::Error::ElementCreate { .. } => -11,
                vidpipe::Error::Link { .. } => -12,
                vidpipe::Error::StateChange(_) => -13,
                vidpipe::Error::AlreadyBuilt => -14,
                vidpipe::Error::NoPipeline => -15,
                vidpipe::Error::NoOverlay => -16,
                vidpipe::Error::Glib(_) => -17,
            },
            Error::Panic => -99,
        }
    }
}
