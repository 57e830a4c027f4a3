// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Plays a media file headlessly for a few seconds.
//!
//! ```sh
//! cargo run --example play -- --location /path/to/clip.mp4
//! ```

use clap::Parser;
use vidpipe::{PipelineConfig, Player};

#[derive(Parser, Debug)]
struct Args {
    /// Media file to play.
    #[arg(long, default_value = vidpipe::config::DEFAULT_LOCATION)]
    location: String,

    /// Video sink factory; fakesink decodes without a window.
    #[arg(long, default_value = vidpipe::config::DEFAULT_SINK)]
    sink: String,

    /// How long to play before tearing down, in seconds.
    #[arg(long, default_value_t = 10)]
    seconds: u64,
}

fn main() -> Result<(), vidpipe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
    gstreamer::init()?;

    let args = Args::parse();
    let mut config = PipelineConfig::default();
    config.source.location = args.location;
    config.graph.sink = args.sink;

    let player = Player::new(config)?;
    player.build()?;
    player.play()?;

    std::thread::sleep(std::time::Duration::from_secs(args.seconds));

    player.stop()
}
