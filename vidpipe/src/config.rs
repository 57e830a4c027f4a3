// SPDX-FileCopyrightText: 2026 Contributors to the vidpipe project.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline configuration.
//!
//! A [`PipelineConfig`] describes the decode graph declaratively: the media
//! file to read and the factory names of the four downstream stages, plus the
//! caps-name prefix that selects which demuxed stream gets attached to the
//! parser. The configuration crosses the FFI boundary as a JSON string, so
//! every field carries a default and a host runtime only has to spell out
//! what it wants to change.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default media file location.
pub const DEFAULT_LOCATION: &str = "/sdcard/test.mp4";
/// Default container demuxer factory.
pub const DEFAULT_DEMUX: &str = "qtdemux";
/// Default stream parser factory.
pub const DEFAULT_PARSER: &str = "h264parse";
/// Default decoder factory.
pub const DEFAULT_DECODER: &str = "avdec_h264";
/// Default video sink factory.
pub const DEFAULT_SINK: &str = "autovideosink";
/// Default caps-name prefix selecting the demuxed stream to parse.
pub const DEFAULT_CODEC_CAPS: &str = "video/x-h264";

/// Declarative description of a decode pipeline.
///
/// The default value reproduces the fixed graph this layer was originally
/// built around:
///
/// ```text
/// filesrc location=/sdcard/test.mp4 ! qtdemux ! h264parse ! avdec_h264 ! autovideosink
/// ```
///
/// # Examples
///
/// ```
/// use vidpipe::PipelineConfig;
///
/// // Partial JSON is fine; unspecified fields keep their defaults.
/// let config = PipelineConfig::from_json(
///     r#"{"source": {"location": "/media/clip.mp4"}}"#,
/// ).unwrap();
/// assert_eq!(config.graph.demux, "qtdemux");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the media comes from.
    pub source: SourceConfig,
    /// The processing stages downstream of the source.
    pub graph: GraphConfig,
}

/// Source stage configuration. The source element is always `filesrc`; only
/// its location is negotiable.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Filesystem path of the media file to play.
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            location: DEFAULT_LOCATION.to_owned(),
        }
    }
}

/// Factory names for the demux, parse, decode and sink stages, and the
/// caps-name prefix used to pick the demuxed stream.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Container demuxer factory name.
    pub demux: String,
    /// Stream parser factory name.
    pub parser: String,
    /// Decoder factory name.
    pub decoder: String,
    /// Video sink factory name.
    pub sink: String,
    /// Caps-name prefix a demuxed stream must carry to be linked to the
    /// parser (e.g. `video/x-h264`).
    pub codec_caps: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            demux: DEFAULT_DEMUX.to_owned(),
            parser: DEFAULT_PARSER.to_owned(),
            decoder: DEFAULT_DECODER.to_owned(),
            sink: DEFAULT_SINK.to_owned(),
            codec_caps: DEFAULT_CODEC_CAPS.to_owned(),
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from its JSON form.
    ///
    /// Missing fields fall back to their defaults, so `"{}"` yields
    /// [`PipelineConfig::default`]. The parsed configuration is validated
    /// before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for malformed JSON and
    /// [`Error::Config`] for a structurally valid but unusable
    /// configuration (e.g. an empty factory name).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for fields a pipeline cannot be built from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.source.location.is_empty() {
            return Err(Error::Config("source location is empty".to_owned()));
        }
        for (field, value) in [
            ("graph.demux", &self.graph.demux),
            ("graph.parser", &self.graph.parser),
            ("graph.decoder", &self.graph.decoder),
            ("graph.sink", &self.graph.sink),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{field} names no element factory")));
            }
        }
        if self.graph.codec_caps.is_empty() {
            return Err(Error::Config(
                "graph.codec_caps is empty; every demuxed stream would match".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reproduces_fixed_graph() {
        let config = PipelineConfig::default();
        assert_eq!(config.source.location, "/sdcard/test.mp4");
        assert_eq!(config.graph.demux, "qtdemux");
        assert_eq!(config.graph.parser, "h264parse");
        assert_eq!(config.graph.decoder, "avdec_h264");
        assert_eq!(config.graph.sink, "autovideosink");
        assert_eq!(config.graph.codec_caps, "video/x-h264");
    }

    #[test]
    fn empty_json_is_the_default() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = PipelineConfig::from_json(
            r#"{
                "source": {"location": "/tmp/clip.mkv"},
                "graph": {"demux": "matroskademux"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.source.location, "/tmp/clip.mkv");
        assert_eq!(config.graph.demux, "matroskademux");
        assert_eq!(config.graph.parser, DEFAULT_PARSER);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            PipelineConfig::from_json("not json"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn empty_fields_fail_validation() {
        for json in [
            r#"{"source": {"location": ""}}"#,
            r#"{"graph": {"parser": ""}}"#,
            r#"{"graph": {"codec_caps": ""}}"#,
        ] {
            assert!(matches!(
                PipelineConfig::from_json(json),
                Err(Error::Config(_))
            ));
        }
    }

    #[test]
    fn json_roundtrip() {
        let config = PipelineConfig::from_json(
            r#"{"source": {"location": "/data/a.mp4"}, "graph": {"sink": "glimagesink"}}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_json(&json).unwrap(), config);
    }
}
