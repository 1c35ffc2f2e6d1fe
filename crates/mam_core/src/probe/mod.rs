//! Parsed media-probe reports.
//!
//! A probe report is the MediaInfo-style JSON produced for one asset file:
//! an ordered list of tracks, each a `@type` tag plus a flat field map.
//! This crate consumes reports read-only; running the probe itself belongs
//! to the transport layer.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from probe-report parsing.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("probe report has no track list")]
    MissingTracks,

    #[error("probe report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Track type tag from the probe report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    General,
    Video,
    Audio,
    /// Timecode, text, and menu tracks. Carried for start-timecode lookup.
    Other,
}

impl TrackKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "General" => TrackKind::General,
            "Video" => TrackKind::Video,
            "Audio" => TrackKind::Audio,
            _ => TrackKind::Other,
        }
    }
}

/// One track of a probe report: a type tag plus a flat field map.
#[derive(Debug, Clone)]
pub struct ProbeTrack {
    kind: TrackKind,
    fields: Map<String, Value>,
}

impl ProbeTrack {
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// A field's value as a string, when present and non-empty.
    ///
    /// MediaInfo emits nearly everything as strings; the occasional numeric
    /// value is stringified so callers see one shape.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = self.fields.get(name)?;
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// A complete probe report for one asset file. Read-only after parsing.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    path: PathBuf,
    tracks: Vec<ProbeTrack>,
}

impl ProbeReport {
    /// Parse a report from probe JSON.
    ///
    /// Accepts both the flat `{"tracks": [...]}` shape our probe endpoint
    /// returns and MediaInfo's own `{"media": {"track": [...]}}` nesting.
    /// Tracks without a `@type` tag are skipped.
    pub fn from_json(path: impl Into<PathBuf>, json: &Value) -> Result<Self, ProbeError> {
        let raw_tracks = json
            .get("tracks")
            .or_else(|| json.get("media").and_then(|m| m.get("track")))
            .and_then(|t| t.as_array())
            .ok_or(ProbeError::MissingTracks)?;

        let path = path.into();
        let mut tracks = Vec::with_capacity(raw_tracks.len());
        for raw in raw_tracks {
            let Some(fields) = raw.as_object() else {
                continue;
            };
            let Some(tag) = fields.get("@type").and_then(|t| t.as_str()) else {
                tracing::warn!("probe track without @type tag in {}", path.display());
                continue;
            };
            tracks.push(ProbeTrack {
                kind: TrackKind::from_tag(tag),
                fields: fields.clone(),
            });
        }
        tracing::debug!("parsed probe report: {} tracks for {}", tracks.len(), path.display());
        Ok(Self { path, tracks })
    }

    /// Parse a report from raw probe JSON text.
    pub fn from_json_str(path: impl Into<PathBuf>, text: &str) -> Result<Self, ProbeError> {
        let json: Value = serde_json::from_str(text)?;
        Self::from_json(path, &json)
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub fn tracks(&self) -> &[ProbeTrack] {
        &self.tracks
    }

    /// First track of the given kind. Registry convention treats only the
    /// first video/audio/general track as authoritative.
    pub fn first(&self, kind: TrackKind) -> Option<&ProbeTrack> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    /// A named field from the first track of the given kind.
    pub fn field(&self, kind: TrackKind, name: &str) -> Option<String> {
        self.first(kind)?.field(name)
    }

    /// Overall duration in seconds, as the probe's decimal string.
    pub fn duration(&self) -> Option<String> {
        self.field(TrackKind::General, "Duration")
    }

    /// Video frame rate, as the probe's decimal string.
    pub fn fps(&self) -> Option<String> {
        self.field(TrackKind::Video, "FrameRate")
    }

    /// Pixel resolution of the first video track.
    pub fn resolution(&self) -> Option<(String, String)> {
        let video = self.first(TrackKind::Video)?;
        let width = video.field("Width")?;
        let height = video.field("Height")?;
        Some((width, height))
    }

    /// Start timecode, from whichever track carries it. A semicolon before
    /// the frames field marks a drop-frame sequence.
    pub fn start_timecode(&self) -> Option<String> {
        self.tracks
            .iter()
            .find_map(|t| t.field("TimeCode_FirstFrame"))
    }

    /// Channel count of each audio stream, in stream order.
    pub fn channels_per_stream(&self) -> Vec<u32> {
        self.tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Audio)
            .filter_map(|t| t.field("Channels"))
            .filter_map(|c| c.parse().ok())
            .collect()
    }

    /// Total audio channels across all streams.
    pub fn total_audio_channels(&self) -> u32 {
        self.channels_per_stream().iter().sum()
    }

    /// Channel-layout labels for the streams that expose them, in stream
    /// order. Streams without a label contribute nothing.
    pub fn channel_layouts(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Audio)
            .filter_map(|t| t.field("ChannelLayout"))
            .collect()
    }
}
