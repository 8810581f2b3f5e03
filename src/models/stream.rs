use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamType {
    #[serde(rename = "mp4")]
    Mp4,
    #[serde(rename = "m3u8")]
    Hls,
}

impl StreamType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Hls => "m3u8",
        }
    }
}

impl std::fmt::Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub quality: String,
    pub url: String,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    pub language: String,
    pub label: Option<String>,
    pub url: String,
}

/// Playable candidates in preference order: players try `streams[0]` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBundle {
    pub streams: Vec<Stream>,
    pub subtitles: Vec<Subtitle>,
}

impl StreamBundle {
    #[must_use]
    pub const fn new(streams: Vec<Stream>) -> Self {
        Self {
            streams,
            subtitles: Vec::new(),
        }
    }

    #[must_use]
    pub fn preferred(&self) -> Option<&Stream> {
        self.streams.first()
    }
}
