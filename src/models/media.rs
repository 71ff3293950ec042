use std::fmt;

use serde::{Deserialize, Serialize};

/// The two export shapes the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    AudioOnly,
    VideoWithAudio,
}

impl OutputKind {
    pub fn container_ext(&self) -> &'static str {
        match self {
            Self::AudioOnly => "mp3",
            Self::VideoWithAudio => "mp4",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AudioOnly => write!(f, "audio-only"),
            Self::VideoWithAudio => write!(f, "video-with-audio"),
        }
    }
}

/// One encoded stream/container option for a media item. `url` is the
/// opaque streaming handle issued by the provider; `size_bytes` is `None`
/// when the provider does not report a length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rendition {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub has_video: bool,
    pub has_audio: bool,
    pub size_bytes: Option<u64>,
    pub url: String,
}

impl Rendition {
    pub fn is_progressive(&self) -> bool {
        self.has_video && self.has_audio
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio && !self.has_video
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub title: String,
    pub duration_seconds: Option<f64>,
    pub renditions: Vec<Rendition>,
}

impl MediaInfo {
    /// `"4m 13s"` style label for preview surfaces.
    pub fn duration_label(&self) -> Option<String> {
        self.duration_seconds.map(|d| {
            let secs = d.max(0.0) as u64;
            format!("{}m {}s", secs / 60, secs % 60)
        })
    }
}
