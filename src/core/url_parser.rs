use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::InvalidReference;

// Canonical watch and short-link forms only. Partial matches are rejected.
static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})$")
        .unwrap()
});

// Playlists get their own grammar instead of being forced through the
// video pattern, which would reject every valid playlist link.
static PLAYLIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/playlist\?list=([A-Za-z0-9_-]{2,})$")
        .unwrap()
});

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Canonical 11-character video id. Only obtainable from a string that
/// passed the accepted URL grammar or [`VideoId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Checked constructor for ids coming straight from a provider
    /// listing rather than a user-typed URL.
    pub fn parse(raw: &str) -> Result<Self, InvalidReference> {
        if ID_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidReference(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque playlist identifier; expanded by the resolver in provider
/// listing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Video(VideoId),
    Playlist(PlaylistId),
}

/// Validates and classifies an input string. Pure and idempotent;
/// leading/trailing whitespace is stripped, nothing else is rewritten.
pub fn classify(input: &str) -> Result<Classified, InvalidReference> {
    let input = input.trim();
    if let Some(caps) = VIDEO_RE.captures(input) {
        return Ok(Classified::Video(VideoId(caps[1].to_string())));
    }
    if let Some(caps) = PLAYLIST_RE.captures(input) {
        return Ok(Classified::Playlist(PlaylistId(caps[1].to_string())));
    }
    Err(InvalidReference(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(input: &str) -> VideoId {
        match classify(input) {
            Ok(Classified::Video(id)) => id,
            other => panic!("expected video for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_canonical_watch_url() {
        assert_eq!(video("https://www.youtube.com/watch?v=ABCDEFGHIJK").as_str(), "ABCDEFGHIJK");
    }

    #[test]
    fn accepts_short_link() {
        assert_eq!(video("https://youtu.be/dQw4w9WgXcQ").as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn accepts_schemeless_and_bare_host() {
        assert_eq!(video("youtube.com/watch?v=abc_def-123").as_str(), "abc_def-123");
        assert_eq!(video("www.youtube.com/watch?v=abc_def-123").as_str(), "abc_def-123");
        assert_eq!(video("http://youtu.be/abc_def-123").as_str(), "abc_def-123");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(video("  https://youtu.be/ABCDEFGHIJK \n").as_str(), "ABCDEFGHIJK");
    }

    #[test]
    fn rejects_wrong_id_length() {
        assert!(classify("https://youtu.be/ABCDEFGHIJ").is_err());
        assert!(classify("https://youtu.be/ABCDEFGHIJKL").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(classify("https://www.youtube.com/watch?v=ABCDEFGHIJK&t=42").is_err());
        assert!(classify("https://youtu.be/ABCDEFGHIJK/extra").is_err());
    }

    #[test]
    fn rejects_unrelated_hosts_and_empty() {
        assert!(classify("https://vimeo.com/12345").is_err());
        assert!(classify("not a url").is_err());
        assert!(classify("").is_err());
    }

    #[test]
    fn rejects_forbidden_id_characters() {
        assert!(classify("https://youtu.be/ABCDEFGH!JK").is_err());
    }

    #[test]
    fn playlist_has_its_own_grammar() {
        match classify("https://www.youtube.com/playlist?list=PLabc123XYZ_-") {
            Ok(Classified::Playlist(id)) => assert_eq!(id.as_str(), "PLabc123XYZ_-"),
            other => panic!("expected playlist, got {other:?}"),
        }
    }

    #[test]
    fn playlist_url_is_not_a_video() {
        // The video grammar must not swallow playlist links.
        assert!(matches!(
            classify("youtube.com/playlist?list=PLabc123XYZ"),
            Ok(Classified::Playlist(_))
        ));
    }

    #[test]
    fn classify_is_idempotent() {
        let input = "https://www.youtube.com/watch?v=ABCDEFGHIJK";
        assert_eq!(classify(input), classify(input));
        let bad = "https://example.com/watch?v=ABCDEFGHIJK";
        assert_eq!(classify(bad), classify(bad));
    }

    #[test]
    fn parse_checks_raw_ids() {
        assert!(VideoId::parse("ABCDEFGHIJK").is_ok());
        assert!(VideoId::parse("short").is_err());
        assert!(VideoId::parse("has spaces!!").is_err());
    }

    #[test]
    fn watch_url_round_trip() {
        let id = video("youtu.be/ABCDEFGHIJK");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=ABCDEFGHIJK");
        assert_eq!(video(&id.watch_url()), id);
    }
}
