//! Lyrics module for fetching and displaying synchronized lyrics
//!
//! This module provides:
//! - LRCLIB API client for searching and fetching tracks
//! - LRC format parser for synchronized lyrics
//! - Active-line resolution against a playback position

pub mod cursor;
pub mod lrclib;
pub mod parser;

pub use cursor::{ActiveLineTracker, LineState, active_index};
pub use lrclib::{LrclibClient, Track};
pub use parser::{LyricLine, parse_lrc};

/// Lyrics as shown for the selected track
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Lyrics {
    /// Timed lines, sorted by time
    Synced(Vec<LyricLine>),
    /// Untimed fallback
    Plain(Vec<String>),
    #[default]
    Missing,
}

impl Lyrics {
    /// Derive the display lyrics once per track selection
    pub fn from_track(track: &Track) -> Self {
        if let Some(synced) = &track.synced_lyrics {
            let lines = parse_lrc(synced);
            if !lines.is_empty() {
                return Lyrics::Synced(lines);
            }
        }
        if let Some(plain) = &track.plain_lyrics {
            let lines: Vec<String> = plain
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if !lines.is_empty() {
                return Lyrics::Plain(lines);
            }
        }
        Lyrics::Missing
    }

    /// Text handed to the interpretation service
    pub fn source_text(track: &Track) -> Option<&str> {
        [&track.synced_lyrics, &track.plain_lyrics]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.trim().is_empty())
    }

    pub fn synced(&self) -> &[LyricLine] {
        match self {
            Lyrics::Synced(lines) => lines,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Lyrics::Synced(lines) => lines.len(),
            Lyrics::Plain(lines) => lines.len(),
            Lyrics::Missing => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn line_text(&self, index: usize) -> Option<&str> {
        match self {
            Lyrics::Synced(lines) => lines.get(index).map(|l| l.text.as_str()),
            Lyrics::Plain(lines) => lines.get(index).map(String::as_str),
            Lyrics::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(synced: Option<&str>, plain: Option<&str>) -> Track {
        Track {
            id: 1,
            track_name: "Song".into(),
            artist_name: "Artist".into(),
            album_name: String::new(),
            duration: Some(120.0),
            instrumental: false,
            plain_lyrics: plain.map(str::to_string),
            synced_lyrics: synced.map(str::to_string),
        }
    }

    #[test]
    fn test_prefers_synced() {
        let t = track(Some("[00:01.00]hi"), Some("hi"));
        assert_eq!(Lyrics::from_track(&t), Lyrics::Synced(vec![LyricLine::new(1.0, "hi")]));
    }

    #[test]
    fn test_falls_back_to_plain_when_synced_has_no_lines() {
        let t = track(Some("[ti:only metadata]"), Some("one\n\n two \n"));
        assert_eq!(
            Lyrics::from_track(&t),
            Lyrics::Plain(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_missing() {
        let t = track(None, Some("   "));
        let lyrics = Lyrics::from_track(&t);
        assert_eq!(lyrics, Lyrics::Missing);
        assert!(lyrics.is_empty());
        assert!(lyrics.synced().is_empty());
    }

    #[test]
    fn test_source_text() {
        assert_eq!(Lyrics::source_text(&track(Some("[00:01.00]a"), Some("a"))), Some("[00:01.00]a"));
        assert_eq!(Lyrics::source_text(&track(Some(""), Some("a"))), Some("a"));
        assert_eq!(Lyrics::source_text(&track(None, None)), None);
    }
}
