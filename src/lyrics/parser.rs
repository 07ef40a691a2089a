//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format:
//! [mm:ss.xx] Lyrics line here
//!
//! Example:
//! [00:12.34] Hello world
//! [00:15.00] Another line
//!
//! Only the first timestamp tag of a line is consumed. Any further tag stays
//! in the text. Lines without a tag (metadata, blanks, junk) are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([0-9]+):([0-9]+\.[0-9]+)\]").expect("valid timestamp pattern"));

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from start
    pub time: f64,
    /// The lyrics text, never empty
    pub text: String,
}

impl LyricLine {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Parse LRC text into a timeline sorted by time.
///
/// Never fails: malformed input only contributes fewer lines.
pub fn parse_lrc(content: &str) -> Vec<LyricLine> {
    let mut lines: Vec<LyricLine> = content.split('\n').filter_map(parse_line).collect();

    // Stable, so lines sharing a timestamp keep their input order.
    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    lines
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let caps = TIMESTAMP_TAG.captures(line)?;
    let minutes: f64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: f64 = caps.get(2)?.as_str().parse().ok()?;

    let text = TIMESTAMP_TAG.replacen(line, 1, "");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(LyricLine::new(minutes * 60.0 + seconds, text))
}

/// Format seconds as an LRC tag body, e.g. `01:05.30`
pub fn format_timestamp(secs: f64) -> String {
    let centis = (secs.max(0.0) * 100.0).round() as u64;
    let min = centis / 6000;
    let sec = (centis % 6000) / 100;
    let cs = centis % 100;
    format!("{:02}:{:02}.{:02}", min, sec, cs)
}

/// Rebuild LRC text from a parsed timeline
pub fn to_lrc(lines: &[LyricLine]) -> String {
    lines
        .iter()
        .map(|l| format!("[{}]{}", format_timestamp(l.time), l.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[LyricLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_sorts_ascending_regardless_of_input_order() {
        let parsed = parse_lrc("[00:01.50]Hello\n[00:00.00]World");
        assert_eq!(
            parsed,
            vec![LyricLine::new(0.0, "World"), LyricLine::new(1.5, "Hello")]
        );
    }

    #[test]
    fn test_parse_lrc_skips_metadata() {
        let lrc = r#"
[ti:Test Song]
[ar:Test Artist]
[00:12.34]First line
[01:15.00] Second line
"#;
        let parsed = parse_lrc(lrc);
        assert_eq!(parsed.len(), 2);
        assert!((parsed[0].time - 12.34).abs() < 1e-9);
        assert_eq!(parsed[0].text, "First line");
        assert!((parsed[1].time - 75.0).abs() < 1e-9);
        assert_eq!(parsed[1].text, "Second line");
    }

    #[test]
    fn test_tag_with_only_whitespace_yields_nothing() {
        assert!(parse_lrc("[00:05.00]   \t ").is_empty());
        assert!(parse_lrc("[00:05.00]").is_empty());
    }

    #[test]
    fn test_no_tags_yields_empty() {
        assert!(parse_lrc("just some words\nand more words").is_empty());
        assert!(parse_lrc("").is_empty());
    }

    #[test]
    fn test_tag_shape_is_strict() {
        // No fraction, colon-separated fraction, non-ASCII digits.
        let lrc = "[00:12]a\n[00:12:34]b\n[0:1.]c\n[٠٠:١٢.٣٤]d\n[3:07.5]e";
        let parsed = parse_lrc(lrc);
        assert_eq!(texts(&parsed), vec!["e"]);
        assert!((parsed[0].time - 187.5).abs() < 1e-9);
    }

    #[test]
    fn test_tag_matched_anywhere_in_line() {
        let parsed = parse_lrc("intro [00:02.00] words");
        assert_eq!(parsed, vec![LyricLine::new(2.0, "intro  words")]);
    }

    #[test]
    fn test_only_first_tag_is_stripped() {
        let parsed = parse_lrc("[00:10.00][00:20.00]Chorus");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].time, 10.0);
        assert_eq!(parsed[0].text, "[00:20.00]Chorus");
    }

    #[test]
    fn test_duplicate_timestamps_keep_input_order() {
        let parsed = parse_lrc("[00:03.00]C\n[00:02.00]A\n[00:02.00]B");
        assert_eq!(texts(&parsed), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse_lrc("[00:01.00]One\r\n[00:02.00]Two\r\n");
        assert_eq!(texts(&parsed), vec!["One", "Two"]);
    }

    #[test]
    fn test_reparse_of_reconstructed_text_is_stable() {
        let lrc = "[ti:x]\n[00:21.10]b\n[00:03.25]a\n[02:00.00]c\n[00:03.25]a2";
        let first = parse_lrc(lrc);
        let second = parse_lrc(&to_lrc(&first));
        assert_eq!(texts(&first), texts(&second));
        for (a, b) in first.iter().zip(&second) {
            assert!((a.time - b.time).abs() < 1e-9);
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(65.3), "01:05.30");
        assert_eq!(format_timestamp(725.999), "12:06.00");
    }
}
