//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

/// Icon set using Nerd Font glyphs
#[derive(Debug, Clone)]
pub struct Icons {
    pub play: &'static str,
    pub pause: &'static str,

    pub search: &'static str,
    pub help: &'static str,

    pub success: &'static str,
    pub error: &'static str,

    pub music: &'static str,
    pub artist: &'static str,
    pub lyrics: &'static str,
    pub sparkles: &'static str,

    pub selected: &'static str,
    pub unselected: &'static str,
    /// Marker in front of the active lyric line
    pub current_line: &'static str,

    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,
}

impl Icons {
    /// Nerd Font icon set
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",           // nf-fa-play
            pause: "\u{f04c}",          // nf-fa-pause

            search: "\u{f002}",         // nf-fa-search
            help: "\u{f059}",           // nf-fa-question_circle

            success: "\u{f00c}",        // nf-fa-check
            error: "\u{f00d}",          // nf-fa-times

            music: "\u{f001}",          // nf-fa-music
            artist: "\u{f007}",         // nf-fa-user
            lyrics: "\u{f15c}",         // nf-fa-file_text_o
            sparkles: "\u{f0d0}",       // nf-fa-magic

            selected: "\u{f054}",       // nf-fa-chevron_right
            unselected: " ",
            current_line: "♪",

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = tick as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
