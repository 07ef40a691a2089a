//! Color palette - grayscale with a warm accent for the sung line

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    /// Lines already sung
    pub fg_dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub error: Color,
}

impl Palette {
    pub const NIGHT: Self = Self {
        bg_highlight: Color::Rgb(48, 48, 48),    // #303030 dark gray
        fg_primary: Color::Rgb(255, 255, 255),   // #ffffff white
        fg_secondary: Color::Rgb(160, 160, 160), // #a0a0a0 light gray
        fg_dim: Color::Rgb(90, 90, 90),          // #5a5a5a
        accent: Color::Rgb(255, 209, 102),       // #ffd166 amber
        accent_alt: Color::Rgb(181, 156, 255),   // #b59cff lavender
        border: Color::Rgb(64, 64, 64),          // #404040 dark gray
        error: Color::Rgb(255, 107, 107),        // #ff6b6b
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::NIGHT
    }
}
