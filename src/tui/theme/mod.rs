//! Theme configuration

pub mod icons;
pub mod palette;

pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;
use ratatui::symbols::border;

/// Active theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::NIGHT,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}
