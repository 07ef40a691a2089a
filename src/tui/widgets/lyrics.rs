//! Lyrics view - timeline with past/current/future styling, centred on the cursor

use super::{padded, truncate_str};
use crate::app::state::AppState;
use crate::lyrics::{LineState, Lyrics};
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::ops::Range;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = match &state.current_track {
        Some(t) => format!(" {} {} ", icons.lyrics, t.track_name),
        None => format!(" {} Lyrics ", icons.lyrics),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = padded(block.inner(area));
    frame.render_widget(block, area);

    let lines = match &state.lyrics {
        Lyrics::Synced(_) => synced_lines(state, &theme, inner),
        Lyrics::Plain(_) => plain_lines(state, &theme, inner),
        Lyrics::Missing => {
            render_placeholder(frame, state, &theme, inner);
            return;
        }
    };

    // Center vertically when the lyrics are shorter than the view
    let top_padding = (inner.height as usize).saturating_sub(lines.len()) / 2;
    let mut centered: Vec<Line> = vec![Line::default(); top_padding];
    centered.extend(lines);

    frame.render_widget(Paragraph::new(centered), inner);
}

fn synced_lines(state: &AppState, theme: &Theme, area: Rect) -> Vec<Line<'static>> {
    let lyrics = state.lyrics.synced();
    let active = state.active_line();
    let max_width = (area.width as usize).saturating_sub(2);
    let window = visible_window(lyrics.len(), state.lyric_cursor, area.height as usize);

    window
        .map(|i| {
            let mut style = match LineState::classify(active, i) {
                LineState::Current => Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD),
                LineState::Past => Style::default().fg(theme.palette.fg_dim),
                LineState::Future => Style::default().fg(theme.palette.fg_secondary),
            };
            if i == state.lyric_cursor && Some(i) != active {
                style = style.bg(theme.palette.bg_highlight);
            }
            let marker = if Some(i) == active {
                theme.icons.current_line
            } else {
                " "
            };
            Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(truncate_str(&lyrics[i].text, max_width), style),
            ])
        })
        .collect()
}

fn plain_lines(state: &AppState, theme: &Theme, area: Rect) -> Vec<Line<'static>> {
    let max_width = area.width as usize;
    let mut lines = vec![Line::from(Span::styled(
        "Unsynced lyrics",
        Style::default()
            .fg(theme.palette.accent_alt)
            .add_modifier(Modifier::ITALIC),
    ))];
    let height = (area.height as usize).saturating_sub(1);
    for i in visible_window(state.lyrics.len(), state.lyric_cursor, height) {
        let text = state.lyrics.line_text(i).unwrap_or_default();
        lines.push(Line::from(Span::styled(
            truncate_str(text, max_width),
            Style::default().fg(theme.palette.fg_secondary),
        )));
    }
    lines
}

fn render_placeholder(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let message = if state.track_fetching {
        format!("{} Fetching lyrics...", LoadingSpinner::frame(state.tick))
    } else if state.current_track.as_ref().is_some_and(|t| t.instrumental) {
        "Instrumental".to_string()
    } else {
        "No lyrics available".to_string()
    };
    let top = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(theme.palette.fg_secondary),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, top);
}

/// Rows to show so that `cursor` sits in the middle where possible
fn visible_window(len: usize, cursor: usize, height: usize) -> Range<usize> {
    if height == 0 || len == 0 {
        return 0..0;
    }
    let start = cursor
        .saturating_sub(height / 2)
        .min(len.saturating_sub(height));
    start..(start + height).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fits_everything() {
        assert_eq!(visible_window(5, 3, 10), 0..5);
    }

    #[test]
    fn test_window_centres_cursor() {
        assert_eq!(visible_window(100, 50, 11), 45..56);
    }

    #[test]
    fn test_window_clamps_at_edges() {
        assert_eq!(visible_window(100, 2, 10), 0..10);
        assert_eq!(visible_window(100, 99, 10), 90..100);
    }

    #[test]
    fn test_window_degenerate() {
        assert_eq!(visible_window(0, 0, 10), 0..0);
        assert_eq!(visible_window(10, 3, 0), 0..0);
    }
}
