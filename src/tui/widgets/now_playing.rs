//! Now Playing widget - track info, progress and transport for the bottom bar

use super::{padded, truncate_str};
use crate::app::state::{AppState, ToastKind};
use crate::player::format_clock;
use crate::tui::theme::{Icons, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Player ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = padded(block.inner(area));
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Track title
            Constraint::Length(1), // Artist
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Time + controls
            Constraint::Min(0),    // Toast (if any)
        ])
        .split(inner);

    let content_width = inner.width.saturating_sub(1) as usize;

    let (title, artist) = match &state.current_track {
        Some(t) => {
            let artist = if t.album_name.is_empty() {
                t.artist_name.clone()
            } else {
                format!("{} · {}", t.artist_name, t.album_name)
            };
            (t.track_name.as_str(), artist)
        }
        None => ("Nothing selected", String::new()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_str(title, content_width),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", icons.artist), Style::default().fg(theme.palette.fg_dim)),
            Span::styled(
                truncate_str(&artist, content_width.saturating_sub(2)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ])),
        rows[1],
    );

    let bar = render_progress_bar(rows[2].width as usize, state.playback.progress(), icons);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(bar, Style::default().fg(theme.palette.accent)))),
        rows[2],
    );

    let play_icon = if state.playback.is_playing() {
        icons.pause
    } else {
        icons.play
    };
    let controls = Line::from(vec![
        Span::styled(play_icon, Style::default().fg(theme.palette.fg_primary)),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} / {}",
                format_clock(state.playback.position),
                format_clock(state.playback.duration)
            ),
            Style::default().fg(theme.palette.fg_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(controls), rows[3]);

    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (icons.success, theme.palette.accent_alt),
            ToastKind::Error => (icons.error, theme.palette.error),
        };
        let toast_line = Line::from(vec![
            Span::styled(format!("{} ", prefix), Style::default().fg(color)),
            Span::styled(
                truncate_str(&toast.message, content_width.saturating_sub(3)),
                Style::default().fg(color),
            ),
        ]);
        frame.render_widget(Paragraph::new(toast_line), rows[4]);
    }
}

fn render_progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }

    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_width() {
        let icons = Icons::nerd();
        for ratio in [0.0, 0.33, 1.0] {
            assert_eq!(render_progress_bar(20, ratio, &icons).chars().count(), 20);
        }
        assert!(render_progress_bar(20, 0.0, &icons).starts_with(icons.progress_head));
        assert!(render_progress_bar(20, 1.0, &icons).ends_with(icons.progress_head));
        assert_eq!(render_progress_bar(2, 0.5, &icons), "");
    }
}
