//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{analysis, help, lyrics, now_playing, search, truncate_str};

/// Search screen:
/// ┌─────────────────────────────────────────┐
/// │ LyraSync                                │
/// │ ╭ Query ─────────────────────────────╮  │
/// │ ╰────────────────────────────────────╯  │
/// │ ╭ Results ───────────────────────────╮  │
/// │ ╰────────────────────────────────────╯  │
/// │ status                                  │
/// └─────────────────────────────────────────┘
///
/// Lyrics screen: lyrics view on top, player bar below.
/// Help and analysis render as overlays on either.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let root = frame.area();

    match state.screen {
        Screen::Search => render_search_screen(frame, state, root),
        Screen::Lyrics => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(5),    // Lyrics
                    Constraint::Length(7), // Player bar
                ])
                .split(root);
            lyrics::render(frame, state, rows[0]);
            now_playing::render(frame, state, rows[1]);
        }
    }

    analysis::render(frame, state, root);
    if state.show_help {
        help::render(frame, root);
    }
}

fn render_search_screen(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Query
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "LyraSync",
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "lyrics companion",
            Style::default().fg(theme.palette.fg_dim),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    search::render_search_box(frame, state, rows[1]);
    search::render_results(frame, state, rows[2]);

    let status = match &state.toast {
        Some(toast) => toast.message.as_str(),
        None if state.status.is_empty() => "? for help",
        None => state.status.as_str(),
    };
    let status = Paragraph::new(Line::from(Span::styled(
        truncate_str(status, rows[3].width as usize),
        Style::default().fg(theme.palette.fg_secondary),
    )));
    frame.render_widget(status, rows[3]);
}
