//! Help overlay showing keybindings

use super::centered_rect;
use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Keybinds ", theme.icons.help))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Lyrics", &theme),
        keybind("Space", "Play / pause", &theme),
        keybind("] / Right", "Seek forward", &theme),
        keybind("[ / Left", "Seek back", &theme),
        keybind("j / k", "Move lyric cursor", &theme),
        keybind("g / G", "First / last line", &theme),
        keybind("Enter", "Jump to cursor line", &theme),
        keybind("f", "Follow the sung line", &theme),
        keybind("a", "Explain the lyrics", &theme),
        keybind("s", "Similar songs", &theme),
        keybind("Esc", "Back to search", &theme),
    ];
    frame.render_widget(Paragraph::new(left_content).wrap(Wrap { trim: false }), cols[0]);

    let right_content = vec![
        section_header("Search", &theme),
        keybind("Enter", "Search / open track", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
        keybind("Down / Tab", "Focus results", &theme),
        keybind("/ or i", "Back to search bar", &theme),
        keybind("j / k", "Move selection", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("?", "Toggle this help", &theme),
        keybind("q", "Quit", &theme),
        keybind("Ctrl+c", "Quit", &theme),
    ];
    frame.render_widget(Paragraph::new(right_content).wrap(Wrap { trim: false }), cols[1]);
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
