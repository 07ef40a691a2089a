//! Overlay showing the model's interpretation or recommendations

use super::centered_rect;
use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(panel) = &state.analysis else {
        return;
    };
    let theme = get_theme();
    let popup = centered_rect(80, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.accent_alt))
        .title(format!(" {} {} ", theme.icons.sparkles, panel.kind.title()))
        .title_style(
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        );

    let body = if panel.loading {
        Paragraph::new(Line::from(Span::styled(
            format!("{} Reading between the lines...", LoadingSpinner::frame(state.tick)),
            Style::default()
                .fg(theme.palette.fg_dim)
                .add_modifier(Modifier::ITALIC),
        )))
    } else {
        let lines: Vec<Line> = panel.text.lines().map(Line::from).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(theme.palette.fg_primary))
            .wrap(Wrap { trim: false })
            .scroll((panel.scroll, 0))
    };

    frame.render_widget(body.block(block), popup);
}
