//! Search screen - query box and result list with virtual scrolling

use super::truncate_str;
use crate::app::state::{AppState, SearchFocus};
use crate::lyrics::Track;
use crate::player::format_clock;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the search input box
pub fn render_search_box(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let is_focused = state.search_focus == SearchFocus::Input;
    let border_color = if is_focused {
        theme.palette.accent
    } else {
        theme.palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} What's playing? ", theme.icons.search))
        .title_style(Style::default().fg(theme.palette.accent));

    let prompt = if state.results.loading {
        format!("{} {}", state.search_query, LoadingSpinner::frame(state.tick))
    } else {
        let cursor = if is_focused { "▏" } else { "" };
        format!("{}{}", state.search_query, cursor)
    };

    let p = Paragraph::new(Line::from(prompt))
        .style(Style::default().fg(theme.palette.fg_primary))
        .block(block);
    frame.render_widget(p, area);
}

/// Render the result list; keeps the selection in view
pub fn render_results(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Results ")
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.results.loading {
        let loading = Paragraph::new(Line::from(format!(
            "{} Searching...",
            LoadingSpinner::frame(state.tick)
        )))
        .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, inner);
        return;
    }

    if state.results.tracks.is_empty() {
        let msg = if state.results.loaded {
            "No tracks found"
        } else {
            "Search a song or artist, then press Enter"
        };
        let empty = Paragraph::new(Line::from(msg)).style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_height = inner.height as usize;
    state.results.update_scroll(visible_height);

    let results = &state.results;
    let focused = state.search_focus == SearchFocus::Results;
    let end_idx = (results.scroll_offset + visible_height).min(results.tracks.len());
    let width = inner.width as usize;

    let items: Vec<ListItem> = results.tracks[results.scroll_offset..end_idx]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let idx = results.scroll_offset + offset;
            let is_selected = focused && idx == results.selected;
            let (marker, style) = if is_selected {
                (
                    icons.selected,
                    Style::default()
                        .fg(theme.palette.fg_primary)
                        .bg(theme.palette.bg_highlight)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (icons.unselected, Style::default().fg(theme.palette.fg_primary))
            };

            let badge = badge(track);
            let duration = track.duration.map(format_clock).unwrap_or_default();
            let label_width = width.saturating_sub(badge.len() + duration.len() + 5);
            let label = format!("{} - {}", track.track_name, track.artist_name);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(truncate_str(&label, label_width), style),
                Span::raw(" "),
                Span::styled(badge, Style::default().fg(theme.palette.accent_alt)),
                Span::raw(" "),
                Span::styled(duration, Style::default().fg(theme.palette.fg_dim)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn badge(track: &Track) -> &'static str {
    if track.instrumental {
        "[instr]"
    } else if track.synced_lyrics.is_some() {
        "[synced]"
    } else if track.plain_lyrics.is_some() {
        "[plain]"
    } else {
        ""
    }
}
