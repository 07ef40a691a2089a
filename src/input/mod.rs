use crate::analysis::AnalysisKind;
use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Screen, SearchFocus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>, mouse_enabled: bool) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                let ev = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) if mouse_enabled => InputEvent::Mouse(m),
                    Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("terminal read failed: {e}");
                        continue;
                    }
                };
                if tx.blocking_send(Event::Input(ev)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => map_key(state, k),
    }
}

fn map_key(state: &AppState, k: KeyEvent) -> Option<Action> {
    if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if state.show_help {
        return match k.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => Some(Action::CloseOverlay),
        };
    }
    if state.analysis.is_some() {
        return handle_analysis_overlay(k);
    }
    match state.screen {
        Screen::Search => match state.search_focus {
            SearchFocus::Input => handle_search_input(state, k),
            SearchFocus::Results => handle_search_results(k),
        },
        Screen::Lyrics => handle_lyrics_screen(k),
    }
}

fn handle_search_input(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter => Some(Action::StartSearch),
        KeyCode::Esc | KeyCode::Down | KeyCode::Tab if state.results.loaded => {
            Some(Action::SetSearchFocus(SearchFocus::Results))
        }
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::ClearInput),
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_search_results(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
            Some(Action::SetSearchFocus(SearchFocus::Input))
        }
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_lyrics_screen(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::CloseTrack),

        // Playback
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char(']') | KeyCode::Right => Some(Action::SeekForward),
        KeyCode::Char('[') | KeyCode::Left => Some(Action::SeekBack),

        // Lyric cursor
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::Enter => Some(Action::SeekToCursor),
        KeyCode::Char('f') => Some(Action::FollowActive),

        // Model
        KeyCode::Char('a') => Some(Action::RequestAnalysis(AnalysisKind::Meaning)),
        KeyCode::Char('s') => Some(Action::RequestAnalysis(AnalysisKind::Similar)),

        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_analysis_overlay(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('s') | KeyCode::Enter => {
            Some(Action::CloseOverlay)
        }
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::Track;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn lyrics_state() -> AppState {
        let mut state = AppState::new();
        state.select_track(
            Track {
                id: 1,
                track_name: "t".into(),
                artist_name: "a".into(),
                album_name: String::new(),
                duration: Some(10.0),
                instrumental: false,
                plain_lyrics: None,
                synced_lyrics: Some("[00:01.00]x".into()),
            },
            300.0,
        );
        state
    }

    #[test]
    fn test_typing_goes_to_query() {
        let state = AppState::new();
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        ));
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Enter)),
            Some(Action::StartSearch)
        ));
    }

    #[test]
    fn test_lyrics_keys() {
        let state = lyrics_state();
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Char(' '))),
            Some(Action::TogglePause)
        ));
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Char('a'))),
            Some(Action::RequestAnalysis(AnalysisKind::Meaning))
        ));
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Esc)),
            Some(Action::CloseTrack)
        ));
    }

    #[test]
    fn test_overlay_captures_escape() {
        let mut state = lyrics_state();
        state.begin_analysis(AnalysisKind::Similar);
        assert!(matches!(
            map_input_to_action(&state, key(KeyCode::Esc)),
            Some(Action::CloseOverlay)
        ));
    }
}
