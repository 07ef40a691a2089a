use crate::analysis::AnalysisKind;
use crate::lyrics::{ActiveLineTracker, Lyrics, Track, active_index};
use crate::player::{PlaybackState, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Search,
    Lyrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Search results list
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    /// A search has completed at least once
    pub loaded: bool,
}

impl ResultsState {
    pub fn select_prev(&mut self, by: usize) {
        self.selected = self.selected.saturating_sub(by);
    }

    pub fn select_next(&mut self, by: usize) {
        if !self.tracks.is_empty() {
            self.selected = (self.selected + by).min(self.tracks.len() - 1);
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.selected = 0;
        self.scroll_offset = 0;
        self.loading = false;
        self.loaded = true;
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Overlay with the model's answer
#[derive(Debug, Clone)]
pub struct AnalysisPanel {
    /// Request this panel is waiting on
    pub seq: u64,
    pub kind: AnalysisKind,
    pub loading: bool,
    pub text: String,
    pub scroll: u16,
}

/// Work the event loop must start after a state change
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub seq: u64,
    pub kind: AnalysisKind,
    pub lyrics: Option<String>,
    pub song: String,
    pub artist: String,
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub screen: Screen,
    pub show_help: bool,

    // Search
    pub search_query: String,
    pub search_focus: SearchFocus,
    pub results: ResultsState,
    /// Id of the latest search request
    pub search_seq: u64,

    // Selected track; bumped on every selection and close
    pub selection: u64,
    pub current_track: Option<Track>,
    pub lyrics: Lyrics,
    pub track_fetching: bool,

    // Playback
    pub playback: PlaybackState,
    pub follow: ActiveLineTracker,
    /// Highlighted line in the lyrics view
    pub lyric_cursor: usize,

    pub analysis: Option<AnalysisPanel>,
    /// Id of the latest analysis request
    pub analysis_seq: u64,

    pub toast: Option<Toast>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tick: 0,
            screen: Screen::Search,
            show_help: false,
            search_query: String::new(),
            search_focus: SearchFocus::Input,
            results: ResultsState::default(),
            search_seq: 0,
            selection: 0,
            current_track: None,
            lyrics: Lyrics::Missing,
            track_fetching: false,
            playback: PlaybackState::default(),
            follow: ActiveLineTracker::new(),
            lyric_cursor: 0,
            analysis: None,
            analysis_seq: 0,
            toast: None,
            status: String::new(),
        }
    }

    /// Start a search for the current query; `None` when the query is blank
    pub fn begin_search(&mut self) -> Option<(u64, String)> {
        let query = self.search_query.trim();
        if query.is_empty() {
            self.status = "Type a query first".into();
            return None;
        }
        let query = query.to_string();
        self.search_seq += 1;
        self.results.loading = true;
        self.status = format!("Searching: {query}");
        Some((self.search_seq, query))
    }

    /// Apply search results unless a newer search superseded them
    pub fn accept_search(&mut self, seq: u64, query: String, tracks: Vec<Track>) -> bool {
        if seq != self.search_seq {
            tracing::debug!(seq, latest = self.search_seq, "dropping stale search results");
            return false;
        }
        self.results.set_tracks(tracks);
        self.status = format!("Results for \"{query}\": {}", self.results.tracks.len());
        if !self.results.tracks.is_empty() {
            self.search_focus = SearchFocus::Results;
        }
        true
    }

    /// Replace the session with `track`: lyrics derived once, Paused at 0
    pub fn select_track(&mut self, track: Track, fallback_duration: f64) -> u64 {
        self.selection += 1;
        self.lyrics = Lyrics::from_track(&track);
        let duration = track_duration(&track).unwrap_or(fallback_duration);
        self.playback = PlaybackState::new(duration);
        self.follow.reset();
        self.lyric_cursor = 0;
        self.analysis = None;
        self.track_fetching = false;
        self.status = format!("{} - {}", track.track_name, track.artist_name);
        self.current_track = Some(track);

        self.results.clear();
        self.search_query.clear();
        self.search_focus = SearchFocus::Input;
        self.screen = Screen::Lyrics;

        self.refresh_active();
        self.selection
    }

    /// The selected track needs its lyrics fetched separately
    pub fn needs_fetch(&self) -> bool {
        self.current_track
            .as_ref()
            .is_some_and(|t| !t.instrumental && !t.has_lyrics())
    }

    /// Swap in a freshly fetched copy of the current track, keeping the position
    pub fn accept_track(&mut self, selection: u64, track: Option<Track>) -> bool {
        if selection != self.selection {
            tracing::debug!(selection, latest = self.selection, "dropping stale track fetch");
            return false;
        }
        self.track_fetching = false;
        let Some(track) = track else {
            return false;
        };
        if let Some(duration) = track_duration(&track) {
            self.playback.set_duration(duration);
        }
        self.lyrics = Lyrics::from_track(&track);
        self.current_track = Some(track);
        self.follow.reset();
        self.lyric_cursor = 0;
        self.refresh_active();
        true
    }

    pub fn close_track(&mut self) {
        self.selection += 1;
        self.current_track = None;
        self.lyrics = Lyrics::Missing;
        self.playback = PlaybackState::default();
        self.follow.reset();
        self.lyric_cursor = 0;
        self.analysis = None;
        self.track_fetching = false;
        self.screen = Screen::Search;
        self.status.clear();
    }

    pub fn active_line(&self) -> Option<usize> {
        active_index(self.lyrics.synced(), self.playback.position)
    }

    /// Re-resolve the active line; moves the cursor only when it changed
    pub fn refresh_active(&mut self) -> bool {
        let active = self.active_line();
        if !self.follow.observe(active) {
            return false;
        }
        if let Some(i) = active {
            self.lyric_cursor = i;
        }
        true
    }

    pub fn advance(&mut self, step: f64) -> TickOutcome {
        let outcome = self.playback.tick(step);
        if outcome != TickOutcome::Idle {
            self.refresh_active();
        }
        if outcome == TickOutcome::Finished {
            self.status = "Playback ended".into();
        }
        outcome
    }

    pub fn seek_to(&mut self, time: f64) {
        if self.current_track.is_none() {
            return;
        }
        self.playback.seek(time);
        self.refresh_active();
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek_to(self.playback.position + delta);
    }

    pub fn seek_to_cursor(&mut self) {
        if let Some(line) = self.lyrics.synced().get(self.lyric_cursor) {
            let time = line.time;
            self.seek_to(time);
        }
    }

    pub fn follow_active(&mut self) {
        if let Some(i) = self.active_line() {
            self.lyric_cursor = i;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.lyrics.is_empty() {
            return;
        }
        let last = self.lyrics.len().saturating_sub(1);
        self.lyric_cursor = self.lyric_cursor.saturating_add_signed(delta).min(last);
    }

    /// Open the analysis panel; `None` when there is nothing to ask or a request is running
    pub fn begin_analysis(&mut self, kind: AnalysisKind) -> Option<AnalysisRequest> {
        if self.analysis.as_ref().is_some_and(|a| a.loading) {
            return None;
        }
        let track = self.current_track.as_ref()?;
        let lyrics = Lyrics::source_text(track).map(str::to_string);
        if kind == AnalysisKind::Meaning && lyrics.is_none() {
            self.toast = Some(Toast::error("No lyrics to analyze"));
            return None;
        }
        self.analysis_seq += 1;
        let request = AnalysisRequest {
            seq: self.analysis_seq,
            kind,
            lyrics,
            song: track.track_name.clone(),
            artist: track.artist_name.clone(),
        };
        self.analysis = Some(AnalysisPanel {
            seq: self.analysis_seq,
            kind,
            loading: true,
            text: String::new(),
            scroll: 0,
        });
        Some(request)
    }

    /// Fill the panel, but only if it is still waiting on request `seq`
    pub fn accept_analysis(&mut self, seq: u64, text: String) -> bool {
        match &mut self.analysis {
            Some(panel) if panel.seq == seq && panel.loading => {
                panel.loading = false;
                panel.text = text;
                true
            }
            _ => {
                tracing::debug!(seq, latest = self.analysis_seq, "dropping stale analysis");
                false
            }
        }
    }
}

/// Usable duration of a track, if it carries one
fn track_duration(track: &Track) -> Option<f64> {
    track.duration.filter(|d| d.is_finite() && *d > 0.0)
}
