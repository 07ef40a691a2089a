pub mod actions;
pub mod events;
pub mod state;

use crate::analysis::{AnalysisClient, AnalysisKind};
use crate::config::Config;
use crate::input;
use crate::lyrics::{LrclibClient, Track};
use crate::player::{ClockHandle, TickOutcome, WakeLock};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent, PlayerEvent};
use state::{AnalysisRequest, AppState, Screen, Toast};
use std::time::Duration;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    lrclib: LrclibClient,
    analysis: AnalysisClient,
    clock: Option<ClockHandle>,
    clock_epoch: u64,
    wake_lock: Option<WakeLock>,
}

impl App {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let lrclib = LrclibClient::new(&cfg.lrclib)?;
        let analysis = AnalysisClient::new(&cfg.analysis)?;
        Ok(Self {
            cfg,
            state: AppState::new(),
            lrclib,
            analysis,
            clock: None,
            clock_epoch: 0,
            wake_lock: None,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        // No UI ticker: we re-render on input, network and clock events.

        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx);
                    }
                }
                Event::Player(pe) => self.handle_player(pe),
                Event::Network(ne) => self.handle_network(ne),
            }

            if self.state.should_quit {
                break;
            }

            self.sync_clock(&tx);
            tui::draw(terminal, &mut self.state)?;
        }

        self.clock = None;
        if let Some(lock) = self.wake_lock.take()
            && let Err(e) = lock.release().await
        {
            tracing::warn!("release wake lock: {e:#}");
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::SetSearchFocus(f) => self.state.search_focus = f,
            Action::InputChar(c) => self.state.search_query.push(c),
            Action::Backspace => {
                self.state.search_query.pop();
            }
            Action::ClearInput => self.state.search_query.clear(),
            Action::StartSearch => self.spawn_search(tx),
            Action::ListUp => self.scroll(-1),
            Action::ListDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoTop => self.scroll(isize::MIN / 2),
            Action::GoBottom => self.scroll(isize::MAX / 2),
            Action::Activate => {
                if let Some(track) = self.state.results.selected_track().cloned() {
                    self.select_track(track, tx);
                }
            }
            Action::TogglePause => {
                if self.state.current_track.is_some() {
                    self.state.playback.toggle();
                }
            }
            Action::SeekForward => self.state.seek_by(self.cfg.playback.seek_step_secs),
            Action::SeekBack => self.state.seek_by(-self.cfg.playback.seek_step_secs),
            Action::SeekToCursor => self.state.seek_to_cursor(),
            Action::FollowActive => self.state.follow_active(),
            Action::RequestAnalysis(kind) => {
                if let Some(request) = self.state.begin_analysis(kind) {
                    self.spawn_analysis(request, tx);
                }
            }
            Action::CloseOverlay => {
                if self.state.show_help {
                    self.state.show_help = false;
                } else {
                    self.state.analysis = None;
                }
            }
            Action::CloseTrack => self.close_track(),
            Action::Resize => {}
        }
    }

    /// Route list movement to whatever currently has focus
    fn scroll(&mut self, delta: isize) {
        if let Some(panel) = &mut self.state.analysis {
            let by = delta.clamp(i16::MIN as isize, i16::MAX as isize) as i16;
            panel.scroll = panel.scroll.saturating_add_signed(by);
            return;
        }
        match self.state.screen {
            Screen::Search => {
                let by = delta.unsigned_abs();
                if delta < 0 {
                    self.state.results.select_prev(by);
                } else {
                    self.state.results.select_next(by);
                }
            }
            Screen::Lyrics => self.state.move_cursor(delta),
        }
    }

    fn handle_player(&mut self, pe: PlayerEvent) {
        match pe {
            PlayerEvent::Tick { epoch } => {
                if self.clock.as_ref().map(ClockHandle::epoch) != Some(epoch) {
                    tracing::trace!(epoch, "ignoring tick from stopped clock");
                    return;
                }
                if self.state.advance(self.cfg.playback.tick_step_secs) == TickOutcome::Finished {
                    tracing::info!("playback reached end of track");
                }
                if let Some(lock) = &mut self.wake_lock
                    && !lock.is_held()
                {
                    tracing::warn!("wake lock inhibitor exited");
                    self.wake_lock = None;
                }
            }
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::SearchResults { seq, query, tracks } => {
                if self.state.accept_search(seq, query, tracks) && self.state.results.tracks.is_empty() {
                    self.state.toast = Some(Toast::error("No results"));
                }
            }
            NetworkEvent::TrackFetched { selection, track } => {
                if self.state.accept_track(selection, track) {
                    self.state.toast = Some(Toast::success("Lyrics loaded"));
                }
            }
            NetworkEvent::AnalysisReady { seq, text } => {
                self.state.accept_analysis(seq, text);
            }
        }
    }

    /// Start or stop the clock to match the transport state
    fn sync_clock(&mut self, tx: &mpsc::Sender<Event>) {
        let playing = self.state.playback.is_playing();
        if playing && self.clock.is_none() {
            self.clock_epoch += 1;
            let period = Duration::from_millis(self.cfg.playback.tick_millis.max(1));
            self.clock = Some(ClockHandle::start(tx.clone(), self.clock_epoch, period));
        } else if !playing && self.clock.is_some() {
            self.clock = None;
        }
    }

    fn select_track(&mut self, track: Track, tx: &mpsc::Sender<Event>) {
        tracing::info!(id = track.id, track = %track.track_name, artist = %track.artist_name, "track selected");

        // Old clock ticks and the old lock must not outlive the old track.
        self.clock = None;
        self.wake_lock = None;

        let selection = self
            .state
            .select_track(track, self.cfg.playback.fallback_duration_secs);
        self.acquire_wake_lock();

        if self.state.needs_fetch() {
            self.spawn_track_fetch(selection, tx);
        }
        if self.cfg.playback.autoplay {
            self.state.playback.play();
        }
    }

    fn close_track(&mut self) {
        self.clock = None;
        self.wake_lock = None;
        self.state.close_track();
    }

    fn acquire_wake_lock(&mut self) {
        if !self.cfg.session.keep_awake {
            return;
        }
        let Some(argv) = self
            .cfg
            .session
            .inhibit_command
            .clone()
            .or_else(WakeLock::default_command)
        else {
            return;
        };
        match WakeLock::acquire(&argv) {
            Ok(lock) => {
                tracing::info!(pid = ?lock.pid(), "wake lock held");
                self.wake_lock = Some(lock);
            }
            Err(e) => tracing::warn!("wake lock unavailable: {e:#}"),
        }
    }

    fn spawn_search(&mut self, tx: &mpsc::Sender<Event>) {
        let Some((seq, query)) = self.state.begin_search() else {
            return;
        };
        let lrclib = self.lrclib.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let tracks = lrclib.search(&query).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::SearchResults { seq, query, tracks }))
                .await;
        });
    }

    fn spawn_track_fetch(&mut self, selection: u64, tx: &mpsc::Sender<Event>) {
        let Some(track) = &self.state.current_track else {
            return;
        };
        self.state.track_fetching = true;
        let artist = track.artist_name.clone();
        let title = track.track_name.clone();
        let lrclib = self.lrclib.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let track = lrclib.fetch(&artist, &title).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::TrackFetched { selection, track }))
                .await;
        });
    }

    fn spawn_analysis(&mut self, request: AnalysisRequest, tx: &mpsc::Sender<Event>) {
        let client = self.analysis.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let AnalysisRequest {
                seq,
                kind,
                lyrics,
                song,
                artist,
            } = request;
            let text = match kind {
                AnalysisKind::Meaning => {
                    client
                        .analyze(lyrics.as_deref().unwrap_or_default(), &song, &artist)
                        .await
                }
                AnalysisKind::Similar => client.recommend(&song, &artist).await,
            };
            let _ = tx
                .send(Event::Network(NetworkEvent::AnalysisReady { seq, text }))
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LRC: &str = "[00:00.00]zero\n[00:02.00]two\n[00:04.00]four";

    fn track(id: i64) -> Track {
        Track {
            id,
            track_name: format!("Song {id}"),
            artist_name: "Artist".into(),
            album_name: String::new(),
            duration: Some(60.0),
            instrumental: false,
            plain_lyrics: None,
            synced_lyrics: Some(LRC.into()),
        }
    }

    fn test_app() -> App {
        let mut cfg = Config::default();
        cfg.lrclib.base_url = "http://127.0.0.1:9".into();
        cfg.analysis.base_url = "http://127.0.0.1:9".into();
        cfg.session.keep_awake = true;
        cfg.session.inhibit_command = Some(vec!["sleep".into(), "30".into()]);
        // Long enough that the real clock never fires during a test.
        cfg.playback.tick_millis = 60_000;
        cfg.playback.autoplay = true;
        App::new(cfg).unwrap()
    }

    fn clock_epoch(app: &App) -> u64 {
        app.clock.as_ref().map(ClockHandle::epoch).unwrap()
    }

    #[tokio::test]
    async fn test_ticks_from_old_clock_are_ignored() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = test_app();
        app.select_track(track(1), &tx);
        app.sync_clock(&tx);
        let epoch = clock_epoch(&app);
        let step = app.cfg.playback.tick_step_secs;

        app.handle_player(PlayerEvent::Tick { epoch: epoch + 1 });
        app.handle_player(PlayerEvent::Tick { epoch: epoch - 1 });
        assert_eq!(app.state.playback.position, 0.0);

        app.handle_player(PlayerEvent::Tick { epoch });
        assert_eq!(app.state.playback.position, step);

        // Pausing stops the clock, so ticks it already queued no longer count.
        app.state.playback.pause();
        app.sync_clock(&tx);
        assert!(app.clock.is_none());
        app.handle_player(PlayerEvent::Tick { epoch });
        assert_eq!(app.state.playback.position, step);

        // Resuming starts a fresh clock under a new epoch.
        app.state.playback.play();
        app.sync_clock(&tx);
        assert_ne!(clock_epoch(&app), epoch);
        app.handle_player(PlayerEvent::Tick { epoch });
        assert_eq!(app.state.playback.position, step);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_new_selection_replaces_clock_and_wake_lock() {
        use crate::player::inhibit::wait_for_exit;

        let (tx, _rx) = mpsc::channel(16);
        let mut app = test_app();
        app.select_track(track(1), &tx);
        app.sync_clock(&tx);
        let old_epoch = clock_epoch(&app);
        let old_pid = app.wake_lock.as_ref().and_then(WakeLock::pid).unwrap();

        app.select_track(track(2), &tx);
        assert!(wait_for_exit(old_pid).await);
        app.sync_clock(&tx);
        let new_pid = app.wake_lock.as_ref().and_then(WakeLock::pid).unwrap();
        assert_ne!(new_pid, old_pid);
        assert_ne!(clock_epoch(&app), old_epoch);

        app.handle_player(PlayerEvent::Tick { epoch: old_epoch });
        assert_eq!(app.state.playback.position, 0.0);

        app.close_track();
        assert!(app.clock.is_none());
        assert!(app.wake_lock.is_none());
        assert!(wait_for_exit(new_pid).await);
    }

    #[tokio::test]
    async fn test_no_wake_lock_when_disabled() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = test_app();
        app.cfg.session.keep_awake = false;
        app.select_track(track(1), &tx);
        assert!(app.wake_lock.is_none());
        assert!(app.state.playback.is_playing());
    }
}
