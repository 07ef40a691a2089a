use crate::lyrics::Track;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Tick { epoch: u64 },
}

/// Settled results of background calls, tagged with the generation they were issued under
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    SearchResults { seq: u64, query: String, tracks: Vec<Track> },
    TrackFetched { selection: u64, track: Option<Track> },
    AnalysisReady { seq: u64, text: String },
}
