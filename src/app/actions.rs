use super::state::SearchFocus;
use crate::analysis::AnalysisKind;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    ToggleHelp,
    SetSearchFocus(SearchFocus),

    InputChar(char),
    Backspace,
    ClearInput,
    StartSearch,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,
    /// Open the selected search result
    Activate,

    TogglePause,
    SeekForward,
    SeekBack,
    /// Jump playback to the line under the lyric cursor
    SeekToCursor,
    /// Snap the lyric cursor back to the active line
    FollowActive,

    RequestAnalysis(AnalysisKind),
    CloseOverlay,
    CloseTrack,

    Resize,
}
