//! Simulated playback: transport state, the tick clock and the wake lock

pub mod clock;
pub mod inhibit;
pub mod state;

pub use clock::ClockHandle;
pub use inhibit::WakeLock;
pub use state::{PlaybackState, TickOutcome, format_clock};
