//! Simulated playback clock state

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Paused,
    Playing,
}

/// Result of one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused; nothing moved
    Idle,
    Advanced,
    /// Reached the end of the track and stopped
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Seconds, always within `[0, duration]`
    pub position: f64,
    pub duration: f64,
    pub transport: Transport,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl PlaybackState {
    /// Paused at zero
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration: duration.max(0.0),
            transport: Transport::Paused,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    pub fn play(&mut self) {
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.transport = Transport::Playing;
    }

    pub fn pause(&mut self) {
        self.transport = Transport::Paused;
    }

    pub fn toggle(&mut self) {
        match self.transport {
            Transport::Playing => self.pause(),
            Transport::Paused => self.play(),
        }
    }

    pub fn seek(&mut self, to: f64) {
        if to.is_nan() {
            return;
        }
        self.position = to.clamp(0.0, self.duration);
    }

    /// Swap in a corrected duration, keeping the position inside it
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
        if self.position >= duration {
            self.position = duration;
            self.transport = Transport::Paused;
        }
    }

    pub fn tick(&mut self, step: f64) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        self.position = (self.position + step).min(self.duration);
        if self.position >= self.duration {
            self.transport = Transport::Paused;
            return TickOutcome::Finished;
        }
        TickOutcome::Advanced
    }

    /// Completed fraction in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// `m:ss`, as shown under the progress bar
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
