//! Active-line resolution over a parsed timeline
//!
//! Each line owns the half-open interval from its timestamp up to the next
//! distinct timestamp; the last line's interval never ends. Lines sharing a
//! timestamp resolve to the first of them.

use super::parser::LyricLine;

/// Index of the line active at `time`.
///
/// `lines` must already be sorted by time. Returns `None` when the timeline
/// is empty or `time` precedes the first line.
pub fn active_index(lines: &[LyricLine], time: f64) -> Option<usize> {
    let started = lines.partition_point(|l| l.time <= time);
    if started == 0 {
        return None;
    }
    let start = lines[started - 1].time;
    Some(lines.partition_point(|l| l.time < start))
}

/// Rendering class of a line relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Past,
    Current,
    Future,
}

impl LineState {
    pub fn classify(active: Option<usize>, index: usize) -> Self {
        match active {
            Some(a) if index == a => LineState::Current,
            Some(a) if index < a => LineState::Past,
            _ => LineState::Future,
        }
    }
}

/// Edge detector for active-line changes.
///
/// Fires once per change of the resolved index, not once per tick.
#[derive(Debug, Clone, Default)]
pub struct ActiveLineTracker {
    last: Option<usize>,
}

impl ActiveLineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest resolution; true when it differs from the previous one
    pub fn observe(&mut self, active: Option<usize>) -> bool {
        if self.last == active {
            return false;
        }
        self.last = active;
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(times: &[f64]) -> Vec<LyricLine> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| LyricLine::new(*t, format!("line {i}")))
            .collect()
    }

    #[test]
    fn test_empty_timeline_has_no_active_line() {
        assert_eq!(active_index(&[], 0.0), None);
        assert_eq!(active_index(&[], 100.0), None);
    }

    #[test]
    fn test_before_first_line_is_none() {
        let lines = timeline(&[1.0, 2.0]);
        assert_eq!(active_index(&lines, 0.0), None);
        assert_eq!(active_index(&lines, 0.999), None);
        assert_eq!(active_index(&lines, f64::NAN), None);
    }

    #[test]
    fn test_half_open_boundaries() {
        let lines = timeline(&[1.0, 2.0, 4.0]);
        assert_eq!(active_index(&lines, 1.0), Some(0));
        assert_eq!(active_index(&lines, 1.999), Some(0));
        assert_eq!(active_index(&lines, 2.0), Some(1));
        assert_eq!(active_index(&lines, 3.5), Some(1));
        assert_eq!(active_index(&lines, 4.0), Some(2));
        assert_eq!(active_index(&lines, 10_000.0), Some(2));
    }

    #[test]
    fn test_interval_rule_holds_over_sweep() {
        let lines = timeline(&[0.5, 1.25, 1.3, 7.0, 7.5, 12.0]);
        let mut t = 0.0;
        while t < 15.0 {
            match active_index(&lines, t) {
                None => assert!(t < lines[0].time),
                Some(i) => {
                    assert!(lines[i].time <= t);
                    if let Some(next) = lines.get(i + 1) {
                        assert!(t < next.time);
                    }
                }
            }
            t += 0.05;
        }
    }

    #[test]
    fn test_duplicate_timestamps_first_wins() {
        let lines = vec![
            LyricLine::new(2.0, "A"),
            LyricLine::new(2.0, "B"),
            LyricLine::new(3.0, "C"),
        ];
        assert_eq!(active_index(&lines, 2.0), Some(0));
        assert_eq!(active_index(&lines, 2.9), Some(0));
        assert_eq!(active_index(&lines, 3.0), Some(2));
    }

    #[test]
    fn test_duplicate_timestamps_break_half_open_rule() {
        // Ties resolve to the first line, so a later line sharing the
        // timestamp is never active even though its interval has started.
        let lines = timeline(&[2.0, 2.0, 3.0]);
        let t = 2.0;
        let i = active_index(&lines, t).unwrap();
        assert_eq!(i, 0);
        // The next line has already started, which the plain rule forbids.
        assert!(lines[i + 1].time <= t);
        for t in [2.0, 2.5, 2.99] {
            assert_ne!(active_index(&lines, t), Some(1));
        }
    }

    #[test]
    fn test_duplicate_timestamps_at_end() {
        let lines = timeline(&[1.0, 5.0, 5.0, 5.0]);
        assert_eq!(active_index(&lines, 5.0), Some(1));
        assert_eq!(active_index(&lines, 60.0), Some(1));
    }

    #[test]
    fn test_classify() {
        assert_eq!(LineState::classify(Some(2), 0), LineState::Past);
        assert_eq!(LineState::classify(Some(2), 2), LineState::Current);
        assert_eq!(LineState::classify(Some(2), 3), LineState::Future);
        assert_eq!(LineState::classify(None, 0), LineState::Future);
    }

    #[test]
    fn test_tracker_fires_once_per_change() {
        let lines = timeline(&[0.0, 2.0]);
        let mut tracker = ActiveLineTracker::new();

        let mut fired = 0;
        for t in [1.9, 2.1, 2.6, 3.1] {
            if tracker.observe(active_index(&lines, t)) {
                fired += 1;
            }
        }
        // None -> 0 on the first tick, then 0 -> 1 exactly once.
        assert_eq!(fired, 2);
        assert!(!tracker.observe(Some(1)));
    }

    #[test]
    fn test_tracker_reset() {
        let mut tracker = ActiveLineTracker::new();
        assert!(tracker.observe(Some(3)));
        assert!(!tracker.observe(Some(3)));
        tracker.reset();
        assert!(!tracker.observe(None));
        assert!(tracker.observe(Some(3)));
    }
}
