//! Scroll position tracking for the header's "scrolled" styling.

/// Result of feeding one scroll position into [`ScrollTracker`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ScrollOutcome {
    /// Delta under the noise floor; the event should be ignored entirely.
    Noise,
    /// Position advanced. `compacted_changed` is `Some(flag)` when the
    /// header's compacted flag flipped and the DOM class must be toggled.
    Moved { compacted_changed: Option<bool> },
}

/// Tracks the last observed scroll position and the current value of the
/// header's compacted ("scrolled") flag.
///
/// Deltas under 2 px are treated as noise. A flag change is reported only
/// when the value actually flips, so the caller never issues a redundant
/// class write.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTracker {
    last_y: f64,
    compacted: bool,
}

/// Minimum scroll delta worth reacting to, in pixels.
const NOISE_PX: f64 = 2.0;

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            last_y: 0.0,
            compacted: false,
        }
    }

    pub fn last_y(&self) -> f64 {
        self.last_y
    }

    pub fn is_compacted(&self) -> bool {
        self.compacted
    }

    /// Observes a new scroll position against the given threshold.
    pub fn observe(&mut self, y: f64, threshold: f64) -> ScrollOutcome {
        if (y - self.last_y).abs() < NOISE_PX {
            return ScrollOutcome::Noise;
        }
        self.last_y = y;

        let should_compact = y > threshold;
        let changed = if should_compact != self.compacted {
            self.compacted = should_compact;
            Some(should_compact)
        } else {
            None
        };
        ScrollOutcome::Moved {
            compacted_changed: changed,
        }
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}
