//! Load lifecycle: `loaded` / `errored` flags that reset on every playlist change.
//!
//! The two flags are independent: an error can arrive after the media already
//! reported readiness, and both stay set until the next reset.

use serde::{Deserialize, Serialize};

use crate::media::{MediaSignal, ReadyState};
use crate::outputs::Surface;

/// Snapshot of the load flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStatus {
    pub loaded: bool,
    pub errored: bool,
}

impl LoadStatus {
    pub fn surface(&self) -> Surface {
        if self.errored {
            Surface::ErrorMessage
        } else if !self.loaded {
            Surface::Spinner
        } else {
            Surface::Media
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadLifecycle {
    status: LoadStatus,
    ready_threshold: ReadyState,
}

impl LoadLifecycle {
    pub fn new(ready_threshold: ReadyState) -> Self {
        Self {
            status: LoadStatus::default(),
            ready_threshold,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn loaded(&self) -> bool {
        self.status.loaded
    }

    pub fn errored(&self) -> bool {
        self.status.errored
    }

    /// Clear both flags, then mark loaded if the backend is already past the threshold.
    /// Returns true if the media counted as loaded immediately.
    pub fn reset(&mut self, current: ReadyState) -> bool {
        self.status = LoadStatus::default();
        if current >= self.ready_threshold {
            self.status.loaded = true;
        }
        self.status.loaded
    }

    /// Mark loaded if the backend has crossed the threshold since the last check.
    /// Returns true on a false → true transition.
    pub fn poll(&mut self, current: ReadyState) -> bool {
        if !self.status.loaded && current >= self.ready_threshold {
            self.status.loaded = true;
            return true;
        }
        false
    }

    /// Apply a backend signal. Returns true if a flag changed.
    pub fn apply(&mut self, signal: MediaSignal) -> bool {
        if signal.is_readiness() {
            let changed = !self.status.loaded;
            self.status.loaded = true;
            changed
        } else {
            let changed = !self.status.errored;
            self.status.errored = true;
            changed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_flags_unless_already_buffered() {
        let mut lc = LoadLifecycle::new(ReadyState::HaveCurrentData);
        lc.apply(MediaSignal::CanPlay);
        lc.apply(MediaSignal::Error);
        assert!(!lc.reset(ReadyState::HaveMetadata));
        assert_eq!(lc.status(), LoadStatus::default());

        assert!(lc.reset(ReadyState::HaveEnoughData));
        assert!(lc.loaded());
        assert!(!lc.errored());
    }

    #[test]
    fn error_is_sticky_and_independent_of_readiness() {
        let mut lc = LoadLifecycle::new(ReadyState::HaveCurrentData);
        assert!(lc.apply(MediaSignal::Error));
        assert!(!lc.apply(MediaSignal::Error));
        assert!(lc.apply(MediaSignal::LoadedData));
        assert!(lc.loaded() && lc.errored());
    }

    #[test]
    fn surface_priority() {
        let spinner = LoadStatus::default();
        assert_eq!(spinner.surface(), Surface::Spinner);
        let ready = LoadStatus {
            loaded: true,
            errored: false,
        };
        assert_eq!(ready.surface(), Surface::Media);
        let failed = LoadStatus {
            loaded: true,
            errored: true,
        };
        assert_eq!(failed.surface(), Surface::ErrorMessage);
    }

    #[test]
    fn poll_only_reports_transitions() {
        let mut lc = LoadLifecycle::new(ReadyState::HaveCurrentData);
        assert!(!lc.poll(ReadyState::HaveMetadata));
        assert!(lc.poll(ReadyState::HaveCurrentData));
        assert!(!lc.poll(ReadyState::HaveEnoughData));
    }
}
