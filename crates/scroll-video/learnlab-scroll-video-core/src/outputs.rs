//! Output contracts: what the host should display and which semantic events occurred.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// What the component shows in place of (or as) the video.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Loading placeholder.
    Spinner,
    /// Static "Unable to load video." placeholder.
    ErrorMessage,
    Media,
}

impl Surface {
    /// Value mirrored into the container's `data-state` attribute by the web adapter.
    pub fn data_state(self) -> &'static str {
        match self {
            Self::Spinner => "loading",
            Self::ErrorMessage => "error",
            Self::Media => "ready",
        }
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Spinner => Some("Loading video..."),
            Self::ErrorMessage => Some("Unable to load video."),
            Self::Media => None,
        }
    }
}

/// Discrete signals emitted by [`ScrollVideo`](crate::ScrollVideo), drained by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScrollVideoEvent {
    Reset { key: String },
    Loaded,
    Errored,
    Activated,
    Deactivated,
    TargetChanged { target: f64 },
    Corrected { from: f64, to: f64 },
    TornDown,
}

/// Most events a queue holds before the oldest are discarded.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Pending events for the host. Consecutive `Corrected` or `TargetChanged`
/// events coalesce, and the queue never grows past [`EVENT_QUEUE_CAPACITY`],
/// so a host that never drains does not leak.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<ScrollVideoEvent>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: ScrollVideoEvent) {
        match (self.events.back_mut(), &event) {
            (
                Some(ScrollVideoEvent::Corrected { to, .. }),
                ScrollVideoEvent::Corrected { to: next, .. },
            ) => {
                *to = *next;
                return;
            }
            (
                Some(ScrollVideoEvent::TargetChanged { target }),
                ScrollVideoEvent::TargetChanged { target: next },
            ) => {
                *target = *next;
                return;
            }
            _ => {}
        }
        if self.events.len() == EVENT_QUEUE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    #[inline]
    pub(crate) fn drain(&mut self) -> Vec<ScrollVideoEvent> {
        self.events.drain(..).collect()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}
