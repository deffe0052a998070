//! Host seams: media backend, viewport probe and frame scheduler.
//!
//! Adapters (wasm, tests) implement these and hand them to
//! [`ScrollVideo::new`](crate::ScrollVideo::new).

use serde::{Deserialize, Serialize};

use crate::mapper::ScrollGeometry;
use crate::source::Playlist;

/// Readiness level reported by a media backend, ordered like the HTML media element's `readyState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Map a raw `readyState` number; values above 4 saturate.
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0 => Self::HaveNothing,
            1 => Self::HaveMetadata,
            2 => Self::HaveCurrentData,
            3 => Self::HaveFutureData,
            _ => Self::HaveEnoughData,
        }
    }
}

/// Lifecycle signals emitted by a media backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSignal {
    LoadedMetadata,
    LoadedData,
    CanPlay,
    Error,
}

impl MediaSignal {
    /// DOM event name for this signal.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::LoadedMetadata => "loadedmetadata",
            Self::LoadedData => "loadeddata",
            Self::CanPlay => "canplay",
            Self::Error => "error",
        }
    }

    pub fn is_readiness(self) -> bool {
        !matches!(self, Self::Error)
    }
}

/// A muted, inline, non-autoplaying playable media primitive.
pub trait MediaBackend {
    fn ready_state(&self) -> ReadyState;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Raw duration in seconds; NaN or 0 while metadata is missing.
    fn duration(&self) -> f64;
    fn pause(&mut self);
    /// Replace the media's sources and re-initialize it.
    fn load(&mut self, playlist: &Playlist);
}

/// Reads the container's geometry relative to the viewport.
pub trait Viewport {
    fn geometry(&self) -> ScrollGeometry;
}

/// Opaque handle for a requested display-refresh callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// "Call me on the next display refresh" primitive.
///
/// When the requested frame fires the host calls
/// [`ScrollVideo::on_frame`](crate::ScrollVideo::on_frame). `None` means the
/// request could not be made; the next `start` retries.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_ordering_and_raw_mapping() {
        assert!(ReadyState::HaveCurrentData > ReadyState::HaveMetadata);
        assert_eq!(ReadyState::from_raw(2), ReadyState::HaveCurrentData);
        assert_eq!(ReadyState::from_raw(9), ReadyState::HaveEnoughData);
    }

    #[test]
    fn signals() {
        assert!(MediaSignal::CanPlay.is_readiness());
        assert!(!MediaSignal::Error.is_readiness());
        assert_eq!(MediaSignal::LoadedMetadata.event_name(), "loadedmetadata");
    }
}
