//! Learning Lab scroll-video core (host-agnostic)
//!
//! Maps the position of a tall scroll container within the viewport to the
//! playback position of a muted video. The engine is split by responsibility:
//! source resolution, load lifecycle, visibility gating, scroll-to-time mapping
//! and per-frame smoothing. [`ScrollVideo`] ties them together for one media
//! element; adapters (wasm, tests) provide the media backend, a viewport probe
//! and a frame scheduler through the traits in [`media`].

pub mod config;
pub mod controller;
pub mod essay;
pub mod error;
pub mod lifecycle;
pub mod mapper;
pub mod media;
pub mod outputs;
pub mod smoothing;
pub mod source;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use config::{Config, VisibilityCfg};
pub use controller::ScrollVideo;
pub use error::{Result, ScrollVideoError};
pub use essay::{parse_essay_json, EssayClip, EssayManifest};
pub use lifecycle::{LoadLifecycle, LoadStatus};
pub use mapper::{known_duration, scroll_progress, target_time, ScrollGeometry};
pub use media::{FrameHandle, FrameScheduler, MediaBackend, MediaSignal, ReadyState, Viewport};
pub use outputs::{ScrollVideoEvent, Surface, EVENT_QUEUE_CAPACITY};
pub use smoothing::{correction_step, SmoothingDriver};
pub use source::{
    infer_mime_type, playlist_key, resolve_sources, MediaSource, Playlist, PlaylistKey,
    SourceInput, SourceSpec,
};
pub use visibility::{visible_ratio, IntersectionUpdate, VisibilityGate};
