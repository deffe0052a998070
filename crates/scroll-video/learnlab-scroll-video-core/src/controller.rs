//! ScrollVideo: one scroll-synchronized media element.
//!
//! Event handlers:
//! - `set_sources`: resolve inputs, reset the load lifecycle when the playlist key changes
//! - `on_media_signal`: readiness / error signals from the backend
//! - `on_intersection`: visibility updates (starts/stops the frame loop)
//! - `on_scroll`: map geometry to the target time
//! - `on_frame`: ease the backend's current time toward the target
//! - `teardown`: release the frame request (also runs on drop)
//!
//! The mapper and the easing write only take effect while the instance is both
//! active and loaded.

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{Result, ScrollVideoError};
use crate::lifecycle::{LoadLifecycle, LoadStatus};
use crate::mapper::target_time;
use crate::media::{FrameScheduler, MediaBackend, MediaSignal, Viewport};
use crate::outputs::{EventQueue, ScrollVideoEvent, Surface};
use crate::smoothing::SmoothingDriver;
use crate::source::{playlist_key, resolve_sources, Playlist, PlaylistKey, SourceInput};
use crate::visibility::{IntersectionUpdate, VisibilityGate};

pub struct ScrollVideo<M: MediaBackend, V: Viewport, F: FrameScheduler> {
    cfg: Config,
    media: M,
    viewport: V,
    frames: F,

    input: SourceInput,
    playlist: Playlist,
    key: PlaylistKey,

    lifecycle: LoadLifecycle,
    gate: VisibilityGate,
    driver: SmoothingDriver,
    target: f64,

    events: EventQueue,
    torn_down: bool,
}

impl<M: MediaBackend, V: Viewport, F: FrameScheduler> std::fmt::Debug for ScrollVideo<M, V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollVideo")
            .field("key", &self.key)
            .field("status", &self.lifecycle.status())
            .field("active", &self.gate.is_active())
            .field("target", &self.target)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl<M: MediaBackend, V: Viewport, F: FrameScheduler> ScrollVideo<M, V, F> {
    /// Create an instance and perform the initial load of `input`.
    pub fn new(media: M, viewport: V, frames: F, input: SourceInput, cfg: Config) -> Result<Self> {
        cfg.validate()?;
        let playlist = resolve_sources(&input);
        let key = playlist_key(&playlist);
        let mut this = Self {
            lifecycle: LoadLifecycle::new(cfg.ready_threshold),
            gate: VisibilityGate::new(cfg.visibility.clone()),
            driver: SmoothingDriver::new(cfg.smoothing_factor, cfg.settle_epsilon),
            cfg,
            media,
            viewport,
            frames,
            input,
            playlist,
            key,
            target: 0.0,
            events: EventQueue::default(),
            torn_down: false,
        };
        this.reset();
        if this.gate.is_active() {
            this.driver.start(&mut this.frames);
            this.map_scroll();
        }
        Ok(this)
    }

    // ---- accessors ----

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn input(&self) -> &SourceInput {
        &self.input
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn key(&self) -> &PlaylistKey {
        &self.key
    }

    pub fn status(&self) -> LoadStatus {
        self.lifecycle.status()
    }

    pub fn loaded(&self) -> bool {
        self.lifecycle.loaded()
    }

    pub fn errored(&self) -> bool {
        self.lifecycle.errored()
    }

    pub fn surface(&self) -> Surface {
        self.lifecycle.status().surface()
    }

    /// The sticky media error for the current playlist, if one was reported.
    pub fn error(&self) -> Option<ScrollVideoError> {
        self.lifecycle
            .errored()
            .then(|| ScrollVideoError::MediaLoad {
                key: self.key.to_string(),
            })
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn frame_pending(&self) -> bool {
        self.driver.is_running()
    }

    pub fn target_time(&self) -> f64 {
        self.target
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn drain_events(&mut self) -> Vec<ScrollVideoEvent> {
        self.events.drain()
    }

    // ---- handlers ----

    /// Replace the source inputs. The media is reloaded only if the resolved playlist changed.
    pub fn set_sources(&mut self, input: SourceInput) {
        if self.torn_down || input == self.input {
            return;
        }
        let playlist = resolve_sources(&input);
        let key = playlist_key(&playlist);
        self.input = input;
        if key == self.key {
            return;
        }
        self.playlist = playlist;
        self.key = key;
        self.reset();
        if self.gate.is_active() {
            self.driver.restart(&mut self.frames);
            self.map_scroll();
        }
    }

    pub fn on_media_signal(&mut self, signal: MediaSignal) {
        if self.torn_down {
            return;
        }
        if !self.lifecycle.apply(signal) {
            return;
        }
        if signal.is_readiness() {
            self.events.push(ScrollVideoEvent::Loaded);
            self.map_scroll();
        } else {
            warn!(key = %self.key, "scroll video failed to load");
            self.events.push(ScrollVideoEvent::Errored);
        }
    }

    pub fn on_intersection(&mut self, update: IntersectionUpdate) {
        if self.torn_down {
            return;
        }
        match self.gate.observe(update) {
            Some(true) => {
                debug!(key = %self.key, "scroll video activated");
                self.events.push(ScrollVideoEvent::Activated);
                self.driver.start(&mut self.frames);
                self.poll_ready();
                self.map_scroll();
            }
            Some(false) => {
                debug!(key = %self.key, "scroll video deactivated");
                self.events.push(ScrollVideoEvent::Deactivated);
                self.driver.stop(&mut self.frames);
            }
            None => {}
        }
    }

    /// Compute visibility from the viewport probe instead of a native observer.
    pub fn observe_viewport(&mut self) {
        let update = IntersectionUpdate::from_geometry(&self.viewport.geometry(), self.gate.cfg());
        self.on_intersection(update);
    }

    pub fn on_scroll(&mut self) {
        if self.torn_down {
            return;
        }
        if self.gate.is_active() {
            // Picks the loop back up if an earlier frame request was refused.
            self.driver.start(&mut self.frames);
        }
        self.map_scroll();
    }

    /// Deliver the requested display-refresh callback.
    pub fn on_frame(&mut self) {
        if self.torn_down || !self.driver.frame_fired() {
            return;
        }
        if !self.gate.is_active() {
            return;
        }
        if self.lifecycle.loaded() {
            let current = self.media.current_time();
            if let Some(next) = self.driver.step(self.target, current) {
                trace!(from = current, to = next, target = self.target, "ease");
                self.media.set_current_time(next);
                self.events.push(ScrollVideoEvent::Corrected {
                    from: current,
                    to: next,
                });
            }
        }
        self.driver.start(&mut self.frames);
    }

    /// Release the frame request and ignore every later event. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.driver.stop(&mut self.frames);
        self.gate.deactivate();
        self.torn_down = true;
        debug!(key = %self.key, "scroll video torn down");
        self.events.push(ScrollVideoEvent::TornDown);
    }

    // ---- internals ----

    fn reset(&mut self) {
        debug!(key = %self.key, sources = self.playlist.len(), "scroll video reset");
        self.target = 0.0;
        self.media.pause();
        self.media.set_current_time(0.0);
        self.media.load(&self.playlist);
        self.events.push(ScrollVideoEvent::Reset {
            key: self.key.to_string(),
        });
        if self.lifecycle.reset(self.media.ready_state()) {
            self.events.push(ScrollVideoEvent::Loaded);
        }
    }

    /// Pick up readiness that arrived without an event (e.g. cached media).
    fn poll_ready(&mut self) {
        if self.lifecycle.poll(self.media.ready_state()) {
            self.events.push(ScrollVideoEvent::Loaded);
        }
    }

    fn map_scroll(&mut self) {
        if !self.lifecycle.loaded() || !self.gate.is_active() {
            return;
        }
        let geometry = self.viewport.geometry();
        if let Some(target) = target_time(&geometry, self.media.duration()) {
            if target != self.target {
                self.target = target;
                self.events.push(ScrollVideoEvent::TargetChanged { target });
            }
        }
    }
}

impl<M: MediaBackend, V: Viewport, F: FrameScheduler> Drop for ScrollVideo<M, V, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
