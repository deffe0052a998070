//! Smoothing driver: per-frame exponential easing of the playback position.
//!
//! Each frame closes `factor` of the gap between the current time and the
//! scroll-derived target instead of seeking straight to it, so bursty scroll
//! input still produces continuous playback.

use crate::media::{FrameHandle, FrameScheduler};

/// One easing step. Returns the new time, or `None` when no write is needed.
#[inline]
pub fn correction_step(target: f64, current: f64, factor: f64, epsilon: f64) -> Option<f64> {
    if target.is_nan() {
        return None;
    }
    let delta = target - current;
    if delta.abs() > epsilon {
        Some(current + delta * factor)
    } else {
        None
    }
}

/// Owns the outstanding frame request, if any.
#[derive(Debug, Clone)]
pub struct SmoothingDriver {
    factor: f64,
    epsilon: f64,
    pending: Option<FrameHandle>,
}

impl SmoothingDriver {
    pub fn new(factor: f64, epsilon: f64) -> Self {
        Self {
            factor,
            epsilon,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Request a frame unless one is already outstanding.
    pub fn start(&mut self, frames: &mut dyn FrameScheduler) {
        if self.pending.is_none() {
            self.pending = frames.request_frame();
        }
    }

    /// Cancel the outstanding frame, if any.
    pub fn stop(&mut self, frames: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            frames.cancel_frame(handle);
        }
    }

    pub fn restart(&mut self, frames: &mut dyn FrameScheduler) {
        self.stop(frames);
        self.start(frames);
    }

    /// Mark the outstanding frame as delivered. Returns false for stale deliveries.
    pub fn frame_fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[inline]
    pub fn step(&self, target: f64, current: f64) -> Option<f64> {
        correction_step(target, current, self.factor, self.epsilon)
    }
}
