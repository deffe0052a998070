//! Visibility gate: owns the activity flag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::VisibilityCfg;
use crate::mapper::ScrollGeometry;

/// One intersection observation, as a native observer reports it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionUpdate {
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Visible fraction of the container inside the viewport shrunk by the bottom margin.
pub fn visible_ratio(geometry: &ScrollGeometry, bottom_margin: f64) -> f64 {
    if geometry.container_height <= 0.0 {
        return 0.0;
    }
    let root_bottom = geometry.viewport_height * (1.0 - bottom_margin);
    let top = geometry.container_top.max(0.0);
    let bottom = (geometry.container_top + geometry.container_height).min(root_bottom);
    ((bottom - top).max(0.0) / geometry.container_height).clamp(0.0, 1.0)
}

impl IntersectionUpdate {
    /// Compute an observation from raw geometry.
    pub fn from_geometry(geometry: &ScrollGeometry, cfg: &VisibilityCfg) -> Self {
        let ratio = visible_ratio(geometry, cfg.bottom_margin);
        Self {
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityGate {
    cfg: VisibilityCfg,
    active: bool,
}

impl VisibilityGate {
    /// Ungated instances start (and stay) active.
    pub fn new(cfg: VisibilityCfg) -> Self {
        let active = !cfg.gated;
        Self { cfg, active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cfg(&self) -> &VisibilityCfg {
        &self.cfg
    }

    /// Apply an observation. Returns the new flag if it changed.
    pub fn observe(&mut self, update: IntersectionUpdate) -> Option<bool> {
        if !self.cfg.gated {
            return None;
        }
        let next = update.is_intersecting && update.ratio >= self.cfg.threshold;
        if next == self.active {
            return None;
        }
        debug!(
            ratio = update.ratio,
            active = next,
            "scroll video visibility changed"
        );
        self.active = next;
        Some(next)
    }

    /// Force the flag off, e.g. on teardown.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
