//! Scroll-to-time mapping.
//!
//! Progress is 0 when the container's top edge sits on the viewport's bottom
//! edge and 1 once the container has scrolled its full height above the top
//! of the viewport:
//!
//! ```text
//! scroll_start = viewport_height
//! scroll_end   = -container_height
//! progress     = clamp01(1 - (container_top - scroll_end) / (scroll_start - scroll_end))
//! ```

use serde::{Deserialize, Serialize};

/// Container position relative to the viewport, in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub container_top: f64,
    pub container_height: f64,
    pub viewport_height: f64,
}

impl ScrollGeometry {
    pub fn new(container_top: f64, container_height: f64, viewport_height: f64) -> Self {
        Self {
            container_top,
            container_height,
            viewport_height,
        }
    }
}

pub fn scroll_progress(geometry: &ScrollGeometry) -> f64 {
    let scroll_start = geometry.viewport_height;
    let scroll_end = -geometry.container_height;
    let distance = scroll_start - scroll_end;
    if distance.is_nan() || distance <= 0.0 {
        return 0.0;
    }
    let current = geometry.container_top - scroll_end;
    let progress = 1.0 - current / distance;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Duration usable for scaling: finite and strictly positive.
#[inline]
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

/// Target playback time for a geometry, or `None` while the duration is unknown.
pub fn target_time(geometry: &ScrollGeometry, raw_duration: f64) -> Option<f64> {
    known_duration(raw_duration).map(|d| scroll_progress(geometry) * d)
}
