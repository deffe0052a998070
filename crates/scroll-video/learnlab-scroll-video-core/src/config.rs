//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollVideoError};
use crate::media::ReadyState;

/// Tuning for one scroll-video instance.
///
/// Every field has a default, so hosts can pass partial JSON objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fraction of the remaining gap between current and target time closed per frame.
    pub smoothing_factor: f64,
    /// Gaps at or below this many seconds are left alone.
    pub settle_epsilon: f64,
    pub visibility: VisibilityCfg,
    /// Ready state at which a freshly reset backend counts as loaded without waiting for an event.
    pub ready_threshold: ReadyState,
    /// Height of the scroll track in viewport-height units. Layout hint for adapters.
    pub track_height_vh: f64,
}

/// Intersection settings for the visibility gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityCfg {
    /// Minimum visible fraction of the container.
    pub threshold: f64,
    /// Fraction of the viewport height removed from its bottom edge.
    pub bottom_margin: f64,
    /// When false the instance is always active.
    pub gated: bool,
}

impl Default for VisibilityCfg {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            bottom_margin: 0.2,
            gated: true,
        }
    }
}

impl VisibilityCfg {
    /// Root margin string in the format accepted by `IntersectionObserver`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", fmt_percent(self.bottom_margin))
    }
}

fn fmt_percent(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{}", pct.round() as i64)
    } else {
        format!("{pct}")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.25,
            settle_epsilon: 0.001,
            visibility: VisibilityCfg::default(),
            ready_threshold: ReadyState::HaveCurrentData,
            track_height_vh: 300.0,
        }
    }
}

impl Config {
    /// Snap-to-scroll variant: no easing and no visibility gating.
    pub fn direct() -> Self {
        Self {
            smoothing_factor: 1.0,
            settle_epsilon: 0.0,
            visibility: VisibilityCfg {
                gated: false,
                ..VisibilityCfg::default()
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(invalid("smoothing_factor", "must be in (0, 1]"));
        }
        if !self.settle_epsilon.is_finite() || self.settle_epsilon < 0.0 {
            return Err(invalid("settle_epsilon", "must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.visibility.threshold) {
            return Err(invalid("visibility.threshold", "must be in [0, 1]"));
        }
        if !(0.0..1.0).contains(&self.visibility.bottom_margin) {
            return Err(invalid("visibility.bottom_margin", "must be in [0, 1)"));
        }
        if !(self.track_height_vh.is_finite() && self.track_height_vh > 0.0) {
            return Err(invalid("track_height_vh", "must be finite and > 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ScrollVideoError {
    ScrollVideoError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
