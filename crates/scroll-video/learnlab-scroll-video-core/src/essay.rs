//! Video essay manifests.
//!
//! An essay is an ordered list of clips, each rendered as one scroll-video
//! section next to its title, summary and notes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollVideoError};
use crate::source::{resolve_sources, Playlist, SourceInput, SourceSpec};

fn default_track_height_vh() -> f64 {
    200.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EssayManifest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Scroll track height of every clip section, in viewport-height units.
    #[serde(default = "default_track_height_vh")]
    pub track_height_vh: f64,
    pub clips: Vec<EssayClip>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EssayClip {
    pub id: String,
    #[serde(default)]
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceSpec>>,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl EssayClip {
    pub fn source_input(&self) -> SourceInput {
        SourceInput {
            primary: self.src.clone(),
            sources: self.sources.clone(),
        }
    }

    pub fn playlist(&self) -> Playlist {
        resolve_sources(&self.source_input())
    }
}

impl EssayManifest {
    pub fn sequence_label(index: usize) -> String {
        format!("Sequence {}", index + 1)
    }

    pub fn clip(&self, id: &str) -> Option<&EssayClip> {
        self.clips.iter().find(|c| c.id == id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clips.is_empty() {
            return Err(invalid("essay has no clips"));
        }
        if !(self.track_height_vh.is_finite() && self.track_height_vh > 0.0) {
            return Err(invalid("track_height_vh must be finite and > 0"));
        }
        let mut seen = HashSet::new();
        for clip in &self.clips {
            if !seen.insert(clip.id.as_str()) {
                return Err(invalid(&format!("duplicate clip id '{}'", clip.id)));
            }
            if clip.playlist().is_empty() {
                return Err(invalid(&format!("clip '{}' has no source", clip.id)));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ScrollVideoError {
    ScrollVideoError::InvalidEssay {
        reason: reason.to_string(),
    }
}

/// Parse and validate an essay manifest.
pub fn parse_essay_json(json: &str) -> Result<EssayManifest> {
    let manifest: EssayManifest = serde_json::from_str(json)?;
    manifest.validate()?;
    Ok(manifest)
}
