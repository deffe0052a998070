//! Error types for the scroll-video engine

use serde::{Deserialize, Serialize};

/// Errors surfaced by the engine and its manifest loader.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScrollVideoError {
    /// The media backend reported an error for the current playlist.
    #[error("Unable to load video (playlist '{key}')")]
    MediaLoad { key: String },

    /// A configuration field is out of range.
    #[error("Invalid config field {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Essay manifest JSON could not be parsed.
    #[error("Essay parse error: {0}")]
    EssayParse(String),

    /// Essay manifest parsed but is not usable.
    #[error("Invalid essay: {reason}")]
    InvalidEssay { reason: String },
}

impl ScrollVideoError {
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MediaLoad { .. } => "media",
            Self::InvalidConfig { .. } => "config",
            Self::EssayParse(_) | Self::InvalidEssay { .. } => "essay",
        }
    }
}

impl From<serde_json::Error> for ScrollVideoError {
    fn from(err: serde_json::Error) -> Self {
        Self::EssayParse(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, ScrollVideoError>;
