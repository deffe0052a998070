//! Source resolution: candidate locations → ordered playlist with MIME types.

use serde::{Deserialize, Serialize};

/// One resolved entry of a playlist.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaSource {
    pub location: String,
    pub mime_type: String,
}

/// Caller-supplied candidate, `{ src, type? }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    #[serde(default)]
    pub src: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl SourceSpec {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: None,
        }
    }

    pub fn with_type(src: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: Some(mime_type.into()),
        }
    }
}

/// Source inputs of one component instance: a primary location plus an optional explicit list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInput {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub sources: Option<Vec<SourceSpec>>,
}

impl SourceInput {
    pub fn primary(src: impl Into<String>) -> Self {
        Self {
            primary: src.into(),
            sources: None,
        }
    }

    pub fn with_sources(primary: impl Into<String>, sources: Vec<SourceSpec>) -> Self {
        Self {
            primary: primary.into(),
            sources: Some(sources),
        }
    }
}

pub type Playlist = Vec<MediaSource>;

/// Identity of an ordered playlist; changes whenever content or order changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistKey(pub String);

impl PlaylistKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// MIME type for a location, by literal suffix. Unknown suffixes are treated as MP4.
pub fn infer_mime_type(location: &str) -> &'static str {
    const TABLE: [(&str, &str); 4] = [
        (".webm", "video/webm"),
        (".mov", "video/quicktime"),
        (".mkv", "video/x-matroska"),
        (".ogv", "video/ogg"),
    ];
    TABLE
        .iter()
        .find(|(ext, _)| location.ends_with(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or("video/mp4")
}

/// Resolve the component inputs into a playlist.
///
/// Explicit sources win when at least one has a non-empty `src` (empty entries are
/// dropped); otherwise the primary location is used if non-empty.
pub fn resolve_sources(input: &SourceInput) -> Playlist {
    let explicit: Vec<&SourceSpec> = input
        .sources
        .iter()
        .flatten()
        .filter(|s| !s.src.is_empty())
        .collect();

    if !explicit.is_empty() {
        return explicit.into_iter().map(to_media_source).collect();
    }
    if input.primary.is_empty() {
        return Vec::new();
    }
    vec![MediaSource {
        mime_type: infer_mime_type(&input.primary).to_string(),
        location: input.primary.clone(),
    }]
}

fn to_media_source(spec: &SourceSpec) -> MediaSource {
    MediaSource {
        location: spec.src.clone(),
        mime_type: spec
            .mime_type
            .clone()
            .unwrap_or_else(|| infer_mime_type(&spec.src).to_string()),
    }
}

pub fn playlist_key(playlist: &[MediaSource]) -> PlaylistKey {
    let parts: Vec<String> = playlist
        .iter()
        .map(|s| format!("{}:{}", s.location, s.mime_type))
        .collect();
    PlaylistKey(parts.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_inference_table() {
        assert_eq!(infer_mime_type("/v/a.webm"), "video/webm");
        assert_eq!(infer_mime_type("/v/a.mov"), "video/quicktime");
        assert_eq!(infer_mime_type("/v/a.mkv"), "video/x-matroska");
        assert_eq!(infer_mime_type("/v/a.ogv"), "video/ogg");
        assert_eq!(infer_mime_type("/v/a.mp4"), "video/mp4");
        assert_eq!(infer_mime_type("/v/stream"), "video/mp4");
        assert_eq!(infer_mime_type("/v/A.WEBM"), "video/mp4");
        assert_eq!(infer_mime_type(""), "video/mp4");
    }

    #[test]
    fn empty_inputs_resolve_to_empty_playlist() {
        assert!(resolve_sources(&SourceInput::default()).is_empty());
        let only_blank = SourceInput::with_sources("", vec![SourceSpec::new("")]);
        assert!(resolve_sources(&only_blank).is_empty());
        assert_eq!(playlist_key(&[]), PlaylistKey::default());
    }

    #[test]
    fn primary_source_gets_inferred_type() {
        let list = resolve_sources(&SourceInput::primary("/videos/clip_000.webm"));
        assert_eq!(
            list,
            vec![MediaSource {
                location: "/videos/clip_000.webm".into(),
                mime_type: "video/webm".into(),
            }]
        );
        let list = resolve_sources(&SourceInput::primary("/videos/clip"));
        assert_eq!(list[0].mime_type, "video/mp4");
    }

    #[test]
    fn explicit_sources_take_precedence_and_keep_order() {
        let input = SourceInput::with_sources(
            "/fallback.mp4",
            vec![
                SourceSpec::new("/a.webm"),
                SourceSpec::new(""),
                SourceSpec::with_type("/b", "video/custom"),
            ],
        );
        let list = resolve_sources(&input);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].location, "/a.webm");
        assert_eq!(list[0].mime_type, "video/webm");
        assert_eq!(list[1].mime_type, "video/custom");
    }

    #[test]
    fn blank_explicit_list_falls_back_to_primary() {
        let input = SourceInput::with_sources("/fallback.mov", vec![SourceSpec::new("")]);
        let list = resolve_sources(&input);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].mime_type, "video/quicktime");
    }

    #[test]
    fn key_tracks_content_and_order() {
        let a = resolve_sources(&SourceInput::with_sources(
            "",
            vec![SourceSpec::new("/a.webm"), SourceSpec::new("/b.mp4")],
        ));
        let b = resolve_sources(&SourceInput::with_sources(
            "",
            vec![SourceSpec::new("/b.mp4"), SourceSpec::new("/a.webm")],
        ));
        assert_eq!(playlist_key(&a), playlist_key(&a.clone()));
        assert_ne!(playlist_key(&a), playlist_key(&b));
        assert_eq!(playlist_key(&a).as_str(), "/a.webm:video/webm|/b.mp4:video/mp4");
    }

    #[test]
    fn source_spec_uses_type_field_name() {
        let spec: SourceSpec = serde_json::from_str(r#"{"src":"/a","type":"video/ogg"}"#).unwrap();
        assert_eq!(spec, SourceSpec::with_type("/a", "video/ogg"));
    }
}
