mod common;

use common::*;
use learnlab_scroll_video_core::{parse_essay_json, Config, EssayManifest, ScrollVideo};
use learnlab_test_fixtures::essays;

#[test]
fn every_fixture_parses() {
    for name in essays::keys() {
        let json = essays::json(&name).unwrap();
        let manifest = parse_essay_json(&json)
            .unwrap_or_else(|e| panic!("essay fixture {name} failed: {e}"));
        assert!(!manifest.clips.is_empty());
    }
}

#[test]
fn electric_city_builds_one_instance_per_clip() {
    let manifest = parse_essay_json(&essays::json("electric-city").unwrap()).unwrap();
    assert_eq!(manifest.track_height_vh, 200.0);
    assert_eq!(manifest.clips.len(), 3);
    assert_eq!(EssayManifest::sequence_label(2), "Sequence 3");

    let cfg = Config {
        track_height_vh: manifest.track_height_vh,
        ..Config::default()
    };
    let videos: Vec<TestVideo> = manifest
        .clips
        .iter()
        .map(|clip| {
            ScrollVideo::new(
                FakeMedia::new(6.0),
                FakeViewport::default(),
                FakeFrames::default(),
                clip.source_input(),
                cfg.clone(),
            )
            .unwrap()
        })
        .collect();

    let mut keys: Vec<&str> = videos.iter().map(|v| v.key().as_str()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 3);
    assert!(videos.iter().all(|v| v.playlist()[0].mime_type == "video/webm"));
}

#[test]
fn explicit_sources_win_over_clip_src() {
    let manifest: EssayManifest = essays::load("multi-source").unwrap();
    manifest.validate().unwrap();
    let intro = manifest.clip("intro").unwrap().playlist();
    assert_eq!(intro.len(), 2);
    assert_eq!(intro[0].mime_type, "video/webm");
    assert_eq!(intro[1].mime_type, "video/quicktime");

    let outro = manifest.clip("outro").unwrap().playlist();
    assert_eq!(outro[0].location, "/videos/outro");
    assert_eq!(outro[0].mime_type, "video/mp4");
}
