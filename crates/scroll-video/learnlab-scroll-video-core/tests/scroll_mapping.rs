mod common;

use approx::assert_relative_eq;
use common::*;
use learnlab_scroll_video_core::{scroll_progress, ScrollGeometry};
use learnlab_test_fixtures::scenarios;

#[test]
fn progress_endpoints_for_many_sizes() {
    for h in [100.0, 1000.0, 2000.0, 2400.0, 5000.0] {
        for v in [320.0, 800.0, 1080.0] {
            assert_eq!(scroll_progress(&ScrollGeometry::new(v, h, v)), 0.0);
            assert_eq!(scroll_progress(&ScrollGeometry::new(-h, h, v)), 1.0);
            assert_eq!(scroll_progress(&ScrollGeometry::new(v * 2.0, h, v)), 0.0);
            assert_eq!(scroll_progress(&ScrollGeometry::new(-h * 2.0, h, v)), 1.0);
        }
    }
}

#[test]
fn progress_is_monotonic_while_scrolling_down() {
    let (h, v) = (2000.0, 800.0);
    let mut last = -1.0;
    let mut top = v + 200.0;
    while top >= -h - 200.0 {
        let p = scroll_progress(&ScrollGeometry::new(top, h, v));
        assert!(p >= last, "progress decreased at top={top}");
        assert!((0.0..=1.0).contains(&p));
        last = p;
        top -= 25.0;
    }
}

#[test]
fn worked_example_matches_formula() {
    // scroll_start = 800, scroll_end = -2000, distance = 2800.
    let g = ScrollGeometry::new(0.0, 2000.0, 800.0);
    assert_relative_eq!(scroll_progress(&g), 1.0 - 2000.0 / 2800.0, epsilon = 1e-12);
    let g = ScrollGeometry::new(-1200.0, 2000.0, 800.0);
    assert_relative_eq!(scroll_progress(&g), 1.0 - 800.0 / 2800.0, epsilon = 1e-12);
}

#[test]
fn scenario_trace_converges_and_never_runs_backwards() {
    let sc = scenarios::load("scroll-through").expect("scenario fixture");
    let mut video = mk_video(
        FakeMedia::buffered(sc.duration),
        FakeViewport::at(sc.tops[0], sc.container_height, sc.viewport_height),
        "/videos/trace.webm",
    );
    video.on_intersection(VISIBLE);

    let mut last_target = video.target_time();
    for top in &sc.tops {
        video.viewport_mut().geometry.container_top = *top;
        video.on_scroll();
        let target = video.target_time();
        assert!(target >= last_target);
        last_target = target;

        run_frames(&mut video, 60);
        assert!((video.media().current - target).abs() <= 0.001 + 1e-9);
    }
    assert_relative_eq!(last_target, sc.duration);
}
