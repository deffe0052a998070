#![allow(dead_code)]

use learnlab_scroll_video_core::{
    Config, FrameHandle, FrameScheduler, IntersectionUpdate, MediaBackend, Playlist, ReadyState,
    ScrollGeometry, ScrollVideo, SourceInput, Viewport,
};

pub fn init_tracing() {
    let default_filter = "learnlab_scroll_video_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct FakeMedia {
    pub ready: ReadyState,
    pub current: f64,
    pub duration: f64,
    pub paused: bool,
    pub loads: Vec<Playlist>,
    pub writes: Vec<f64>,
}

impl FakeMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            ready: ReadyState::HaveNothing,
            current: 0.0,
            duration,
            paused: false,
            loads: Vec::new(),
            writes: Vec::new(),
        }
    }

    pub fn buffered(duration: f64) -> Self {
        Self {
            ready: ReadyState::HaveEnoughData,
            ..Self::new(duration)
        }
    }
}

impl MediaBackend for FakeMedia {
    fn ready_state(&self) -> ReadyState {
        self.ready
    }
    fn current_time(&self) -> f64 {
        self.current
    }
    fn set_current_time(&mut self, seconds: f64) {
        self.current = seconds;
        self.writes.push(seconds);
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn pause(&mut self) {
        self.paused = true;
    }
    fn load(&mut self, playlist: &Playlist) {
        self.loads.push(playlist.clone());
    }
}

#[derive(Debug, Default)]
pub struct FakeViewport {
    pub geometry: ScrollGeometry,
}

impl FakeViewport {
    pub fn at(container_top: f64, container_height: f64, viewport_height: f64) -> Self {
        Self {
            geometry: ScrollGeometry::new(container_top, container_height, viewport_height),
        }
    }
}

impl Viewport for FakeViewport {
    fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }
}

#[derive(Debug, Default)]
pub struct FakeFrames {
    next: u32,
    pub outstanding: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    pub requested: u32,
    pub refuse: bool,
}

impl FrameScheduler for FakeFrames {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.refuse {
            return None;
        }
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.outstanding.push(handle);
        Some(handle)
    }
    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.outstanding.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

pub type TestVideo = ScrollVideo<FakeMedia, FakeViewport, FakeFrames>;

pub fn mk_video(media: FakeMedia, viewport: FakeViewport, src: &str) -> TestVideo {
    ScrollVideo::new(
        media,
        viewport,
        FakeFrames::default(),
        SourceInput::primary(src),
        Config::default(),
    )
    .expect("default config is valid")
}

pub const VISIBLE: IntersectionUpdate = IntersectionUpdate {
    is_intersecting: true,
    ratio: 0.5,
};

pub const HIDDEN: IntersectionUpdate = IntersectionUpdate {
    is_intersecting: false,
    ratio: 0.0,
};

impl FakeFrames {
    /// Take the oldest outstanding request as delivered.
    pub fn deliver(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

/// Fire the outstanding frame the way a display refresh would. Returns false if none was pending.
pub fn run_frame(video: &mut TestVideo) -> bool {
    if video.frames_mut().deliver().is_none() {
        return false;
    }
    video.on_frame();
    true
}

pub fn run_frames(video: &mut TestVideo, n: usize) {
    for _ in 0..n {
        run_frame(video);
    }
}
