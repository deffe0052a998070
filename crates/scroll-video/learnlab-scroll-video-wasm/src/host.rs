//! Browser implementations of the core host traits.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlVideoElement, Window};

use learnlab_scroll_video_core::{
    FrameHandle, FrameScheduler, MediaBackend, Playlist, ReadyState, ScrollGeometry, Viewport,
};

/// A `<video>` element driven only by seeks: muted, inline, never autoplaying.
pub struct WebMedia {
    video: HtmlVideoElement,
    document: Document,
}

impl WebMedia {
    pub fn prepare(video: HtmlVideoElement, document: Document) -> Self {
        video.set_muted(true);
        video.set_default_muted(true);
        video.set_autoplay(false);
        video.set_preload("auto");
        if let Err(e) = video.set_attribute("playsinline", "") {
            warn!(error = ?e, "could not set playsinline");
        }
        Self { video, document }
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }

    /// Swap the `<source>` children for the playlist's entries.
    fn write_sources(&self, playlist: &Playlist) -> Result<(), JsValue> {
        self.video.remove_attribute("src")?;
        let old = self.video.query_selector_all("source")?;
        for i in 0..old.length() {
            if let Some(node) = old.get(i) {
                self.video.remove_child(&node)?;
            }
        }
        for source in playlist {
            let el: Element = self.document.create_element("source")?;
            el.set_attribute("src", &source.location)?;
            el.set_attribute("type", &source.mime_type)?;
            self.video.append_child(&el)?;
        }
        Ok(())
    }
}

impl MediaBackend for WebMedia {
    fn ready_state(&self) -> ReadyState {
        ReadyState::from_raw(self.video.ready_state())
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn pause(&mut self) {
        if let Err(e) = self.video.pause() {
            warn!(error = ?e, "video pause failed");
        }
    }

    fn load(&mut self, playlist: &Playlist) {
        if let Err(e) = self.write_sources(playlist) {
            warn!(error = ?e, "could not write <source> elements");
        }
        self.video.load();
    }
}

fn is_source(el: &Element) -> bool {
    el.tag_name().eq_ignore_ascii_case("source")
}

/// Whether an `error` seen on the video means the whole playlist failed.
///
/// A failing `<source>` child only ends resource selection when no later
/// `<source>` sibling is left to try; errors raised on the video itself are
/// always terminal.
pub fn is_terminal_media_error(event: &Event) -> bool {
    let Some(el) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return true;
    };
    if !is_source(&el) {
        return true;
    }
    let mut next = el.next_element_sibling();
    while let Some(sibling) = next {
        if is_source(&sibling) {
            return false;
        }
        next = sibling.next_element_sibling();
    }
    true
}

/// Reads the container's bounding rect against `window.innerHeight`.
pub struct ElementViewport {
    container: Element,
    window: Window,
}

impl ElementViewport {
    pub fn new(container: Element, window: Window) -> Self {
        Self { container, window }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }
}

impl Viewport for ElementViewport {
    fn geometry(&self) -> ScrollGeometry {
        let rect = self.container.get_bounding_client_rect();
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        ScrollGeometry::new(rect.top(), rect.height(), viewport_height)
    }
}

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` scheduler. The callback is installed after construction
/// because it needs a handle to the controller that owns this scheduler.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id as u32)),
            Err(e) => {
                warn!(error = ?e, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0 as i32) {
            warn!(error = ?e, "cancelAnimationFrame failed");
        }
    }
}
