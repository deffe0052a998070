use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Array;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use tracing::{debug, warn};
use web_sys::{
    AddEventListenerOptions, Event, HtmlElement, HtmlVideoElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use learnlab_scroll_video_core::{
    parse_essay_json, Config, IntersectionUpdate, MediaSignal, ScrollGeometry, ScrollVideo,
    SourceInput, SourceSpec,
};

mod host;

pub use host::{is_terminal_media_error, ElementViewport, RafScheduler, WebMedia};

type WebScrollVideo = ScrollVideo<WebMedia, ElementViewport, RafScheduler>;
type Shared = Rc<RefCell<Option<WebScrollVideo>>>;

const MEDIA_SIGNALS: [MediaSignal; 4] = [
    MediaSignal::LoadedMetadata,
    MediaSignal::LoadedData,
    MediaSignal::CanPlay,
    MediaSignal::Error,
];

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_err(context: &str, e: JsValue) -> JsError {
    JsError::new(&format!("{context}: {e:?}"))
}

fn source_input(video_src: String, sources: JsValue) -> Result<SourceInput, JsError> {
    let sources: Option<Vec<SourceSpec>> = if jsvalue_is_undefined_or_null(&sources) {
        None
    } else {
        Some(swb::from_value(sources).map_err(|e| JsError::new(&format!("sources error: {e}")))?)
    };
    Ok(SourceInput {
        primary: video_src,
        sources,
    })
}

/// Run a handler against the controller unless it is gone or already borrowed,
/// then mirror the display surface into the container's `data-state`.
fn with_video(state: &Weak<RefCell<Option<WebScrollVideo>>>, f: impl FnOnce(&mut WebScrollVideo)) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Ok(mut slot) = state.try_borrow_mut() else {
        return;
    };
    if let Some(video) = slot.as_mut() {
        f(video);
        sync_surface(video);
    }
}

fn sync_surface(video: &mut WebScrollVideo) {
    if video.drain_events().is_empty() {
        return;
    }
    let state = video.surface().data_state();
    if let Err(e) = video
        .viewport()
        .container()
        .set_attribute("data-state", state)
    {
        warn!(error = ?e, state, "could not mirror data-state");
    }
}

/// Event listeners and observer owned by one attached element.
struct Listeners {
    window: Window,
    video: HtmlVideoElement,
    scroll: Closure<dyn FnMut()>,
    media: Vec<(MediaSignal, Closure<dyn FnMut(Event)>)>,
    observer: IntersectionObserver,
    _observer_cb: Closure<dyn FnMut(Array, IntersectionObserver)>,
    frame_cb: host::FrameCallback,
}

impl Listeners {
    fn detach(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.scroll.as_ref().unchecked_ref());
        for (signal, cb) in &self.media {
            let f: &js_sys::Function = cb.as_ref().unchecked_ref();
            let _ = if *signal == MediaSignal::Error {
                self.video
                    .remove_event_listener_with_callback_and_bool(signal.event_name(), f, true)
            } else {
                self.video
                    .remove_event_listener_with_callback(signal.event_name(), f)
            };
        }
        self.observer.disconnect();
        self.frame_cb.borrow_mut().take();
    }
}

/// Scroll-synchronized playback bound to a container and its `<video>`.
///
/// The container is the tall scroll track; the video usually sits in a sticky
/// child. Call `dispose()` (or let the JS wrapper be freed) to detach.
#[wasm_bindgen]
pub struct ScrollVideoElement {
    state: Shared,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl ScrollVideoElement {
    /// Attach to `container` / `video`. `sources` is an optional `[{ src, type? }]` array and
    /// `config` an optional partial config object; pass undefined/null for defaults.
    /// Example:
    ///   new ScrollVideoElement(section, video, "/videos/clip_000.webm", undefined, { smoothing_factor: 0.2 })
    #[wasm_bindgen(constructor)]
    pub fn attach(
        container: HtmlElement,
        video: HtmlVideoElement,
        video_src: String,
        sources: JsValue,
        config: JsValue,
    ) -> Result<ScrollVideoElement, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let input = source_input(video_src, sources)?;

        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("window has no document"))?;

        container
            .style()
            .set_property("height", &format!("{}vh", cfg.track_height_vh))
            .map_err(|e| js_err("track height", e))?;

        let state: Shared = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&state);

        // Frame loop
        let frame_cb: host::FrameCallback = Rc::new(RefCell::new(None));
        {
            let weak = weak.clone();
            *frame_cb.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
                with_video(&weak, |v| v.on_frame());
            }));
        }

        let visibility = cfg.visibility.clone();
        let controller = ScrollVideo::new(
            WebMedia::prepare(video.clone(), document),
            ElementViewport::new(container.clone().into(), window.clone()),
            RafScheduler::new(window.clone(), frame_cb.clone()),
            input,
            cfg,
        )
        .map_err(|e| JsError::new(&e.to_string()))?;
        *state.borrow_mut() = Some(controller);
        if let Some(v) = state.borrow_mut().as_mut() {
            sync_surface(v);
        }

        // Media lifecycle; errors from <source> children only reach the video in the capture phase.
        let mut media = Vec::with_capacity(MEDIA_SIGNALS.len());
        for signal in MEDIA_SIGNALS {
            let weak = weak.clone();
            let cb = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if signal == MediaSignal::Error && !host::is_terminal_media_error(&event) {
                    debug!("source candidate failed, trying the next one");
                    return;
                }
                with_video(&weak, |v| v.on_media_signal(signal));
            });
            let f: &js_sys::Function = cb.as_ref().unchecked_ref();
            let added = if signal == MediaSignal::Error {
                video.add_event_listener_with_callback_and_bool(signal.event_name(), f, true)
            } else {
                video.add_event_listener_with_callback(signal.event_name(), f)
            };
            added.map_err(|e| js_err("media listener", e))?;
            media.push((signal, cb));
        }

        // Scroll
        let scroll = {
            let weak = weak.clone();
            Closure::<dyn FnMut()>::new(move || {
                with_video(&weak, |v| v.on_scroll());
            })
        };
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                scroll.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| js_err("scroll listener", e))?;

        // Visibility
        let observer_cb = {
            let weak = weak.clone();
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, _observer: IntersectionObserver| {
                    let Ok(entry) = entries.get(0).dyn_into::<IntersectionObserverEntry>() else {
                        return;
                    };
                    let update = IntersectionUpdate {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    with_video(&weak, |v| v.on_intersection(update));
                },
            )
        };
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(visibility.threshold));
        init.set_root_margin(&visibility.root_margin());
        let observer =
            IntersectionObserver::new_with_options(observer_cb.as_ref().unchecked_ref(), &init)
                .map_err(|e| js_err("intersection observer", e))?;
        if visibility.gated {
            observer.observe(&container);
        }

        Ok(ScrollVideoElement {
            state,
            listeners: Some(Listeners {
                window,
                video,
                scroll,
                media,
                observer,
                _observer_cb: observer_cb,
                frame_cb,
            }),
        })
    }

    /// Replace the sources; the video reloads only if the resolved playlist changed.
    #[wasm_bindgen(js_name = set_sources)]
    pub fn set_sources(&mut self, video_src: String, sources: JsValue) -> Result<(), JsError> {
        let input = source_input(video_src, sources)?;
        with_video(&Rc::downgrade(&self.state), |v| v.set_sources(input));
        Ok(())
    }

    #[wasm_bindgen(js_name = is_video_loaded)]
    pub fn is_video_loaded(&self) -> bool {
        self.read(|v| v.loaded()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = had_error)]
    pub fn had_error(&self) -> bool {
        self.read(|v| v.errored()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = is_active)]
    pub fn is_active(&self) -> bool {
        self.read(|v| v.is_active()).unwrap_or(false)
    }

    /// "loading" | "error" | "ready", or "disposed".
    #[wasm_bindgen]
    pub fn surface(&self) -> String {
        self.read(|v| v.surface().data_state().to_string())
            .unwrap_or_else(|| "disposed".to_string())
    }

    #[wasm_bindgen(js_name = target_time)]
    pub fn target_time(&self) -> f64 {
        self.read(|v| v.target_time()).unwrap_or(0.0)
    }

    /// Cancel the frame loop and remove every listener. Safe to call more than once.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        if let Ok(mut slot) = self.state.try_borrow_mut() {
            // Dropping the controller tears it down and cancels the pending frame.
            slot.take();
        }
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
        }
    }
}

impl ScrollVideoElement {
    fn read<T>(&self, f: impl FnOnce(&WebScrollVideo) -> T) -> Option<T> {
        let slot = self.state.try_borrow().ok()?;
        slot.as_ref().map(f)
    }
}

impl Drop for ScrollVideoElement {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Resolve `video_src` plus optional `[{ src, type? }]` into `[{ location, mime_type }]`.
#[wasm_bindgen(js_name = resolve_sources)]
pub fn resolve_sources(video_src: String, sources: JsValue) -> Result<JsValue, JsError> {
    let input = source_input(video_src, sources)?;
    let playlist = learnlab_scroll_video_core::resolve_sources(&input);
    swb::to_value(&playlist).map_err(|e| JsError::new(&format!("playlist error: {e}")))
}

#[wasm_bindgen(js_name = infer_mime_type)]
pub fn infer_mime_type(location: &str) -> String {
    learnlab_scroll_video_core::infer_mime_type(location).to_string()
}

#[wasm_bindgen(js_name = scroll_progress)]
pub fn scroll_progress(container_top: f64, container_height: f64, viewport_height: f64) -> f64 {
    learnlab_scroll_video_core::scroll_progress(&ScrollGeometry::new(
        container_top,
        container_height,
        viewport_height,
    ))
}

/// Parse and validate an essay manifest (JSON string). Returns the manifest object.
#[wasm_bindgen(js_name = parse_essay)]
pub fn parse_essay(json: &str) -> Result<JsValue, JsError> {
    let manifest = parse_essay_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    swb::to_value(&manifest).map_err(|e| JsError::new(&format!("essay error: {e}")))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
