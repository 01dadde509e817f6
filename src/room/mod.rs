//! Interactive room: the portfolio page drawn on a canvas.
//!
//! `RoomState` is the single owner of all mutable page state (viewport, intro
//! sequencer, panel stack). The pointer handlers and the frame loop borrow it
//! in turn from the `ROOM` thread-local; they never overlap on the browser's
//! single thread. Everything the page does to the outside world (cursor,
//! opening links, leaving the page) goes through the `Host` trait so the state
//! machine can be stepped natively in tests.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement, window};

use crate::config::PortfolioConfig;

pub mod geometry;
pub mod hotspots;
pub mod intro;
pub mod layout;
pub mod panels;
pub mod render;
pub mod router;
pub mod scene;

use geometry::Viewport;
use intro::{IntroSequencer, Lcg, RandomSource};
use panels::UiState;
use render::Sprites;
use router::Cursor;
use scene::FramePlan;

/// Side effects the room asks of its environment.
pub trait Host {
    fn set_cursor(&mut self, cursor: Cursor);
    fn open_in_new_context(&mut self, url: &str);
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    OpenLink(String),
}

/// Fire-and-forget action waiting for its due time. Not cancellable.
#[derive(Clone, Debug)]
struct Deferred {
    due_ms: f64,
    action: DeferredAction,
}

/// Counts asset loads; the room starts only once every expected asset is in.
#[derive(Clone, Copy, Debug)]
pub struct AssetGate {
    expected: usize,
    loaded: usize,
}

impl AssetGate {
    pub fn new(expected: usize) -> Self {
        Self { expected, loaded: 0 }
    }

    /// Record one load. True exactly once: on the load that completes the set.
    pub fn mark_loaded(&mut self) -> bool {
        if self.loaded >= self.expected {
            return false;
        }
        self.loaded += 1;
        self.loaded == self.expected
    }

    pub fn is_ready(&self) -> bool {
        self.loaded >= self.expected
    }
}

/// All mutable page state, owned by one controller.
pub struct RoomState {
    config: PortfolioConfig,
    viewport: Viewport,
    intro: IntroSequencer,
    ui: UiState,
    deferred: Vec<Deferred>,
}

impl RoomState {
    pub fn new(config: PortfolioConfig, surface: (f64, f64), image: (f64, f64)) -> Self {
        let viewport = Viewport::new(surface.0, surface.1, image.0, image.1, config.background_scale);
        let intro = IntroSequencer::new(config.timing);
        let ui = UiState::new(&config.welcome_message);
        Self { config, viewport, intro, ui, deferred: Vec::new() }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn pending_actions(&self) -> usize {
        self.deferred.len()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if width != self.viewport.surface_width || height != self.viewport.surface_height {
            log::debug!("surface resized to {width}x{height}");
            self.viewport.resize(width, height);
        }
    }

    /// Keyboard input. Returns true when the key toggled debug mode.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.config.is_debug_key(key) {
            return false;
        }
        self.ui.debug = !self.ui.debug;
        log::info!("debug overlay {}", if self.ui.debug { "on" } else { "off" });
        true
    }

    /// One frame: run due deferred actions, step the intro, plan the drawing.
    pub fn tick(&mut self, now: f64, rng: &mut dyn RandomSource, host: &mut dyn Host) -> FramePlan {
        self.dispatch_due(now, host);
        let frame = self.intro.advance(now, rng);
        if frame.reveal_panels && !self.ui.show_boxes {
            self.ui.show_boxes = true;
            log::info!("intro finished, showing panels");
        }
        scene::plan_frame(self, &frame)
    }

    fn defer_open(&mut self, url: String, due_ms: f64) {
        self.deferred.push(Deferred { due_ms, action: DeferredAction::OpenLink(url) });
    }

    fn dispatch_due(&mut self, now: f64, host: &mut dyn Host) {
        if self.deferred.is_empty() {
            return;
        }
        let (due, waiting): (Vec<Deferred>, Vec<Deferred>) =
            std::mem::take(&mut self.deferred).into_iter().partition(|d| d.due_ms <= now);
        self.deferred = waiting;
        for d in due {
            match d.action {
                DeferredAction::OpenLink(url) => {
                    log::info!("opening {url}");
                    host.open_in_new_context(&url);
                }
            }
        }
    }
}

// --- Browser wiring ----------------------------------------------------------

/// `Host` backed by the real window.
struct BrowserHost;

impl Host for BrowserHost {
    fn set_cursor(&mut self, cursor: Cursor) {
        if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
            body.style().set_property("cursor", cursor.css()).ok();
        }
    }

    fn open_in_new_context(&mut self, url: &str) {
        if let Some(w) = window() {
            if w.open_with_url_and_target(url, "_blank").is_err() {
                log::warn!("could not open {url}");
            }
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Some(w) = window() {
            w.location().set_href(url).ok();
        }
    }

    fn reload(&mut self) {
        if let Some(w) = window() {
            w.location().reload().ok();
        }
    }
}

/// Live room once the assets are in.
struct Room {
    state: RoomState,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    overlay: HtmlElement,
    rng: Lcg,
    host: BrowserHost,
}

/// Everything built before the images finish loading.
struct PendingRoom {
    config: PortfolioConfig,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    overlay: HtmlElement,
    gate: AssetGate,
}

thread_local! {
    static ROOM: std::cell::RefCell<Option<Room>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn surface_size(win: &web_sys::Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

fn now_ms() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

pub fn start_room(config: PortfolioConfig) -> Result<(), JsValue> {
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    // Reuse the page's canvas when present, otherwise create one.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(&config.canvas_id) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(&config.canvas_id);
        c.set_attribute("style", "position:fixed; left:0; top:0; display:block;").ok();
        body.append_child(&c)?;
        c
    };
    let (w, h) = surface_size(&win);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into()?;
    ctx.set_image_smoothing_enabled(false);

    // The animated sprite is a GIF, so it lives in a DOM element over the canvas.
    let overlay: HtmlElement = if let Some(el) = doc.get_element_by_id("animatedCharacter") {
        el.dyn_into()?
    } else {
        let div: HtmlElement = doc.create_element("div")?.dyn_into()?;
        div.set_id("animatedCharacter");
        body.append_child(&div)?;
        div
    };
    overlay
        .set_attribute(
            "style",
            &format!(
                "position:fixed; display:none; pointer-events:none; image-rendering:pixelated; \
                 background-image:url(\"{}\"); background-size:100% 100%; background-repeat:no-repeat;",
                config.animated_sprite_src
            ),
        )
        .ok();

    let sprites = Sprites { background: HtmlImageElement::new()?, character_static: HtmlImageElement::new()? };
    let background_src = config.background_src.clone();
    let static_src = config.static_sprite_src.clone();

    let pending = std::rc::Rc::new(std::cell::RefCell::new(Some(PendingRoom {
        config,
        canvas,
        ctx,
        sprites,
        overlay,
        gate: AssetGate::new(2),
    })));

    let onload = {
        let pending = pending.clone();
        Closure::wrap(Box::new(move || {
            let ready = pending.borrow_mut().as_mut().map(|p| p.gate.mark_loaded()).unwrap_or(false);
            if !ready {
                return;
            }
            let Some(p) = pending.borrow_mut().take() else { return };
            if let Err(err) = launch(p) {
                log::error!("room failed to start: {err:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    let onerror = Closure::wrap(Box::new(move || {
        log::warn!("room asset failed to load; page stays inert");
    }) as Box<dyn FnMut()>);

    if let Some(p) = pending.borrow().as_ref() {
        for img in [&p.sprites.background, &p.sprites.character_static] {
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        }
        p.sprites.background.set_src(&background_src);
        p.sprites.character_static.set_src(&static_src);
    }
    onload.forget();
    onerror.forget();
    Ok(())
}

fn launch(p: PendingRoom) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let image = (p.sprites.background.natural_width() as f64, p.sprites.background.natural_height() as f64);
    let surface = (p.canvas.width() as f64, p.canvas.height() as f64);
    log::info!("assets ready, room image {}x{}", image.0, image.1);

    let canvas = p.canvas.clone();
    let room = Room {
        state: RoomState::new(p.config, surface, image),
        canvas: p.canvas,
        ctx: p.ctx,
        sprites: p.sprites,
        overlay: p.overlay,
        rng: Lcg::from_entropy(),
        host: BrowserHost,
    };
    ROOM.with(|r| r.replace(Some(room)));

    // Pointer move: hover + cursor
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (evt.offset_x() as f64, evt.offset_y() as f64);
            ROOM.with(|cell| {
                if let Some(room) = cell.borrow_mut().as_mut() {
                    let result = room.state.handle_move(x, y);
                    room.host.set_cursor(result.cursor);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Click: hotspots and panel buttons
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (evt.offset_x() as f64, evt.offset_y() as f64);
            let now = now_ms();
            ROOM.with(|cell| {
                if let Some(room) = cell.borrow_mut().as_mut() {
                    let Room { state, host, .. } = room;
                    let result = state.handle_click(x, y, now, &mut *host);
                    host.set_cursor(result.cursor);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Debug toggle
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            ROOM.with(|cell| {
                if let Some(room) = cell.borrow_mut().as_mut() {
                    room.state.handle_key(&evt.key());
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Canvas follows the window exactly
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            let (w, h) = surface_size(&win);
            ROOM.with(|cell| {
                if let Some(room) = cell.borrow_mut().as_mut() {
                    room.canvas.set_width(w as u32);
                    room.canvas.set_height(h as u32);
                    // resizing resets the context state
                    room.ctx.set_image_smoothing_enabled(false);
                    room.state.resize(w, h);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_room_loop();
    Ok(())
}

fn start_room_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        ROOM.with(|cell| {
            if let Some(room) = cell.borrow_mut().as_mut() {
                room_tick(room, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn room_tick(room: &mut Room, now: f64) {
    room.state.resize(room.canvas.width() as f64, room.canvas.height() as f64);
    let plan = room.state.tick(now, &mut room.rng, &mut room.host);
    render::draw_frame(&room.ctx, &room.sprites, &plan);
    render::style_character_overlay(&room.overlay, &plan.character);
}
