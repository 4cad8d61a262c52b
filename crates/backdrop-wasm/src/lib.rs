use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::backdrop::{HeroRain, NetworkBackdrop};
use backdrop_core::config::EffectsConfig;
use backdrop_core::cursor::PointerInput;
use backdrop_core::device::DeviceDetector;
use backdrop_core::input::{ActiveLayer, InputLayer};
use backdrop_core::theme::{ScopedSubscription, SubscriptionId, ThemeStore};
use backdrop_core::touch::TouchInput;
use backdrop_core::trail::TrailInstance;
use backdrop_core::transition::{Celestial, TransitionSequencer, PANELS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent};

mod canvas;
mod dom;
mod frames;

use canvas::Sizing;
use dom::{DomCapabilities, DomCursor, LocalStoragePreferences};
use frames::Mount;

/// Trail particle as laid out in the exported buffer: 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct TrailVertex {
    x: f32,
    y: f32,
    size: f32,
    opacity: f32,
}

impl From<TrailInstance> for TrailVertex {
    fn from(i: TrailInstance) -> Self {
        Self {
            x: i.x,
            y: i.y,
            size: i.size,
            opacity: i.opacity,
        }
    }
}

type DomInput = InputLayer<DomCapabilities, DomCursor, fn() -> DomCursor>;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (module re-instantiated) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Enable debug-level logging from the animation layers.
#[wasm_bindgen]
pub fn set_verbose(verbose: bool) {
    log::set_max_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}

/// Shared theme state. Pass the same handle to every component.
#[wasm_bindgen]
pub struct ThemeHandle {
    store: ThemeStore,
    listeners: Vec<SubscriptionId>,
}

#[wasm_bindgen]
impl ThemeHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ThemeHandle {
        ThemeHandle {
            store: ThemeStore::new(Box::new(LocalStoragePreferences)),
            listeners: Vec::new(),
        }
    }

    /// Switch dark/light. The `is_animating` window closes on a timer.
    #[wasm_bindgen]
    pub fn toggle(&self) {
        self.store.toggle(dom::now());
        let store = self.store.clone();
        let finish = Closure::once_into_js(move || {
            store.tick(dom::now());
        });
        let delay = backdrop_core::config::ThemeConfig::default().transition_ms as i32;
        if let Some(window) = web_sys::window() {
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(finish.unchecked_ref(), delay)
                .is_err()
            {
                log::warn!("could not schedule end of theme transition");
            }
        }
    }

    /// Close an elapsed animation window now (for hosts pumping their own
    /// clock).
    #[wasm_bindgen]
    pub fn tick(&self) -> bool {
        self.store.tick(dom::now())
    }

    #[wasm_bindgen(getter)]
    pub fn is_dark(&self) -> bool {
        self.store.is_dark()
    }

    #[wasm_bindgen(getter)]
    pub fn is_animating(&self) -> bool {
        self.store.is_animating()
    }

    #[wasm_bindgen(getter)]
    pub fn primary(&self) -> String {
        self.store.palette().primary.to_css()
    }

    #[wasm_bindgen(getter)]
    pub fn background(&self) -> String {
        self.store.palette().background.to_css()
    }

    /// Call `callback(is_dark, is_animating)` on every change.
    #[wasm_bindgen]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        let id = self.store.subscribe(move |snapshot| {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_bool(snapshot.is_dark),
                &JsValue::from_bool(snapshot.is_animating),
            );
        });
        self.listeners.push(id);
    }

    /// Drop every callback registered through `on_change`.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        for id in self.listeners.drain(..) {
            self.store.unsubscribe(id);
        }
    }
}

impl Default for ThemeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ThemeHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Full-page background canvas: binary lattice, node graph, symbol rain.
#[wasm_bindgen]
pub struct BackdropCanvas {
    mount: Mount<NetworkBackdrop>,
}

#[wasm_bindgen]
impl BackdropCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, theme: &ThemeHandle) -> Result<BackdropCanvas, JsValue> {
        let store = theme.store.clone();
        let mount = Mount::new(canvas, Sizing::Window, move |w, h| {
            NetworkBackdrop::new(store, w, h, dom::seed())
        })?;
        log::info!("backdrop canvas mounted");
        Ok(BackdropCanvas { mount })
    }

    #[wasm_bindgen]
    pub fn node_count(&self) -> usize {
        self.mount.with_stage(|s| s.scene.graph().nodes().len())
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.mount.is_running()
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.mount.unmount();
    }
}

/// Symbol rain sized to the hero section that contains the canvas.
#[wasm_bindgen]
pub struct HeroRainCanvas {
    mount: Mount<HeroRain>,
}

#[wasm_bindgen]
impl HeroRainCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, theme: &ThemeHandle) -> Result<HeroRainCanvas, JsValue> {
        let store = theme.store.clone();
        let mount = Mount::new(canvas, Sizing::Parent, move |w, h| {
            HeroRain::new(store, w, h, dom::seed())
        })?;
        Ok(HeroRainCanvas { mount })
    }

    #[wasm_bindgen]
    pub fn column_count(&self) -> usize {
        self.mount.with_stage(|s| s.scene.rain().columns())
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.mount.is_running()
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.mount.unmount();
    }
}

/// Custom cursor or touch trail overlay, whichever the device calls for.
#[wasm_bindgen]
pub struct PointerEffects {
    mount: Mount<DomInput>,
    trail_buffer: Vec<TrailVertex>,
}

#[wasm_bindgen]
impl PointerEffects {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, theme: &ThemeHandle) -> Result<PointerEffects, JsValue> {
        let store = theme.store.clone();
        let mut mount = Mount::new(canvas, Sizing::Window, move |_, _| {
            InputLayer::mount(
                EffectsConfig::default(),
                DeviceDetector::new(DomCapabilities),
                store,
                DomCursor::default as fn() -> DomCursor,
                dom::seed(),
            )
        })?;

        let window: EventTarget = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .into();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root: EventTarget = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?
            .into();
        let document: EventTarget = document.into();

        mount.listen(&window, "mousemove", false, |s, e: MouseEvent| {
            s.scene.pointer(PointerInput::Move {
                position: dom::client_position(&e),
                at: dom::now(),
            });
        })?;
        mount.listen(&window, "mousedown", false, |s, e: MouseEvent| {
            s.scene.pointer(PointerInput::Down {
                position: dom::client_position(&e),
                at: dom::now(),
            });
        })?;
        mount.listen(&window, "mouseup", false, |s, _: MouseEvent| {
            s.scene.pointer(PointerInput::Up);
        })?;
        mount.listen(&root, "mouseenter", false, |s, e: MouseEvent| {
            s.scene.pointer(PointerInput::ViewportEnter {
                position: dom::client_position(&e),
            });
        })?;
        mount.listen(&root, "mouseleave", false, |s, _: MouseEvent| {
            s.scene.pointer(PointerInput::ViewportLeave);
        })?;
        mount.listen(&document, "mouseover", false, |s, e: Event| {
            s.scene.pointer(PointerInput::ElementOver(dom::target_info(&e)));
        })?;
        mount.listen(&document, "mouseout", false, |s, _: Event| {
            s.scene.pointer(PointerInput::ElementOut);
        })?;
        mount.listen(&document, "touchstart", true, |s, e: TouchEvent| {
            s.scene.touch(TouchInput::Start {
                touches: dom::touch_points(&e.touches()),
                at: dom::now(),
            });
        })?;
        mount.listen(&document, "touchmove", true, |s, e: TouchEvent| {
            s.scene.touch(TouchInput::Move {
                touches: dom::touch_points(&e.touches()),
                at: dom::now(),
            });
        })?;
        for kind in ["touchend", "touchcancel"] {
            mount.listen(&document, kind, true, |s, e: TouchEvent| {
                let ids = dom::touch_points(&e.changed_touches())
                    .into_iter()
                    .map(|t| t.id)
                    .collect();
                s.scene.touch(TouchInput::End { ids });
            })?;
        }

        log::info!("pointer effects mounted");
        Ok(PointerEffects {
            mount,
            trail_buffer: Vec::new(),
        })
    }

    #[wasm_bindgen]
    pub fn is_touch(&self) -> bool {
        self.mount
            .with_stage(|s| matches!(s.scene.active(), Some(ActiveLayer::Touch(_))))
    }

    /// Snapshot live trail particles into the shared buffer and return how
    /// many there are. Each entry is `[x, y, size, opacity]` as `f32`.
    #[wasm_bindgen]
    pub fn sync_trail(&mut self) -> usize {
        let now = dom::now();
        let buffer = &mut self.trail_buffer;
        buffer.clear();
        self.mount.with_stage(|s| {
            let trail = match s.scene.active() {
                Some(ActiveLayer::Cursor(layer)) => layer.trail(),
                Some(ActiveLayer::Touch(layer)) => layer.trail(),
                None => return,
            };
            buffer.extend(trail.instances(now).map(TrailVertex::from));
        });
        buffer.len()
    }

    #[wasm_bindgen]
    pub fn get_trail_buffer_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<TrailVertex, f32>(&self.trail_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_trail_buffer_byte_length(&self) -> usize {
        std::mem::size_of_val(self.trail_buffer.as_slice())
    }

    /// Remove every listener, stop the loop and give the native cursor back.
    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.mount.with_stage(|s| s.scene.unmount());
        self.mount.unmount();
    }
}

/// Frame-by-frame state of the theme switch overlay.
#[wasm_bindgen]
pub struct ThemeTransition {
    sequencer: Rc<RefCell<TransitionSequencer>>,
    /// Dropped by `unmount`, or with the component.
    subscription: Option<ScopedSubscription>,
}

#[wasm_bindgen]
impl ThemeTransition {
    #[wasm_bindgen(constructor)]
    pub fn new(theme: &ThemeHandle) -> ThemeTransition {
        let store = theme.store.clone();
        let sequencer = Rc::new(RefCell::new(TransitionSequencer::default()));
        let snapshot = store.snapshot();
        sequencer
            .borrow_mut()
            .observe(snapshot.is_animating, snapshot.is_dark, dom::now());
        let subscription = {
            let sequencer = sequencer.clone();
            store.subscribe_scoped(move |snapshot| {
                sequencer
                    .borrow_mut()
                    .observe(snapshot.is_animating, snapshot.is_dark, dom::now());
            })
        };
        ThemeTransition {
            sequencer,
            subscription: Some(subscription),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.sequencer.borrow().is_active()
    }

    /// Overlay tint as CSS, or `undefined` when hidden.
    #[wasm_bindgen]
    pub fn overlay(&self) -> Option<String> {
        self.sequencer
            .borrow()
            .frame(dom::now())
            .overlay
            .map(|c| c.to_css())
    }

    #[wasm_bindgen]
    pub fn panel_visible(&self, index: usize) -> bool {
        let frame = self.sequencer.borrow().frame(dom::now());
        frame.panels.get(index).copied().unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn panel_title(index: usize) -> Option<String> {
        PANELS.get(index).map(|p| p.title.to_string())
    }

    #[wasm_bindgen]
    pub fn panel_lines(index: usize) -> Vec<String> {
        PANELS
            .get(index)
            .map(|p| p.lines.iter().map(|l| l.to_string()).collect())
            .unwrap_or_default()
    }

    /// `"sun"`, `"moon"`, or `undefined` before the marker appears.
    #[wasm_bindgen]
    pub fn celestial(&self) -> Option<String> {
        self.sequencer
            .borrow()
            .frame(dom::now())
            .celestial
            .map(|c| match c {
                Celestial::Sun => "sun".to_string(),
                Celestial::Moon => "moon".to_string(),
            })
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.subscription = None;
    }
}
