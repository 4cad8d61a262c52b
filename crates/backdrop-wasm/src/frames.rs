use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::scheduler::{FrameRequester, FrameScheduler, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement};

use crate::canvas::{CanvasSurface, Sizing};

/// Token for a request the browser refused; it never fires.
const NEVER: u64 = u64::MAX;

pub(crate) type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the core's [`FrameRequester`]. Tokens are
/// the browser's request ids.
pub(crate) struct AnimationFrames {
    callback: FrameCallback,
}

impl FrameRequester for AnimationFrames {
    fn request(&mut self) -> backdrop_core::scheduler::FrameToken {
        use backdrop_core::scheduler::FrameToken;

        let callback = self.callback.borrow();
        let (Some(window), Some(cb)) = (web_sys::window(), callback.as_ref()) else {
            return FrameToken(NEVER);
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => FrameToken(id as u64),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                FrameToken(NEVER)
            }
        }
    }

    fn cancel(&mut self, token: backdrop_core::scheduler::FrameToken) {
        if token.0 == NEVER {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(token.0 as i32);
        }
    }
}

/// A DOM listener that unregisters itself when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
        passive: bool,
    ) -> Result<Self, JsValue> {
        let callback = closure.as_ref().unchecked_ref();
        if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind, callback, &options,
            )?;
        } else {
            target.add_event_listener_with_callback(kind, callback)?;
        }
        Ok(Self {
            target,
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Everything one mounted canvas component owns.
pub(crate) struct Stage<S: Scene> {
    pub scene: S,
    pub surface: CanvasSurface,
    pub scheduler: FrameScheduler<AnimationFrames>,
    sizing: Sizing,
}

impl<S: Scene> Stage<S> {
    /// Match the canvas to its container and rebuild the scene for it.
    pub fn fit(&mut self) {
        let (width, height) = self.surface.measure(self.sizing);
        self.surface.set_size(width, height);
        self.scheduler.resize(&mut self.scene, width, height);
    }
}

/// A scene bound to a canvas, its frame loop and its DOM listeners.
///
/// The frame closure and every listener hold the stage; `unmount` drops them
/// all, which cancels the pending frame and breaks the reference cycle.
pub(crate) struct Mount<S: Scene + 'static> {
    stage: Rc<RefCell<Stage<S>>>,
    callback: FrameCallback,
    listeners: Vec<Listener>,
}

impl<S: Scene + 'static> Mount<S> {
    pub fn new<B>(canvas: HtmlCanvasElement, sizing: Sizing, build: B) -> Result<Self, JsValue>
    where
        B: FnOnce(u32, u32) -> S,
    {
        let mut surface = CanvasSurface::new(canvas)?;
        let (width, height) = surface.measure(sizing);
        surface.set_size(width, height);
        let scene = build(width, height);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let stage = Rc::new(RefCell::new(Stage {
            scene,
            surface,
            scheduler: FrameScheduler::new(AnimationFrames {
                callback: callback.clone(),
            }),
            sizing,
        }));

        {
            let stage = stage.clone();
            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                let mut guard = stage.borrow_mut();
                let stage = &mut *guard;
                if let Some(token) = stage.scheduler.pending() {
                    stage
                        .scheduler
                        .run_frame(token, now, &mut stage.surface, &mut stage.scene);
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let mut mount = Self {
            stage,
            callback,
            listeners: Vec::new(),
        };
        let window: EventTarget = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .into();
        mount.listen(&window, "resize", false, |stage, _: Event| stage.fit())?;
        mount.stage.borrow_mut().scheduler.start();
        Ok(mount)
    }

    /// Register `handler` for `kind` events on `target` until unmount.
    /// Events that are not an `E` are ignored.
    pub fn listen<E, F>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: F,
    ) -> Result<(), JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(&mut Stage<S>, E) + 'static,
    {
        let stage = self.stage.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(&mut stage.borrow_mut(), event);
            }
        }) as Box<dyn FnMut(Event)>);
        self.listeners
            .push(Listener::attach(target.clone(), kind, closure, passive)?);
        Ok(())
    }

    pub fn with_stage<T>(&self, f: impl FnOnce(&mut Stage<S>) -> T) -> T {
        f(&mut self.stage.borrow_mut())
    }

    pub fn is_running(&self) -> bool {
        self.stage.borrow().scheduler.is_running()
    }

    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.stage.borrow_mut().scheduler.stop();
        self.callback.borrow_mut().take();
    }
}

impl<S: Scene + 'static> Drop for Mount<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
