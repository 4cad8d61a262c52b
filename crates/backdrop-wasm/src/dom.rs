use backdrop_core::cursor::{NativeCursor, TargetInfo};
use backdrop_core::device::CapabilityProvider;
use backdrop_core::theme::PreferenceStore;
use backdrop_core::touch::TouchPoint;
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent, TouchList};

const PREFERENCE_KEY: &str = "theme";
const HIDE_CURSOR_CSS: &str = "* { cursor: none !important; }";

/// Milliseconds on the same clock `requestAnimationFrame` reports.
pub(crate) fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Fresh RNG seed from the platform entropy source.
pub(crate) fn seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => (js_sys::Math::random() * u64::MAX as f64) as u64,
    }
}

/// Touch probe over `window` and `navigator`.
pub(crate) struct DomCapabilities;

impl CapabilityProvider for DomCapabilities {
    fn has_touch_events(&self) -> bool {
        web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("ontouchstart")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn max_touch_points(&self) -> u32 {
        web_sys::window()
            .map(|w| w.navigator().max_touch_points().max(0) as u32)
            .unwrap_or(0)
    }
}

/// Hides the page cursor with a root style plus a global `!important` rule.
#[derive(Default)]
pub(crate) struct DomCursor {
    rule: Option<Element>,
}

impl DomCursor {
    fn root() -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl NativeCursor for DomCursor {
    fn suppress(&mut self) {
        if let Some(root) = Self::root() {
            let _ = root.style().set_property("cursor", "none");
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
            return;
        };
        style.set_text_content(Some(HIDE_CURSOR_CSS));
        if head.append_child(&style).is_ok() {
            self.rule = Some(style);
        }
    }

    fn restore(&mut self) {
        if let Some(root) = Self::root() {
            let _ = root.style().remove_property("cursor");
        }
        if let Some(rule) = self.rule.take() {
            rule.remove();
        }
    }
}

/// Theme preference in `localStorage`.
pub(crate) struct LocalStoragePreferences;

impl PreferenceStore for LocalStoragePreferences {
    fn load(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(PREFERENCE_KEY).ok()?
    }

    fn save(&mut self, value: &str) {
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            let _ = storage.set_item(PREFERENCE_KEY, value);
        }
    }
}

pub(crate) fn client_position(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// Hover-test facts about an event target.
pub(crate) fn target_info(event: &web_sys::Event) -> TargetInfo {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return TargetInfo::default();
    };
    let inside_interactive = matches!(element.closest("a, button"), Ok(Some(_)));
    let html = element.dyn_ref::<HtmlElement>();
    let has_click_handler = html.map(|h| h.onclick().is_some()).unwrap_or(false);
    let inline = html
        .and_then(|h| h.style().get_property_value("cursor").ok())
        .filter(|c| !c.is_empty());
    let cursor = inline.or_else(|| {
        web_sys::window()?
            .get_computed_style(&element)
            .ok()??
            .get_property_value("cursor")
            .ok()
    });
    TargetInfo {
        tag: element.tag_name().to_ascii_uppercase(),
        inside_interactive,
        has_click_handler,
        cursor,
    }
}

pub(crate) fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            id: t.identifier() as u32,
            position: Vec2::new(t.client_x() as f32, t.client_y() as f32),
        })
        .collect()
}
