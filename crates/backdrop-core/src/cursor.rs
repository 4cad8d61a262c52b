use glam::Vec2;
use log::debug;

use crate::config::EffectsConfig;
use crate::ring::RingField;
use crate::scheduler::Scene;
use crate::surface::Surface;
use crate::theme::ThemeStore;
use crate::trail::{ParticleField, POINTER_TRACKER};

/// What the hover test knows about the element under the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetInfo {
    /// Upper-case tag name, as the DOM reports it.
    pub tag: String,
    /// Some ancestor is an anchor or a button.
    pub inside_interactive: bool,
    pub has_click_handler: bool,
    /// Inline or computed `cursor` style.
    pub cursor: Option<String>,
}

impl TargetInfo {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.tag.as_str(), "A" | "BUTTON")
            || self.inside_interactive
            || self.has_click_handler
            || self.cursor.as_deref() == Some("pointer")
    }
}

/// Pointer events the cursor layer reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    Move { position: Vec2, at: f64 },
    ViewportEnter { position: Vec2 },
    ViewportLeave,
    Down { position: Vec2, at: f64 },
    Up,
    ElementOver(TargetInfo),
    ElementOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Native cursor shown, indicator not drawn.
    Hidden,
    Idle,
    Hovering,
    Pressed,
}

/// Page-wide native cursor visibility.
pub trait NativeCursor {
    fn suppress(&mut self);
    fn restore(&mut self);
}

/// Hides the native cursor for as long as it lives.
///
/// Restoring happens in `Drop`, so the cursor comes back on every exit path,
/// unwinding included.
pub struct NativeCursorGuard<N: NativeCursor> {
    native: N,
}

impl<N: NativeCursor> NativeCursorGuard<N> {
    pub fn new(mut native: N) -> Self {
        native.suppress();
        Self { native }
    }
}

impl<N: NativeCursor> Drop for NativeCursorGuard<N> {
    fn drop(&mut self) {
        self.native.restore();
    }
}

/// Custom cursor: ring plus inner dot, particle trail and click rings.
pub struct CursorLayer<N: NativeCursor> {
    pub config: EffectsConfig,
    theme: ThemeStore,
    position: Vec2,
    visible: bool,
    hovering: bool,
    pressed: bool,
    trail: ParticleField,
    rings: RingField,
    _native: NativeCursorGuard<N>,
}

impl<N: NativeCursor> CursorLayer<N> {
    /// Mount the layer. The native cursor is suppressed from here until the
    /// layer is dropped.
    pub fn mount(config: EffectsConfig, theme: ThemeStore, native: N, seed: u64) -> Self {
        debug!("cursor layer mounted");
        Self {
            trail: ParticleField::new(config.trail.clone(), seed),
            rings: RingField::new(config.ring.clone()),
            config,
            theme,
            position: Vec2::ZERO,
            visible: false,
            hovering: false,
            pressed: false,
            _native: NativeCursorGuard::new(native),
        }
    }

    pub fn handle(&mut self, input: PointerInput) {
        match input {
            PointerInput::Move { position, at } => {
                self.position = position;
                self.trail.on_move(POINTER_TRACKER, position, at);
                self.visible = true;
            }
            PointerInput::ViewportEnter { position } => {
                self.position = position;
                self.trail.track(POINTER_TRACKER, position);
                self.visible = true;
            }
            PointerInput::ViewportLeave => self.visible = false,
            PointerInput::Down { position, at } => {
                self.pressed = true;
                self.rings.spawn(position, at);
            }
            PointerInput::Up => self.pressed = false,
            PointerInput::ElementOver(target) => {
                if target.is_interactive() {
                    self.hovering = true;
                }
            }
            PointerInput::ElementOut => self.hovering = false,
        }
    }

    /// Hovering wins over pressing.
    pub fn state(&self) -> CursorState {
        if !self.visible {
            CursorState::Hidden
        } else if self.hovering {
            CursorState::Hovering
        } else if self.pressed {
            CursorState::Pressed
        } else {
            CursorState::Idle
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Indicator scale for the current state.
    pub fn scale(&self) -> f32 {
        let cfg = &self.config.cursor;
        match self.state() {
            CursorState::Hovering => cfg.hover_scale,
            CursorState::Pressed => cfg.pressed_scale,
            CursorState::Idle | CursorState::Hidden => 1.0,
        }
    }

    pub fn trail(&self) -> &ParticleField {
        &self.trail
    }

    pub fn rings(&self) -> &RingField {
        &self.rings
    }

    /// Tear down. Dropping does the same; this just names the intent.
    pub fn unmount(self) {
        debug!("cursor layer unmounted");
    }

    fn draw_indicator(&self, surface: &mut dyn Surface) {
        let cfg = &self.config.cursor;
        let primary = self.theme.palette().primary;
        let scale = self.scale();
        let outer = cfg.ring_diameter * scale * 0.5;
        let border = cfg.ring_border * scale;

        if self.hovering {
            surface.fill_circle(self.position, outer, primary.with_alpha(cfg.hover_tint));
        }
        surface.stroke_circle(self.position, outer - border * 0.5, border, primary);
        let dot = if self.pressed {
            cfg.dot_pressed_diameter
        } else {
            cfg.dot_diameter
        };
        surface.fill_circle(self.position, dot * scale * 0.5, primary);
    }
}

impl<N: NativeCursor> Scene for CursorLayer<N> {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn update(&mut self, now: f64) {
        self.trail.tick(now);
        self.rings.tick(now);
    }

    fn draw(&mut self, surface: &mut dyn Surface, now: f64) {
        let palette = self.theme.palette();
        surface.clear();
        self.trail.draw(surface, &palette, now);
        self.rings.draw(surface, &palette, now);
        if self.visible {
            self.draw_indicator(surface);
        }
    }
}
