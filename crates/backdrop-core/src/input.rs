use log::debug;

use crate::config::EffectsConfig;
use crate::cursor::{CursorLayer, NativeCursor, PointerInput};
use crate::device::{CapabilityProvider, DeviceDetector, InputModality};
use crate::scheduler::Scene;
use crate::surface::Surface;
use crate::theme::ThemeStore;
use crate::touch::{TouchInput, TouchLayer};

/// Whichever overlay matches the current input modality.
pub enum ActiveLayer<N: NativeCursor> {
    Cursor(CursorLayer<N>),
    Touch(TouchLayer),
}

/// Chooses between the cursor layer and the touch layer and swaps them when
/// a resize reveals a different primary modality.
///
/// Exactly one layer is mounted at a time. Swapping drops the old layer
/// first, so a cursor layer gives the native cursor back before a touch
/// layer takes over.
pub struct InputLayer<P, N, F>
where
    P: CapabilityProvider,
    N: NativeCursor,
    F: FnMut() -> N,
{
    pub config: EffectsConfig,
    detector: DeviceDetector<P>,
    theme: ThemeStore,
    native_cursor: F,
    active: Option<ActiveLayer<N>>,
    seed: u64,
}

impl<P, N, F> InputLayer<P, N, F>
where
    P: CapabilityProvider,
    N: NativeCursor,
    F: FnMut() -> N,
{
    pub fn mount(
        config: EffectsConfig,
        detector: DeviceDetector<P>,
        theme: ThemeStore,
        native_cursor: F,
        seed: u64,
    ) -> Self {
        let mut layer = Self {
            config,
            detector,
            theme,
            native_cursor,
            active: None,
            seed,
        };
        layer.remount();
        layer
    }

    pub fn modality(&self) -> InputModality {
        self.detector.modality()
    }

    pub fn active(&self) -> Option<&ActiveLayer<N>> {
        self.active.as_ref()
    }

    pub fn detector_mut(&mut self) -> &mut DeviceDetector<P> {
        &mut self.detector
    }

    /// Forward a pointer event. Ignored while touch is primary.
    pub fn pointer(&mut self, input: PointerInput) {
        if let Some(ActiveLayer::Cursor(layer)) = self.active.as_mut() {
            layer.handle(input);
        }
    }

    /// Forward a touch event. Ignored while a pointer is primary.
    pub fn touch(&mut self, input: TouchInput) {
        if let Some(ActiveLayer::Touch(layer)) = self.active.as_mut() {
            layer.handle(input);
        }
    }

    /// Drop the mounted layer.
    pub fn unmount(&mut self) {
        self.active = None;
    }

    fn remount(&mut self) {
        // Release the previous layer before building the next one.
        self.active = None;
        self.seed = self.seed.wrapping_add(1);
        let layer = match self.detector.modality() {
            InputModality::Pointer => ActiveLayer::Cursor(CursorLayer::mount(
                self.config.clone(),
                self.theme.clone(),
                (self.native_cursor)(),
                self.seed,
            )),
            InputModality::Touch => ActiveLayer::Touch(TouchLayer::mount(
                self.config.clone(),
                self.theme.clone(),
                self.seed,
            )),
        };
        self.active = Some(layer);
    }
}

impl<P, N, F> Scene for InputLayer<P, N, F>
where
    P: CapabilityProvider,
    N: NativeCursor,
    F: FnMut() -> N,
{
    /// Re-probe the device on every resize.
    fn resize(&mut self, width: u32, height: u32) {
        if let Some(modality) = self.detector.refresh() {
            debug!("swapping input layer for {modality:?}");
            self.remount();
        }
        match self.active.as_mut() {
            Some(ActiveLayer::Cursor(layer)) => layer.resize(width, height),
            Some(ActiveLayer::Touch(layer)) => layer.resize(width, height),
            None => {}
        }
    }

    fn update(&mut self, now: f64) {
        match self.active.as_mut() {
            Some(ActiveLayer::Cursor(layer)) => layer.update(now),
            Some(ActiveLayer::Touch(layer)) => layer.update(now),
            None => {}
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface, now: f64) {
        match self.active.as_mut() {
            Some(ActiveLayer::Cursor(layer)) => layer.draw(surface, now),
            Some(ActiveLayer::Touch(layer)) => layer.draw(surface, now),
            None => surface.clear(),
        }
    }
}
