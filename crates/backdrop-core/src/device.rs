use log::debug;

/// Probes the runtime for touch support. Hosts implement this over whatever
/// the platform exposes; an absent API simply reports "no touch".
pub trait CapabilityProvider {
    /// Whether touch events are available at all.
    fn has_touch_events(&self) -> bool;
    /// Maximum simultaneous touch points the device reports.
    fn max_touch_points(&self) -> u32;
}

/// Fixed answers, for tests and hosts without a real probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticCapabilities {
    pub touch_events: bool,
    pub touch_points: u32,
}

impl StaticCapabilities {
    pub fn pointer() -> Self {
        Self::default()
    }

    pub fn touch() -> Self {
        Self {
            touch_events: true,
            touch_points: 5,
        }
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn has_touch_events(&self) -> bool {
        self.touch_events
    }

    fn max_touch_points(&self) -> u32 {
        self.touch_points
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputModality {
    Pointer,
    Touch,
}

/// Tracks the primary input modality. Advisory: callers re-run
/// [`DeviceDetector::refresh`] on every viewport resize instead of caching
/// the answer, since a hybrid device can change modality.
pub struct DeviceDetector<P: CapabilityProvider> {
    provider: P,
    modality: InputModality,
}

impl<P: CapabilityProvider> DeviceDetector<P> {
    pub fn new(provider: P) -> Self {
        let modality = probe(&provider);
        debug!("input modality detected: {modality:?}");
        Self { provider, modality }
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    pub fn is_touch_primary(&self) -> bool {
        self.modality == InputModality::Touch
    }

    /// Re-probe. Returns the new modality if it changed.
    pub fn refresh(&mut self) -> Option<InputModality> {
        let next = probe(&self.provider);
        if next == self.modality {
            return None;
        }
        debug!("input modality changed: {:?} -> {next:?}", self.modality);
        self.modality = next;
        Some(next)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

fn probe<P: CapabilityProvider>(provider: &P) -> InputModality {
    if provider.has_touch_events() || provider.max_touch_points() > 0 {
        InputModality::Touch
    } else {
        InputModality::Pointer
    }
}
