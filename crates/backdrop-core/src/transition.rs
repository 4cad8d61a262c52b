use crate::color::Rgba;
use crate::config::TransitionConfig;

/// Static content of one decorative code panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelContent {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

pub const PANELS: [PanelContent; 4] = [
    PanelContent {
        title: "theme-toggle.js",
        lines: &["const toggleTheme = () => {", "  setIsDark(!isDark);", "}"],
    },
    PanelContent {
        title: "styles.js",
        lines: &[
            "const darkTheme = {",
            "  background: '#0d1117',",
            "  text: '#e0e0e0'",
            "}",
        ],
    },
    PanelContent {
        title: "settings.json",
        lines: &["{", "  \"theme\": \"dark\",", "  \"color\": \"#00e676\"", "}"],
    },
    PanelContent {
        title: "terminal",
        lines: &[
            "$ activate-dark-mode --all",
            "// Activating dark mode...",
            "// Dark mode enabled!",
            "$ _",
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Celestial {
    Sun,
    Moon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Revealing { since: f64, to_dark: bool },
}

/// What the overlay should show right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub overlay: Option<Rgba>,
    pub panels: [bool; 4],
    pub celestial: Option<Celestial>,
}

impl TransitionFrame {
    pub const HIDDEN: TransitionFrame = TransitionFrame {
        overlay: None,
        panels: [false; 4],
        celestial: None,
    };

    pub fn is_hidden(&self) -> bool {
        *self == Self::HIDDEN
    }
}

/// Plays the staggered reveal while the theme store's `is_animating` flag is
/// set, and hides everything the moment it clears.
///
/// Purely cosmetic: it only reads the flag and never holds up the switch.
pub struct TransitionSequencer {
    pub config: TransitionConfig,
    phase: Phase,
}

impl TransitionSequencer {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Revealing { .. })
    }

    /// Feed the current flag. Only edges change state: a rising edge starts
    /// the reveal clock, a falling edge returns to idle.
    pub fn observe(&mut self, is_animating: bool, is_dark: bool, now: f64) {
        match (self.phase, is_animating) {
            (Phase::Idle, true) => {
                self.phase = Phase::Revealing {
                    since: now,
                    to_dark: is_dark,
                }
            }
            (Phase::Revealing { .. }, false) => self.phase = Phase::Idle,
            _ => {}
        }
    }

    pub fn frame(&self, now: f64) -> TransitionFrame {
        let Phase::Revealing { since, to_dark } = self.phase else {
            return TransitionFrame::HIDDEN;
        };
        let elapsed = now - since;
        let cfg = &self.config;

        let overlay = if to_dark {
            Rgba::rgba(0, 0, 0, cfg.overlay_alpha)
        } else {
            Rgba::rgba(255, 255, 255, cfg.overlay_alpha)
        };
        // Code panels only accompany a switch into dark mode.
        let mut panels = [false; 4];
        if to_dark {
            for (shown, offset) in panels.iter_mut().zip(cfg.panel_offsets_ms) {
                *shown = elapsed >= offset;
            }
        }
        let celestial = (elapsed >= cfg.marker_offset_ms).then_some(if to_dark {
            Celestial::Moon
        } else {
            Celestial::Sun
        });

        TransitionFrame {
            overlay: Some(overlay),
            panels,
            celestial,
        }
    }
}

impl Default for TransitionSequencer {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
