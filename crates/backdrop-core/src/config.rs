//! Tunable constants for every animated layer.
//!
//! Each struct's `Default` matches the site's stock look. Hosts override
//! individual fields rather than building configs from scratch.

/// Particle trail behind the pointer or a touch point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    /// Minimum gap between two particle creations, ms.
    pub spawn_interval_ms: f64,
    /// Movement at or below this distance does not spawn.
    pub min_distance: f32,
    pub lifetime_ms: (f64, f64),
    pub size: (f32, f32),
    /// Half-width of the random spread added to the travel angle, radians.
    pub angle_jitter: f32,
    /// Half-width of the random draw offset around the spawn point.
    pub spread: f32,
    /// Distance travelled per frame by a newborn particle.
    pub drift_speed: f32,
    /// Fraction of the size lost by the end of the lifetime.
    pub shrink: f32,
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 20.0,
            min_distance: 5.0,
            lifetime_ms: (500.0, 1000.0),
            size: (4.0, 10.0),
            angle_jitter: 0.25,
            spread: 3.0,
            drift_speed: 1.2,
            shrink: 0.8,
            capacity: 256,
        }
    }
}

/// Expanding ring left by a click or a touch start.
#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    pub lifetime_ms: f64,
    /// Diameter at scale 1.0.
    pub diameter: f32,
    pub scale: (f32, f32),
    pub border: (f32, f32),
    pub capacity: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: 600.0,
            diameter: 40.0,
            scale: (0.5, 1.5),
            border: (15.0, 1.0),
            capacity: 32,
        }
    }
}

/// Ambient node graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    /// One node per this many pixels of canvas width.
    pub spacing: f32,
    pub radius: (f32, f32),
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Connection attempts per node are drawn from `1..=max_connections`.
    pub max_connections: usize,
    pub line_width: f32,
    pub line_alpha_dark: f32,
    pub line_alpha_light: f32,
    pub node_alpha_dark: f32,
    pub node_alpha_light: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            spacing: 200.0,
            radius: (2.0, 5.0),
            max_speed: 0.25,
            max_connections: 3,
            line_width: 0.5,
            line_alpha_dark: 0.1,
            line_alpha_light: 0.07,
            node_alpha_dark: 0.2,
            node_alpha_light: 0.15,
        }
    }
}

/// Falling-symbol overlay. Two presets share the algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct RainConfig {
    /// Column width and row height in pixels.
    pub glyph: f32,
    pub font_px: f32,
    /// Per-column, per-frame chance of advancing.
    pub spawn_chance: f32,
    /// Fraction of canvas height past which a column may reset.
    pub reset_threshold: f32,
    pub reset_chance: f32,
    pub alpha: (f32, f32),
    pub fade_alpha_dark: f32,
    pub fade_alpha_light: f32,
    pub symbols: &'static [&'static str],
}

impl RainConfig {
    /// Full-page background: wide columns, mixed programming and security
    /// vocabulary.
    pub fn full_page() -> Self {
        Self {
            glyph: 20.0,
            font_px: 15.0,
            spawn_chance: 0.03,
            reset_threshold: 0.7,
            reset_chance: 0.025,
            alpha: (0.3, 0.8),
            fade_alpha_dark: 0.05,
            fade_alpha_light: 0.1,
            symbols: FULL_PAGE_SYMBOLS,
        }
    }

    /// Hero section: narrower columns, programming keywords only.
    pub fn hero() -> Self {
        Self {
            glyph: 14.0,
            font_px: 14.0,
            spawn_chance: 0.03,
            reset_threshold: 0.7,
            reset_chance: 0.025,
            alpha: (0.2, 0.7),
            fade_alpha_dark: 0.1,
            fade_alpha_light: 0.2,
            symbols: HERO_SYMBOLS,
        }
    }
}

impl Default for RainConfig {
    fn default() -> Self {
        Self::full_page()
    }
}

pub const FULL_PAGE_SYMBOLS: &[&str] = &[
    "0", "1", "{", "}", "()", "=>", "[]", "if", "for", "while", "class", "function", "const",
    "let", "var", "<div>", "</div>", "404", "sudo", "npm", "git", "ssh", "API", "CORS", "HTTP",
    "GET", "POST", "SQL", "SELECT", "FROM", "import", "export", "React", "Java", "Spring",
    "async", "await", "try", "catch", "null", "undefined", "proxy", "hack", "node", "mongo",
    "docker", "cloud", "render", "deploy", "config", "🔒", "⚡", "💻", "🚀", "⚠️", "🔑", "📦",
    "🔍", "📡",
];

pub const HERO_SYMBOLS: &[&str] = &[
    "0", "1", "{", "}", "()", "=>", "[]", "if", "for", "while", "class", "function", "const",
    "let", "var", "<div>", "</div>", "404", "sudo", "npm", "git", "ssh", "API", "CORS", "HTTP",
    "GET", "POST", "SQL", "Java", "React", "Spring", "import", "export",
];

/// Flickering binary grid under the full-page background.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeConfig {
    pub pitch: f32,
    pub font_px: f32,
    pub flip_chance: f32,
    pub alpha_dark: f32,
    pub alpha_light: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            pitch: 10.0,
            font_px: 8.0,
            flip_chance: 0.01,
            alpha_dark: 0.05,
            alpha_light: 0.03,
        }
    }
}

/// Theme switch overlay timing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Reveal offsets for the decorative panels, ms after activation.
    pub panel_offsets_ms: [f64; 4],
    pub marker_offset_ms: f64,
    pub overlay_alpha: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            panel_offsets_ms: [100.0, 300.0, 500.0, 700.0],
            marker_offset_ms: 200.0,
            overlay_alpha: 0.8,
        }
    }
}

/// Custom pointer indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorConfig {
    pub ring_diameter: f32,
    pub ring_border: f32,
    pub dot_diameter: f32,
    pub dot_pressed_diameter: f32,
    pub hover_scale: f32,
    pub pressed_scale: f32,
    /// Alpha of the primary-colored fill shown while hovering.
    pub hover_tint: f32,
    /// How long a touch indicator lingers after the last particle, ms.
    pub touch_indicator_ms: f64,
    pub touch_indicator_alpha: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            ring_diameter: 36.0,
            ring_border: 3.0,
            dot_diameter: 10.0,
            dot_pressed_diameter: 14.0,
            hover_scale: 1.3,
            pressed_scale: 0.8,
            hover_tint: 32.0 / 255.0,
            touch_indicator_ms: 100.0,
            touch_indicator_alpha: 0.7,
        }
    }
}

/// Theme store behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeConfig {
    /// Length of the `is_animating` window after a toggle, ms.
    pub transition_ms: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            transition_ms: 1500.0,
        }
    }
}

/// Everything the pointer/touch overlay needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectsConfig {
    pub trail: TrailConfig,
    pub ring: RingConfig,
    pub cursor: CursorConfig,
}
