use glam::Vec2;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::RainConfig;
use crate::surface::Surface;
use crate::theme::ThemeSnapshot;
use crate::trail::uniform;

/// A symbol queued for drawing this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainStroke {
    pub column: usize,
    pub symbol: &'static str,
    pub at: Vec2,
    pub alpha: f32,
}

/// Matrix-style falling symbols.
///
/// Each frame only a random sparse subset of columns advances, which keeps
/// the draw-call count roughly independent of canvas size.
pub struct SymbolRain {
    pub config: RainConfig,
    /// Current drop row per column.
    rows: Vec<u32>,
    height: f32,
    /// Strokes produced by the last `advance`, reused between frames.
    strokes: Vec<RainStroke>,
    rng: SmallRng,
}

impl SymbolRain {
    pub fn new(config: RainConfig, width: u32, height: u32, seed: u64) -> Self {
        let mut rain = Self {
            config,
            rows: Vec::new(),
            height: 0.0,
            strokes: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        rain.resize(width, height);
        rain
    }

    /// Recompute the column count and restart every column at row 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        let columns = if self.config.glyph > 0.0 {
            (width as f32 / self.config.glyph).floor() as usize
        } else {
            0
        };
        self.rows.clear();
        self.rows.resize(columns, 1);
        self.height = height as f32;
        self.strokes.clear();
        debug!("symbol rain reset: {columns} columns");
    }

    pub fn columns(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn strokes(&self) -> &[RainStroke] {
        &self.strokes
    }

    /// Mutation half of a frame: pick the columns that advance, record what
    /// to draw for each, then move their drops.
    ///
    /// A column is drawn at its current row and then moves down one row. If
    /// the drawn position is past `reset_threshold` of the height it may
    /// restart at row 0.
    pub fn advance(&mut self) {
        self.strokes.clear();
        let cfg = &self.config;
        if cfg.symbols.is_empty() {
            return;
        }
        let limit = self.height * cfg.reset_threshold;
        for (column, row) in self.rows.iter_mut().enumerate() {
            if self.rng.gen::<f32>() >= cfg.spawn_chance {
                continue;
            }
            let symbol = cfg.symbols[self.rng.gen_range(0..cfg.symbols.len())];
            let at = Vec2::new(column as f32 * cfg.glyph, *row as f32 * cfg.glyph);
            let alpha = uniform(&mut self.rng, cfg.alpha.0, cfg.alpha.1);
            self.strokes.push(RainStroke {
                column,
                symbol,
                at,
                alpha,
            });

            *row += 1;
            if at.y > limit && self.rng.gen::<f32>() < cfg.reset_chance {
                *row = 0;
            }
        }
    }

    /// Draw half of a frame: fade the previous frames, then the strokes
    /// recorded by the last `advance`.
    pub fn draw(&self, surface: &mut dyn Surface, theme: &ThemeSnapshot) {
        self.draw_fade(surface, theme);
        self.draw_strokes(surface, theme);
    }

    /// Low-alpha background fill that leaves a fading trail.
    pub fn draw_fade(&self, surface: &mut dyn Surface, theme: &ThemeSnapshot) {
        let fade = if theme.is_dark {
            self.config.fade_alpha_dark
        } else {
            self.config.fade_alpha_light
        };
        let size = surface.size();
        surface.fill_rect(Vec2::ZERO, size, theme.palette.background.with_alpha(fade));
    }

    pub fn draw_strokes(&self, surface: &mut dyn Surface, theme: &ThemeSnapshot) {
        for stroke in &self.strokes {
            surface.fill_text(
                stroke.symbol,
                stroke.at,
                self.config.font_px,
                theme.palette.primary.with_alpha(stroke.alpha),
            );
        }
    }
}
