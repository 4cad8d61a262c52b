use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::LatticeConfig;
use crate::surface::Surface;
use crate::theme::ThemeSnapshot;

/// Grid of binary digits that flickers one cell at a time.
pub struct BinaryLattice {
    pub config: LatticeConfig,
    cols: usize,
    cells: Vec<bool>,
    rng: SmallRng,
}

impl BinaryLattice {
    pub fn new(config: LatticeConfig, width: u32, height: u32, seed: u64) -> Self {
        let mut lattice = Self {
            config,
            cols: 0,
            cells: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        lattice.resize(width, height);
        lattice
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.config.pitch <= 0.0 {
            self.cols = 0;
            self.cells.clear();
            return;
        }
        self.cols = (width as f32 / self.config.pitch).ceil() as usize;
        let rows = (height as f32 / self.config.pitch).ceil() as usize;
        let rng = &mut self.rng;
        self.cells = (0..self.cols * rows).map(|_| rng.gen_bool(0.5)).collect();
    }

    pub fn dimensions(&self) -> (usize, usize) {
        let rows = if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        };
        (self.cols, rows)
    }

    pub fn ones(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Occasionally flip one random cell. Returns the flipped index.
    pub fn step(&mut self) -> Option<usize> {
        if self.cells.is_empty() || self.rng.gen::<f32>() >= self.config.flip_chance {
            return None;
        }
        let index = self.rng.gen_range(0..self.cells.len());
        self.cells[index] = !self.cells[index];
        Some(index)
    }

    pub fn draw(&self, surface: &mut dyn Surface, theme: &ThemeSnapshot) {
        let cfg = &self.config;
        let alpha = if theme.is_dark {
            cfg.alpha_dark
        } else {
            cfg.alpha_light
        };
        let color = theme.palette.primary.with_alpha(alpha);
        for (index, _) in self.cells.iter().enumerate().filter(|(_, c)| **c) {
            let at = Vec2::new(
                (index % self.cols) as f32 * cfg.pitch,
                (index / self.cols) as f32 * cfg.pitch,
            );
            surface.fill_text("1", at, cfg.font_px, color);
        }
    }
}
