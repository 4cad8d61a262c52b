use glam::Vec2;

use crate::arena::RingArena;
use crate::config::RingConfig;
use crate::math::{age_progress, ease_out_cubic, mix};
use crate::surface::Surface;
use crate::theme::Palette;

/// Expanding ring marking a click or a touch start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickRing {
    pub position: Vec2,
    pub created: f64,
}

/// Live click/touch rings. Independent of the particle trail.
pub struct RingField {
    pub config: RingConfig,
    rings: RingArena<ClickRing>,
}

impl RingField {
    pub fn new(config: RingConfig) -> Self {
        let rings = RingArena::with_capacity(config.capacity);
        Self { config, rings }
    }

    pub fn spawn(&mut self, position: Vec2, now: f64) {
        self.rings.insert(ClickRing {
            position,
            created: now,
        });
    }

    pub fn tick(&mut self, now: f64) {
        let lifetime = self.config.lifetime_ms;
        self.rings
            .retain_mut(|r| age_progress(now, r.created, lifetime) < 1.0);
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn rings(&self) -> impl Iterator<Item = &ClickRing> {
        self.rings.iter()
    }

    pub fn draw(&self, surface: &mut dyn Surface, palette: &Palette, now: f64) {
        let cfg = &self.config;
        for ring in self.rings.iter() {
            let progress = age_progress(now, ring.created, cfg.lifetime_ms);
            if progress >= 1.0 {
                continue;
            }
            let eased = ease_out_cubic(progress);
            let scale = mix(cfg.scale.0, cfg.scale.1, eased);
            let border = mix(cfg.border.0, cfg.border.1, eased) * scale;
            let outer = cfg.diameter * scale * 0.5;
            // Stroke is centered on the path; keep the outer edge at `outer`.
            let radius = (outer - border * 0.5).max(0.5);
            surface.stroke_circle(
                ring.position,
                radius,
                border,
                palette.primary.fade(1.0 - eased),
            );
        }
    }

    pub fn clear(&mut self) {
        self.rings.clear();
    }
}
