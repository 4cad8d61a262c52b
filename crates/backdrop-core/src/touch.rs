use glam::Vec2;
use log::debug;

use crate::config::EffectsConfig;
use crate::ring::RingField;
use crate::scheduler::Scene;
use crate::surface::Surface;
use crate::theme::ThemeStore;
use crate::trail::ParticleField;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u32,
    pub position: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TouchInput {
    Start { touches: Vec<TouchPoint>, at: f64 },
    Move { touches: Vec<TouchPoint>, at: f64 },
    End { ids: Vec<u32> },
}

/// Touch counterpart of the cursor layer: rings on touch start, a particle
/// trail per finger, and a short-lived indicator under each moving finger.
/// Never touches the native cursor.
pub struct TouchLayer {
    pub config: EffectsConfig,
    theme: ThemeStore,
    trail: ParticleField,
    rings: RingField,
    /// Scratch list of trackers with live particles.
    seen: Vec<u32>,
}

impl TouchLayer {
    pub fn mount(config: EffectsConfig, theme: ThemeStore, seed: u64) -> Self {
        debug!("touch layer mounted");
        Self {
            trail: ParticleField::new(config.trail.clone(), seed),
            rings: RingField::new(config.ring.clone()),
            config,
            theme,
            seen: Vec::new(),
        }
    }

    pub fn handle(&mut self, input: TouchInput) {
        match input {
            TouchInput::Start { touches, at } => {
                for touch in touches {
                    self.rings.spawn(touch.position, at);
                    self.trail.track(touch.id, touch.position);
                }
            }
            TouchInput::Move { touches, at } => {
                let samples: Vec<_> = touches.iter().map(|t| (t.id, t.position)).collect();
                self.trail.burst(&samples, at);
            }
            TouchInput::End { ids } => {
                for id in ids {
                    self.trail.release(id);
                }
            }
        }
    }

    pub fn trail(&self) -> &ParticleField {
        &self.trail
    }

    pub fn rings(&self) -> &RingField {
        &self.rings
    }

    /// Positions where a touch indicator is shown at `now`: the newest
    /// particle of each finger, while it is younger than the linger window.
    pub fn indicators(&self, now: f64) -> Vec<Vec2> {
        let mut trackers = Vec::new();
        live_trackers(&self.trail, &mut trackers);
        self.indicators_for(&trackers, now)
    }

    fn indicators_for(&self, trackers: &[u32], now: f64) -> Vec<Vec2> {
        trackers
            .iter()
            .filter_map(|id| self.trail.latest_for(*id))
            .filter(|p| now - p.created < self.config.cursor.touch_indicator_ms)
            .map(|p| p.position)
            .collect()
    }

    pub fn unmount(self) {
        debug!("touch layer unmounted");
    }
}

impl Scene for TouchLayer {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn update(&mut self, now: f64) {
        self.trail.tick(now);
        self.rings.tick(now);
        live_trackers(&self.trail, &mut self.seen);
    }

    fn draw(&mut self, surface: &mut dyn Surface, now: f64) {
        let palette = self.theme.palette();
        let cfg = &self.config.cursor;
        surface.clear();
        self.trail.draw(surface, &palette, now);
        self.rings.draw(surface, &palette, now);

        let color = palette.primary.with_alpha(cfg.touch_indicator_alpha);
        for at in self.indicators_for(&self.seen, now) {
            let outer = cfg.ring_diameter * 0.5;
            surface.stroke_circle(at, outer - cfg.ring_border * 0.5, cfg.ring_border, color);
            surface.fill_circle(at, cfg.dot_diameter * 0.5, color);
        }
    }
}

fn live_trackers(trail: &ParticleField, out: &mut Vec<u32>) {
    out.clear();
    for p in trail.particles() {
        if !out.contains(&p.tracker) {
            out.push(p.tracker);
        }
    }
}
