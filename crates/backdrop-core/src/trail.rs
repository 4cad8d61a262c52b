use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::arena::RingArena;
use crate::config::TrailConfig;
use crate::math::{age_progress, mix};
use crate::surface::Surface;
use crate::theme::Palette;

/// Tracker id used for the mouse pointer. Touch points use their own
/// platform identifiers.
pub const POINTER_TRACKER: u32 = 0;

/// One decaying trail particle.
///
/// Carries no color: it is drawn in whatever primary color the theme has at
/// draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub tracker: u32,
    pub position: Vec2,
    /// Draw offset around `position`, fixed at birth.
    pub offset: Vec2,
    pub size: f32,
    /// Creation time, ms.
    pub created: f64,
    /// Lifetime, ms.
    pub lifetime: f64,
    /// Travel direction, radians.
    pub angle: f32,
}

impl Particle {
    pub fn progress(&self, now: f64) -> f32 {
        age_progress(now, self.created, self.lifetime)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Flat per-particle render data for hosts that draw outside a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// Turns movement of one input modality into a trail of decaying particles.
///
/// One field per modality; pointer and touch never share a field.
pub struct ParticleField {
    pub config: TrailConfig,
    particles: RingArena<Particle>,
    /// Last seen position per tracker.
    trackers: Vec<(u32, Vec2)>,
    last_spawn: Option<f64>,
    rng: SmallRng,
}

impl ParticleField {
    pub fn new(config: TrailConfig, seed: u64) -> Self {
        let particles = RingArena::with_capacity(config.capacity);
        Self {
            config,
            particles,
            trackers: Vec::new(),
            last_spawn: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Record a tracker position without spawning (pointer enter, touch
    /// start).
    pub fn track(&mut self, tracker: u32, position: Vec2) {
        self.swap_tracked(tracker, position);
    }

    /// Forget a tracker (touch end). The next event for that id starts fresh.
    pub fn release(&mut self, tracker: u32) {
        self.trackers.retain(|(id, _)| *id != tracker);
    }

    pub fn tracked(&self, tracker: u32) -> Option<Vec2> {
        self.trackers
            .iter()
            .find(|(id, _)| *id == tracker)
            .map(|(_, pos)| *pos)
    }

    /// Feed one movement sample. Returns true when a particle was created.
    ///
    /// Same as a [`burst`](Self::burst) holding a single sample.
    pub fn on_move(&mut self, tracker: u32, position: Vec2, now: f64) -> bool {
        self.burst(&[(tracker, position)], now) > 0
    }

    /// Feed every sample of one input event (all moving touches at once).
    /// Returns how many particles were created.
    ///
    /// The rate limit is checked once for the whole event: when at least
    /// `spawn_interval_ms` has passed since the previous creation, every
    /// sample that moved more than `min_distance` from its tracker's previous
    /// position spawns one particle. Tracked positions are updated either way.
    pub fn burst(&mut self, samples: &[(u32, Vec2)], now: f64) -> usize {
        let gated = self
            .last_spawn
            .is_some_and(|last| now - last < self.config.spawn_interval_ms);

        let mut created = 0;
        for &(tracker, position) in samples {
            let previous = self.swap_tracked(tracker, position).unwrap_or(position);
            if gated {
                continue;
            }
            let delta = position - previous;
            if delta.length() <= self.config.min_distance {
                continue;
            }
            self.spawn(tracker, position, delta, now);
            created += 1;
        }
        if created > 0 {
            self.last_spawn = Some(now);
        }
        created
    }

    fn spawn(&mut self, tracker: u32, position: Vec2, delta: Vec2, now: f64) {
        let heading = delta.y.atan2(delta.x);
        let cfg = &self.config;
        let rng = &mut self.rng;
        let jitter = uniform(rng, -cfg.angle_jitter, cfg.angle_jitter);
        let particle = Particle {
            tracker,
            position,
            offset: Vec2::new(
                uniform(rng, -cfg.spread, cfg.spread),
                uniform(rng, -cfg.spread, cfg.spread),
            ),
            size: uniform(rng, cfg.size.0, cfg.size.1),
            created: now,
            lifetime: uniform_f64(rng, cfg.lifetime_ms.0, cfg.lifetime_ms.1),
            // Particles fly away from the direction of travel.
            angle: heading + std::f32::consts::PI + jitter,
        };
        self.particles.insert(particle);
    }

    /// Decay step: drop expired particles, drift the rest.
    ///
    /// Drift slows linearly with the remaining lifetime fraction.
    pub fn tick(&mut self, now: f64) {
        let speed = self.config.drift_speed;
        self.particles.retain_mut(|p| {
            let progress = p.progress(now);
            if progress >= 1.0 {
                return false;
            }
            let step = (1.0 - progress) * speed;
            p.position += Vec2::new(p.angle.cos(), p.angle.sin()) * step;
            true
        });
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Most recent particle spawned for `tracker`.
    pub fn latest_for(&self, tracker: u32) -> Option<&Particle> {
        self.particles
            .iter()
            .filter(|p| p.tracker == tracker)
            .max_by(|a, b| a.created.total_cmp(&b.created))
    }

    pub fn instances(&self, now: f64) -> impl Iterator<Item = TrailInstance> + '_ {
        let shrink = self.config.shrink;
        self.particles.iter().filter_map(move |p| {
            let progress = p.progress(now);
            if progress >= 1.0 {
                return None;
            }
            let at = p.position + p.offset;
            Some(TrailInstance {
                x: at.x,
                y: at.y,
                size: p.size * mix(1.0, 1.0 - shrink, progress),
                opacity: 1.0 - progress,
            })
        })
    }

    /// Draw every live particle as a filled dot in the palette's primary.
    pub fn draw(&self, surface: &mut dyn Surface, palette: &Palette, now: f64) {
        for inst in self.instances(now) {
            surface.fill_circle(
                Vec2::new(inst.x, inst.y),
                inst.size * 0.5,
                palette.primary.fade(inst.opacity),
            );
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.trackers.clear();
        self.last_spawn = None;
    }

    fn swap_tracked(&mut self, tracker: u32, position: Vec2) -> Option<Vec2> {
        match self.trackers.iter_mut().find(|(id, _)| *id == tracker) {
            Some((_, pos)) => Some(std::mem::replace(pos, position)),
            None => {
                self.trackers.push((tracker, position));
                None
            }
        }
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` for an empty range.
pub(crate) fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

pub(crate) fn uniform_f64<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
