use log::trace;

use crate::surface::Surface;

/// A canvas-bearing component driven once per display refresh.
///
/// `update` mutates simulation state and `draw` renders it; the scheduler
/// always finishes `update` for a frame before calling `draw`.
pub trait Scene {
    /// Geometry changed: rebuild everything that depends on it.
    fn resize(&mut self, width: u32, height: u32);
    fn update(&mut self, now: f64);
    fn draw(&mut self, surface: &mut dyn Surface, now: f64);
}

/// Opaque handle for one pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Source of per-refresh callbacks (`requestAnimationFrame` in a browser).
pub trait FrameRequester {
    fn request(&mut self) -> FrameToken;
    fn cancel(&mut self, token: FrameToken);
}

/// Counters for one scheduler's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: u64,
    pub skipped: u64,
}

/// Owns the redraw loop of one scene instance.
///
/// Exactly one frame request is outstanding while running. `stop` cancels it
/// and must run on teardown, otherwise the loop keeps drawing into a detached
/// surface.
pub struct FrameScheduler<R: FrameRequester> {
    requester: R,
    pending: Option<FrameToken>,
    running: bool,
    stats: FrameStats,
}

impl<R: FrameRequester> FrameScheduler<R> {
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            pending: None,
            running: false,
            stats: FrameStats::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }

    /// Begin the loop. Calling it while running is a no-op.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = Some(self.requester.request());
    }

    /// Cancel the outstanding request and stop rescheduling.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(token) = self.pending.take() {
            self.requester.cancel(token);
        }
    }

    /// Rebuild the scene for new geometry.
    pub fn resize<S: Scene + ?Sized>(&mut self, scene: &mut S, width: u32, height: u32) {
        scene.resize(width, height);
    }

    /// Handle the callback for `token`. Returns true if the scene drew.
    ///
    /// Callbacks for a token other than the outstanding one (stale, or
    /// arriving after `stop`) are ignored. An unavailable surface skips the
    /// frame's update and draw but keeps the loop alive.
    pub fn run_frame<S: Scene + ?Sized>(
        &mut self,
        token: FrameToken,
        now: f64,
        surface: &mut dyn Surface,
        scene: &mut S,
    ) -> bool {
        if !self.running || self.pending != Some(token) {
            return false;
        }
        self.pending = None;

        let drew = match surface.ensure_available() {
            Ok(()) => {
                scene.update(now);
                scene.draw(surface, now);
                self.stats.drawn += 1;
                true
            }
            Err(err) => {
                trace!("frame skipped: {err}");
                self.stats.skipped += 1;
                false
            }
        };

        self.pending = Some(self.requester.request());
        drew
    }
}

impl<R: FrameRequester> Drop for FrameScheduler<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Requester that just hands out tokens; the host decides when to fire them.
/// Used in tests and for hosts that pump frames themselves.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: u64,
    pub outstanding: Vec<FrameToken>,
    pub cancelled: Vec<FrameToken>,
}

impl ManualFrames {
    /// Oldest outstanding token, removed from the queue.
    pub fn pop(&mut self) -> Option<FrameToken> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

impl FrameRequester for ManualFrames {
    fn request(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next += 1;
        self.outstanding.push(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.outstanding.retain(|t| *t != token);
        self.cancelled.push(token);
    }
}
