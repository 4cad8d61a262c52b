use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::color::Rgba;
use crate::config::ThemeConfig;

/// Colors every drawing layer pulls from on each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub accent: Rgba,
    pub background: Rgba,
    pub text: Rgba,
}

impl Palette {
    pub const DARK: Palette = Palette {
        primary: Rgba::rgb(0x00, 0xe6, 0x76),
        secondary: Rgba::rgb(0x21, 0x96, 0xf3),
        accent: Rgba::rgb(0xff, 0x52, 0x52),
        background: Rgba::rgb(0x0d, 0x11, 0x17),
        text: Rgba::rgb(0xe0, 0xe0, 0xe0),
    };

    pub const LIGHT: Palette = Palette {
        primary: Rgba::rgb(0x34, 0x98, 0xdb),
        secondary: Rgba::rgb(0x2e, 0xcc, 0x71),
        accent: Rgba::rgb(0xe7, 0x4c, 0x3c),
        background: Rgba::rgb(0xf0, 0xf8, 0xff),
        text: Rgba::rgb(0x33, 0x33, 0x33),
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Dark unless the stored preference is exactly `"light"`.
    pub fn from_preference(saved: Option<&str>) -> Self {
        match saved {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Dark => Palette::DARK,
            ThemeMode::Light => Palette::LIGHT,
        }
    }
}

/// The palette in effect plus the transient switch flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeSnapshot {
    pub palette: Palette,
    pub is_dark: bool,
    pub is_animating: bool,
}

/// Where the chosen mode survives page reloads.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// In-process preference store.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferences {
    pub value: Option<String>,
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ThemeSnapshot)>;

struct ThemeState {
    mode: ThemeMode,
    /// End of the current switch animation, if one is running.
    animating_until: Option<f64>,
    config: ThemeConfig,
    preferences: Box<dyn PreferenceStore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    /// Unsubscribed while a notification pass held the listener list.
    dropped: Vec<SubscriptionId>,
    /// A notification pass is running.
    notifying: bool,
    /// The store changed during the running pass.
    pending: bool,
    next_id: u64,
}

impl ThemeState {
    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            palette: self.mode.palette(),
            is_dark: self.mode == ThemeMode::Dark,
            is_animating: self.animating_until.is_some(),
        }
    }
}

/// Shared, single-threaded theme handle.
///
/// Clones refer to the same store. Drawing layers hold a clone and read the
/// snapshot when a frame runs, so a switch shows up on the very next frame.
/// Only the toggle control mutates it.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<RefCell<ThemeState>>,
}

impl ThemeStore {
    pub fn new(preferences: Box<dyn PreferenceStore>) -> Self {
        Self::with_config(preferences, ThemeConfig::default())
    }

    pub fn with_config(preferences: Box<dyn PreferenceStore>, config: ThemeConfig) -> Self {
        let mode = ThemeMode::from_preference(preferences.load().as_deref());
        debug!("theme store initialized in {} mode", mode.as_str());
        Self {
            inner: Rc::new(RefCell::new(ThemeState {
                mode,
                animating_until: None,
                config,
                preferences,
                listeners: Vec::new(),
                dropped: Vec::new(),
                notifying: false,
                pending: false,
                next_id: 0,
            })),
        }
    }

    /// Store backed by memory only, starting dark.
    pub fn in_memory() -> Self {
        Self::new(Box::<MemoryPreferences>::default())
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn palette(&self) -> Palette {
        self.inner.borrow().mode.palette()
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.borrow().mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode() == ThemeMode::Dark
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().animating_until.is_some()
    }

    /// Flip dark/light, persist the choice and open the animation window.
    ///
    /// The palette switches immediately; the overlay never delays it.
    pub fn toggle(&self, now: f64) {
        {
            let mut state = self.inner.borrow_mut();
            state.mode = state.mode.toggled();
            state.animating_until = Some(now + state.config.transition_ms);
            let mode = state.mode;
            state.preferences.save(mode.as_str());
            debug!("theme toggled to {} at {now:.0}ms", mode.as_str());
        }
        self.notify();
    }

    /// Close the animation window once it has elapsed. Returns true when the
    /// flag changed.
    pub fn tick(&self, now: f64) -> bool {
        let expired = {
            let mut state = self.inner.borrow_mut();
            match state.animating_until {
                Some(until) if now >= until => {
                    state.animating_until = None;
                    true
                }
                _ => false,
            }
        };
        if expired {
            self.notify();
        }
        expired
    }

    /// Register a listener. It runs synchronously on every change, after the
    /// store has settled, so it may read the store freely.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeSnapshot) + 'static,
    {
        let mut state = self.inner.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Like `subscribe`, but the listener is removed when the returned
    /// guard drops.
    pub fn subscribe_scoped<F>(&self, listener: F) -> ScopedSubscription
    where
        F: FnMut(&ThemeSnapshot) + 'static,
    {
        ScopedSubscription {
            id: self.subscribe(listener),
            store: self.clone(),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        // The closure may own other subscriptions; drop it after the borrow.
        let removed = {
            let mut state = self.inner.borrow_mut();
            match state.listeners.iter().position(|(lid, _)| *lid == id) {
                Some(index) => Some(state.listeners.remove(index)),
                None => {
                    if state.notifying {
                        state.dropped.push(id);
                    }
                    None
                }
            }
        };
        drop(removed);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Run every listener against the settled state.
    ///
    /// A change made from inside a listener is not delivered re-entrantly;
    /// it marks the pass pending and the outer call runs another round with
    /// the newer snapshot once the current one finishes.
    fn notify(&self) {
        {
            let mut state = self.inner.borrow_mut();
            if state.notifying {
                state.pending = true;
                return;
            }
            state.notifying = true;
        }

        let mut rounds = 0;
        loop {
            let (snapshot, mut listeners) = {
                let mut state = self.inner.borrow_mut();
                state.pending = false;
                (state.snapshot(), std::mem::take(&mut state.listeners))
            };
            for (_, listener) in listeners.iter_mut() {
                listener(&snapshot);
            }

            let (removed, settled) = {
                let mut state = self.inner.borrow_mut();
                let dropped = std::mem::take(&mut state.dropped);
                let (removed, mut kept): (Vec<_>, Vec<_>) = listeners
                    .into_iter()
                    .partition(|(id, _)| dropped.contains(id));
                // Listeners registered during the pass go after the existing ones.
                kept.append(&mut state.listeners);
                state.listeners = kept;

                rounds += 1;
                if state.pending && rounds >= MAX_NOTIFY_ROUNDS {
                    warn!("theme listeners kept toggling, stopped after {rounds} rounds");
                    state.pending = false;
                }
                (removed, !state.pending)
            };
            drop(removed);
            if settled {
                break;
            }
        }
        self.inner.borrow_mut().notifying = false;
    }
}

/// Keeps a listener registered for as long as it lives.
pub struct ScopedSubscription {
    store: ThemeStore,
    id: SubscriptionId,
}

impl ScopedSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for ScopedSubscription {
    fn drop(&mut self) {
        self.store.unsubscribe(self.id);
    }
}

/// Bound on back-to-back notification rounds when listeners keep toggling.
const MAX_NOTIFY_ROUNDS: u32 = 16;
