//! Generative background and cursor animation layers for a portfolio site.
//!
//! Everything here is platform independent: layers draw through the
//! [`surface::Surface`] trait, get their frames from a
//! [`scheduler::FrameRequester`] and read colors from a shared
//! [`theme::ThemeStore`]. The browser binding lives in `backdrop-wasm`.

pub mod arena;
pub mod backdrop;
pub mod color;
pub mod config;
pub mod cursor;
pub mod device;
pub mod error;
pub mod graph;
pub mod input;
pub mod lattice;
pub mod math;
pub mod rain;
pub mod ring;
pub mod scheduler;
pub mod surface;
pub mod theme;
pub mod touch;
pub mod trail;
pub mod transition;

pub use error::{BackdropError, Result};
