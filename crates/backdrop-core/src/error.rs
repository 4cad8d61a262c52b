use thiserror::Error;

/// Failures the animation layers can observe. None of them are fatal: callers
/// recover by drawing nothing for the affected frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackdropError {
    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("invalid color literal `{0}`")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, BackdropError>;
