use glam::Vec2;

use crate::color::Rgba;
use crate::error::{BackdropError, Result};

/// Immediate-mode 2D drawing target, the subset of a canvas context the
/// animation layers use.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// `Err` when there is nothing to draw on (zero width or height).
    fn ensure_available(&self) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Err(BackdropError::SurfaceUnavailable { width, height });
        }
        Ok(())
    }

    /// Wipe the whole surface to transparent.
    fn clear(&mut self);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);
    /// Draw `text` with its baseline-left corner at `at`, monospace.
    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Rgba);
}

/// One call recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    },
    FillText {
        text: String,
        at: Vec2,
        font_px: f32,
        color: Rgba,
    },
}

/// Display-list surface. Used by tests and by hosts that replay frames onto
/// a backend of their own.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, at, .. } => Some((text.as_str(), *at)),
            _ => None,
        })
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            font_px,
            color,
        });
    }
}
