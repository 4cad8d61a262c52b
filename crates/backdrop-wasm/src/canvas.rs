use std::f64::consts::TAU;

use backdrop_core::color::Rgba;
use backdrop_core::surface::Surface;
use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

/// How a canvas picks its backing-store size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sizing {
    /// Fill the viewport.
    Window,
    /// Match the parent element's layout box.
    Parent,
}

/// [`Surface`] over a `<canvas>` 2D context.
pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    font_px: f32,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            font_px: 0.0,
        })
    }

    pub(crate) fn measure(&self, sizing: Sizing) -> (u32, u32) {
        match sizing {
            Sizing::Window => web_sys::window()
                .map(|w| {
                    let dim = |v: Result<JsValue, JsValue>| {
                        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
                    };
                    (dim(w.inner_width()), dim(w.inner_height()))
                })
                .unwrap_or((0, 0)),
            Sizing::Parent => self
                .canvas
                .parent_element()
                .and_then(|p| p.dyn_into::<HtmlElement>().ok())
                .map(|p| (p.offset_width().max(0) as u32, p.offset_height().max(0) as u32))
                .unwrap_or((0, 0)),
        }
    }

    /// Resize the backing store. Resizing also resets context state, so the
    /// cached font is dropped.
    pub(crate) fn set_size(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.font_px = 0.0;
    }

    fn set_font(&mut self, px: f32) {
        if self.font_px != px {
            self.ctx.set_font(&format!("{px}px 'Fira Code', monospace"));
            self.font_px = px;
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Rgba) {
        self.set_font(font_px);
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}
