//! `DrawSurface` over an HTML canvas 2D context

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::{DrawSurface, RadialGradient, Rect};
use crate::theme::Rgba;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, context })
    }

    fn set_gradient_fill(&self, gradient: &RadialGradient) -> Result<(), JsValue> {
        let RadialGradient {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        } = *gradient;
        let fill = self.context.create_radial_gradient(
            center.x,
            center.y,
            inner_radius,
            center.x,
            center.y,
            outer_radius,
        )?;
        fill.add_color_stop(0.0, &inner.to_css())?;
        fill.add_color_stop(1.0, &outer.to_css())?;
        self.context.set_fill_style_canvas_gradient(&fill);
        Ok(())
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_rect(&mut self, rect: Rect, gradient: &RadialGradient) {
        if let Err(e) = self.set_gradient_fill(gradient) {
            error!(?e, "Failed to build backdrop gradient");
            return;
        }
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        if let Err(e) = self.context.arc(center.x, center.y, radius, 0.0, TAU) {
            error!(?e, radius, "Failed to trace particle arc");
            return;
        }
        self.context.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.context.begin_path();
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width);
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }
}
