//! Immediate-mode 2D drawing surface the renderer paints onto
//!
//! The browser host implements this over `CanvasRenderingContext2d`;
//! `RecordingSurface` keeps the calls in memory for tests and the CLI.

use glam::DVec2;

use crate::theme::Rgba;

/// Two-stop radial gradient between concentric circles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner: Rgba,
    pub outer: Rgba,
}

/// Axis-aligned rectangle in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }
}

pub trait DrawSurface {
    /// Current pixel dimensions
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32);
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, gradient: &RadialGradient);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect(Rect, RadialGradient),
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain everything recorded so far
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::FillRect(rect, *gradient));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
