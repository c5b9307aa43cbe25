//! Draws a particle field onto a surface, one frame per scheduler callback

use std::cell::Cell;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::trace;

use super::surface::{DrawSurface, RadialGradient, Rect};
use super::ParticleField;
use crate::theme::colors;

/// Host primitive that calls back once, in time for the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// Scheduler the host polls: a request just raises a flag
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

impl ManualScheduler {
    /// Consume the pending request, if any
    pub fn take_request(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total requests seen
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}

/// What a single rendered frame contained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub particles: usize,
    pub links: usize,
}

/// Owns a field together with the surface it paints and the scheduler that
/// drives it. Nothing is read from ambient globals.
pub struct FieldRenderer<S, F, R = StdRng> {
    field: ParticleField<R>,
    surface: S,
    scheduler: F,
    frame: u64,
}

impl<S, F, R> FieldRenderer<S, F, R>
where
    S: DrawSurface,
    F: FrameScheduler,
    R: Rng,
{
    pub fn new(field: ParticleField<R>, mut surface: S, scheduler: F) -> Self {
        surface.resize(field.width(), field.height());
        Self {
            field,
            surface,
            scheduler,
            frame: 0,
        }
    }

    /// Resize surface and field in one step, so no frame sees a mix
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.field.resize(width, height);
    }

    pub fn advance_frame(&mut self) {
        self.field.advance_frame();
    }

    /// Paint the current state, then ask for the next frame
    pub fn render_frame(&mut self) -> FrameReport {
        let (width, height) = (self.field.width(), self.field.height());
        let rect = Rect::from_size(width, height);
        let config = self.field.config();

        self.surface.clear_rect(rect);
        let backdrop = RadialGradient {
            center: DVec2::new(width as f64 / 2.0, height as f64 / 2.0),
            inner_radius: 0.0,
            outer_radius: width as f64,
            inner: colors::BACKDROP_INNER,
            outer: colors::BACKDROP_OUTER,
        };
        self.surface.fill_rect(rect, &backdrop);

        let particles = self.field.particles();
        for particle in particles {
            self.surface
                .fill_circle(particle.position, particle.radius, colors::STAR);
        }

        let links = self.field.links();
        for link in &links {
            self.surface.stroke_line(
                particles[link.from].position,
                particles[link.to].position,
                colors::STAR.with_alpha(link.alpha),
                config.line_width,
            );
        }

        self.frame += 1;
        let report = FrameReport {
            frame: self.frame,
            particles: particles.len(),
            links: links.len(),
        };
        trace!(?report, "Rendered frame");

        self.scheduler.request_frame();
        report
    }

    /// One animation tick: physics step followed by a repaint
    pub fn tick(&mut self) -> FrameReport {
        self.advance_frame();
        self.render_frame()
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}
