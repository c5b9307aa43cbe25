//! Platform-agnostic core - shared between the browser front end and the CLI

pub mod config;
pub mod field;
pub mod links;
pub mod particle;
pub mod renderer;
pub mod stats;
pub mod surface;

pub use config::FieldConfig;
pub use field::{particle_count, ParticleField};
pub use links::{link_alpha, Link, LinkStrategy};
pub use particle::Particle;
pub use renderer::{FieldRenderer, FrameReport, FrameScheduler, ManualScheduler};
pub use stats::FpsCounter;
pub use surface::{DrawCommand, DrawSurface, RadialGradient, Rect, RecordingSurface};
