//! The particle collection and its per-frame physics

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::{FieldConfig, Link, Particle};

/// Number of particles a `width × height` surface holds, rounded down
pub fn particle_count(width: u32, height: u32, area_per_particle: f64) -> usize {
    let area = width as u64 * height as u64;
    (area as f64 / area_per_particle).floor() as usize
}

/// Particles drifting over a `width × height` surface.
///
/// Dimensions and particles are only ever replaced together, by
/// [`initialize`](Self::initialize) or [`resize`](Self::resize).
pub struct ParticleField<R = StdRng> {
    particles: Vec<Particle>,
    width: u32,
    height: u32,
    config: FieldConfig,
    rng: R,
}

impl ParticleField<StdRng> {
    /// Field seeded from `config.seed`, or from OS entropy when unset
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, width, height, rng)
    }
}

impl<R: Rng> ParticleField<R> {
    pub fn with_rng(config: FieldConfig, width: u32, height: u32, rng: R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            width,
            height,
            config,
            rng,
        };
        field.initialize(width, height);
        field
    }

    /// Replace every particle with a fresh random set sized to the surface
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let count = particle_count(width, height, self.config.area_per_particle);
        let bounds = self.bounds();
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(&mut self.rng, bounds, &self.config));
        }
        self.particles = particles;

        debug!(width, height, count, "Particle field initialized");
    }

    /// Adopt new surface dimensions. Particles are regenerated, not migrated.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!(
            from = ?(self.width, self.height),
            to = ?(width, height),
            "Resizing particle field"
        );
        self.initialize(width, height);
    }
}

impl<R> ParticleField<R> {
    /// Move every particle one step, reflecting off the surface edges
    pub fn advance_frame(&mut self) {
        let bounds = self.bounds();
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
        trace!(count = self.particles.len(), "Advanced frame");
    }

    /// Pairs closer than the link distance, in collection order
    pub fn links(&self) -> Vec<Link> {
        self.config
            .link_strategy
            .find(&self.particles, self.bounds(), self.config.link_distance)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: u32, height: u32) -> ParticleField {
        ParticleField::with_rng(FieldConfig::default(), width, height, StdRng::seed_from_u64(3))
    }

    fn assert_in_bounds(field: &ParticleField) {
        for p in field.particles() {
            assert!(
                (0.0..=field.width() as f64).contains(&p.position.x),
                "x={} outside 0..={}",
                p.position.x,
                field.width()
            );
            assert!(
                (0.0..=field.height() as f64).contains(&p.position.y),
                "y={} outside 0..={}",
                p.position.y,
                field.height()
            );
        }
    }

    #[test]
    fn count_is_area_over_9000_rounded_down() {
        assert_eq!(particle_count(300, 300, 9000.0), 10);
        assert_eq!(particle_count(94, 94, 9000.0), 0);
        assert_eq!(particle_count(90, 100, 9000.0), 1);
        assert_eq!(particle_count(1920, 1080, 9000.0), 230);
        assert_eq!(particle_count(0, 1080, 9000.0), 0);
    }

    #[test]
    fn initialize_sizes_collection() {
        assert_eq!(seeded(300, 300).particles().len(), 10);
        assert!(seeded(94, 94).particles().is_empty());
    }

    #[test]
    fn any_surface_of_9000_px_has_a_particle() {
        for (w, h) in [(90, 100), (9000, 1), (1, 9000), (95, 95), (3000, 3)] {
            assert!(!seeded(w, h).particles().is_empty(), "{w}x{h}");
        }
    }

    #[test]
    fn positions_stay_in_bounds_over_many_frames() {
        let mut field = seeded(320, 240);
        for _ in 0..5000 {
            field.advance_frame();
            assert_in_bounds(&field);
        }
    }

    #[test]
    fn empty_field_advances_without_work() {
        let mut field = seeded(10, 10);
        field.advance_frame();
        assert!(field.particles().is_empty());
        assert!(field.links().is_empty());
    }

    #[test]
    fn resize_replaces_dims_and_particles_together() {
        let mut field = seeded(300, 300);
        field.resize(600, 300);
        assert_eq!((field.width(), field.height()), (600, 300));
        assert_eq!(field.particles().len(), 20);
        assert_in_bounds(&field);
    }

    #[test]
    fn resize_to_same_dims_regenerates() {
        let mut field = seeded(640, 480);
        let before = field.particles().to_vec();
        field.resize(640, 480);
        let after = field.particles().to_vec();
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
        assert_in_bounds(&field);
    }

    #[test]
    fn seed_in_config_is_reproducible() {
        let config = FieldConfig {
            seed: Some(99),
            ..FieldConfig::default()
        };
        let a = ParticleField::new(config.clone(), 400, 400);
        let b = ParticleField::new(config, 400, 400);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn links_use_configured_distance() {
        let config = FieldConfig {
            link_distance: 10.0,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_rng(config, 300, 300, StdRng::seed_from_u64(0));
        *field.particles_mut() = vec![
            Particle::new(DVec2::new(0.0, 0.0), DVec2::ZERO, 1.0),
            Particle::new(DVec2::new(5.0, 0.0), DVec2::ZERO, 1.0),
            Particle::new(DVec2::new(50.0, 0.0), DVec2::ZERO, 1.0),
        ];
        let linked: Vec<_> = field
            .links()
            .into_iter()
            .filter(|l| l.from != l.to)
            .map(|l| (l.from, l.to, l.alpha))
            .collect();
        assert_eq!(linked, vec![(0, 1, 0.5)]);
    }
}
