//! A single drifting star

use glam::DVec2;
use rand::Rng;

use super::FieldConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    /// Displacement per frame
    pub velocity: DVec2,
    pub radius: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Uniformly random particle inside `[0, bounds.x] × [0, bounds.y]`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: DVec2, config: &FieldConfig) -> Self {
        let position = DVec2::new(rng.gen::<f64>() * bounds.x, rng.gen::<f64>() * bounds.y);
        let speed = config.max_speed;
        let velocity = DVec2::new(
            rng.gen_range(-speed..=speed),
            rng.gen_range(-speed..=speed),
        );
        let radius = rng.gen_range(config.min_radius..=config.max_radius);
        Self::new(position, velocity, radius)
    }

    /// Step once and bounce off the walls of `bounds`.
    ///
    /// Each axis reflects at most once per step. An overshoot is folded back
    /// across the wall so the position never leaves the surface.
    pub fn advance(&mut self, bounds: DVec2) {
        self.position += self.velocity;
        self.position.x = reflect(self.position.x, &mut self.velocity.x, bounds.x);
        self.position.y = reflect(self.position.y, &mut self.velocity.y, bounds.y);
    }
}

fn reflect(pos: f64, vel: &mut f64, extent: f64) -> f64 {
    let folded = if pos < 0.0 {
        *vel = -*vel;
        -pos
    } else if pos > extent {
        *vel = -*vel;
        2.0 * extent - pos
    } else {
        return pos;
    };
    // Surfaces thinner than one step
    folded.clamp(0.0, extent)
}
