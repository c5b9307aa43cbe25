//! Proximity links between particles
//!
//! Two strategies produce the same link list in the same order
//! (`from` ascending, then `to` ascending):
//! - `AllPairs`: scans every unordered pair, O(n²)
//! - `Grid`: buckets particles into cells one link distance wide and only
//!   compares neighbouring cells

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Particle;

/// A line to draw between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    /// Stroke opacity, `1 - distance / link_distance`
    pub alpha: f64,
}

/// Opacity of a link at `distance`, or None when the pair is too far apart
pub fn link_alpha(distance: f64, link_distance: f64) -> Option<f64> {
    (distance < link_distance).then(|| 1.0 - distance / link_distance)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    #[default]
    AllPairs,
    Grid,
}

impl LinkStrategy {
    pub fn find(self, particles: &[Particle], bounds: DVec2, link_distance: f64) -> Vec<Link> {
        match self {
            LinkStrategy::AllPairs => all_pairs(particles, link_distance),
            LinkStrategy::Grid => match LinkGrid::build(particles, bounds, link_distance) {
                Some(grid) => grid.links(particles),
                None => {
                    trace!(link_distance, "Grid too fine, scanning all pairs");
                    all_pairs(particles, link_distance)
                }
            },
        }
    }
}

#[inline]
fn try_link(particles: &[Particle], from: usize, to: usize, link_distance: f64) -> Option<Link> {
    let distance = particles[from].position.distance(particles[to].position);
    link_alpha(distance, link_distance).map(|alpha| Link {
        from,
        to,
        distance,
        alpha,
    })
}

pub fn all_pairs(particles: &[Particle], link_distance: f64) -> Vec<Link> {
    let mut links = Vec::new();
    for from in 0..particles.len() {
        for to in (from + 1)..particles.len() {
            links.extend(try_link(particles, from, to, link_distance));
        }
    }
    links
}

/// Most cells a grid may allocate per particle
const MAX_CELLS_PER_PARTICLE: usize = 64;
/// Cells always allowed, so small fields can still bucket
const MIN_CELL_BUDGET: usize = 4096;

/// Uniform grid over the surface, one link distance per cell
pub struct LinkGrid {
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
    link_distance: f64,
}

impl LinkGrid {
    /// None when the link distance is so small relative to the surface that
    /// the cell count would exceed the budget for this many particles
    pub fn build(particles: &[Particle], bounds: DVec2, link_distance: f64) -> Option<Self> {
        let cell_size = link_distance;
        let budget = particles
            .len()
            .saturating_mul(MAX_CELLS_PER_PARTICLE)
            .max(MIN_CELL_BUDGET);
        let axis = |extent: f64| {
            let cells = (extent / cell_size).ceil().max(1.0);
            (cells <= budget as f64).then_some(cells as usize)
        };
        let (cols, rows) = (axis(bounds.x)?, axis(bounds.y)?);
        let total = cols.checked_mul(rows).filter(|&total| total <= budget)?;

        let mut grid = Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); total],
            link_distance,
        };
        for (index, particle) in particles.iter().enumerate() {
            let (cx, cy) = grid.cell_of(particle.position);
            grid.cells[cy * cols + cx].push(index);
        }
        Some(grid)
    }

    // Float-to-usize casts saturate, so negatives land in column 0
    fn cell_of(&self, position: DVec2) -> (usize, usize) {
        let cx = ((position.x / self.cell_size) as usize).min(self.cols - 1);
        let cy = ((position.y / self.cell_size) as usize).min(self.rows - 1);
        (cx, cy)
    }

    pub fn links(&self, particles: &[Particle]) -> Vec<Link> {
        let mut links = Vec::new();
        for (from, particle) in particles.iter().enumerate() {
            let (cx, cy) = self.cell_of(particle.position);
            for ny in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(self.cols - 1) {
                    for &to in &self.cells[ny * self.cols + nx] {
                        if to > from {
                            links.extend(try_link(particles, from, to, self.link_distance));
                        }
                    }
                }
            }
        }
        links.sort_unstable_by_key(|link| (link.from, link.to));
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::ZERO, 1.0)
    }

    #[test]
    fn alpha_falls_off_linearly() {
        assert_eq!(link_alpha(0.0, 100.0), Some(1.0));
        assert_eq!(link_alpha(50.0, 100.0), Some(0.5));
        let nearly = link_alpha(99.999, 100.0).unwrap();
        assert!((nearly - 0.00001).abs() < 1e-9);
        assert_eq!(link_alpha(100.0, 100.0), None);
        assert_eq!(link_alpha(150.0, 100.0), None);
    }

    /// Links between distinct particles, as `(from, to)` pairs
    fn distinct_pairs(links: &[Link]) -> Vec<(usize, usize)> {
        links
            .iter()
            .filter(|l| l.from != l.to)
            .map(|l| (l.from, l.to))
            .collect()
    }

    #[test]
    fn two_particles_fifty_apart() {
        let particles = [at(0.0, 0.0), at(50.0, 0.0)];
        let links = all_pairs(&particles, 100.0);
        let link = links
            .iter()
            .find(|l| (l.from, l.to) == (0, 1))
            .expect("0-1 link");
        assert_eq!(link.distance, 50.0);
        assert_eq!(link.alpha, 0.5);
    }

    #[test]
    fn exactly_link_distance_is_not_linked() {
        let particles = [at(0.0, 0.0), at(60.0, 80.0)];
        assert!(distinct_pairs(&all_pairs(&particles, 100.0)).is_empty());
    }

    #[test]
    fn all_pairs_order_follows_collection() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0), at(500.0, 0.0)];
        let pairs = distinct_pairs(&all_pairs(&particles, 100.0));
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn empty_and_single_fields_have_no_links() {
        assert!(all_pairs(&[], 100.0).is_empty());
        assert!(distinct_pairs(&all_pairs(&[at(1.0, 1.0)], 100.0)).is_empty());
        let bounds = DVec2::new(50.0, 50.0);
        assert!(LinkStrategy::Grid.find(&[], bounds, 100.0).is_empty());
    }

    #[test]
    fn grid_matches_all_pairs() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = FieldConfig::default();
        let bounds = DVec2::new(1280.0, 720.0);
        let particles: Vec<_> = (0..400)
            .map(|_| Particle::random(&mut rng, bounds, &config))
            .collect();

        let expected = LinkStrategy::AllPairs.find(&particles, bounds, 100.0);
        let actual = LinkStrategy::Grid.find(&particles, bounds, 100.0);
        assert!(!expected.is_empty());
        assert_eq!(actual, expected);
    }

    #[test]
    fn grid_handles_particles_on_far_edge() {
        let bounds = DVec2::new(200.0, 200.0);
        let particles = [at(200.0, 200.0), at(150.0, 190.0), at(0.0, 0.0)];
        let links = LinkStrategy::Grid.find(&particles, bounds, 100.0);
        assert_eq!(links, all_pairs(&particles, 100.0));
        assert_eq!(distinct_pairs(&links), vec![(0, 1)]);
    }

    #[test]
    fn grid_declines_cell_counts_over_budget() {
        let bounds = DVec2::new(1920.0, 1080.0);
        let particles = [at(10.0, 10.0), at(10.0, 10.0 + 5e-10)];
        assert!(LinkGrid::build(&particles, bounds, 1e-9).is_none());
        assert!(LinkGrid::build(&particles, bounds, 1e300).is_some());
        assert!(LinkGrid::build(&particles, bounds, 100.0).is_some());
    }

    #[test]
    fn too_fine_grid_falls_back_to_all_pairs() {
        let bounds = DVec2::new(1920.0, 1080.0);
        let particles = [at(10.0, 10.0), at(10.0, 10.0 + 5e-10), at(900.0, 500.0)];
        let links = LinkStrategy::Grid.find(&particles, bounds, 1e-9);
        assert_eq!(links, all_pairs(&particles, 1e-9));
        assert_eq!(distinct_pairs(&links), vec![(0, 1)]);
    }

    #[test]
    fn tiny_link_distance_from_config_does_not_panic() {
        let config =
            FieldConfig::from_json(r#"{"link_distance": 1e-9, "link_strategy": "grid"}"#).unwrap();
        let field = crate::core::ParticleField::new(config, 1920, 1080);
        assert_eq!(field.particles().len(), 230);
        assert_eq!(field.links(), all_pairs(field.particles(), 1e-9));
    }
}
