//! Field tuning knobs, loadable from JSON

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use super::LinkStrategy;

/// Surface area (px²) that buys one particle
pub const AREA_PER_PARTICLE: f64 = 9000.0;
/// Particles closer than this are linked
pub const LINK_DISTANCE: f64 = 100.0;
/// Bound on each velocity component, per frame
pub const MAX_SPEED: f64 = 0.25;
pub const MIN_RADIUS: f64 = 0.1;
pub const MAX_RADIUS: f64 = 2.1;
pub const LINE_WIDTH: f64 = 0.5;

/// Tunable parameters of a particle field.
///
/// Every field is optional in JSON; missing ones take the defaults above.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub area_per_particle: f64,
    pub link_distance: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub line_width: f64,
    pub link_strategy: LinkStrategy,
    /// Fixed RNG seed for reproducible fields (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            link_distance: LINK_DISTANCE,
            max_speed: MAX_SPEED,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            line_width: LINE_WIDTH,
            link_strategy: LinkStrategy::default(),
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid field config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.area_per_particle.is_finite() && self.area_per_particle > 0.0,
            "area_per_particle must be positive, got {}",
            self.area_per_particle
        );
        ensure!(
            self.link_distance.is_finite() && self.link_distance > 0.0,
            "link_distance must be positive, got {}",
            self.link_distance
        );
        ensure!(
            self.max_speed >= 0.0 && (2.0 * self.max_speed).is_finite(),
            "max_speed must be non-negative with a finite -max..=max span, got {}",
            self.max_speed
        );
        ensure!(
            self.min_radius.is_finite()
                && self.max_radius.is_finite()
                && 0.0 <= self.min_radius
                && self.min_radius <= self.max_radius
                && (self.max_radius - self.min_radius).is_finite(),
            "radius range {}..{} is invalid",
            self.min_radius,
            self.max_radius
        );
        ensure!(
            self.line_width.is_finite() && self.line_width > 0.0,
            "line_width must be positive, got {}",
            self.line_width
        );
        Ok(())
    }
}
