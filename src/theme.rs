//! Night-sky palette: teal backdrop with warm tan stars

use serde::{Deserialize, Serialize};

/// 8-bit RGB color with a fractional alpha, as canvas style strings expect
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha, clamped to [0, 1]
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string, e.g. `rgba(212, 163, 115, 0.5)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub mod colors {
    use super::Rgba;

    // === Stars & links ===
    pub const STAR: Rgba = Rgba::from_rgb(212, 163, 115); // #d4a373 - warm tan

    // === Backdrop gradient ===
    pub const BACKDROP_INNER: Rgba = Rgba::from_rgb(6, 78, 59); // #064e3b - dark teal
    pub const BACKDROP_OUTER: Rgba = Rgba::from_rgb(2, 44, 34); // #022c22 - darker teal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_carries_alpha() {
        assert_eq!(colors::STAR.with_alpha(0.5).to_css(), "rgba(212, 163, 115, 0.5)");
        assert_eq!(colors::BACKDROP_INNER.to_css(), "rgba(6, 78, 59, 1)");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(colors::STAR.with_alpha(1.5).a, 1.0);
        assert_eq!(colors::STAR.with_alpha(-0.1).a, 0.0);
    }
}
