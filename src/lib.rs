//! Constellation - drifting particles joined by fading proximity lines
//!
//! - `core`: particle field, link finding and the surface-agnostic renderer
//! - `web` (wasm32 + `wasm` feature): canvas front end driven by
//!   `requestAnimationFrame`
//!
//! The headless `constellation-cli` binary (`cli` feature) drives the same
//! renderer against a recording surface.

pub mod core;
pub mod theme;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;
