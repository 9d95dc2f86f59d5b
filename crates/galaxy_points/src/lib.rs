//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParameters`] set into a [`PointCloud`] of positions and
//! colors. Every call builds a fresh cloud; callers rebuild whatever they uploaded from the
//! previous one instead of patching it.

mod color;
mod error;
mod generator;
mod params;

pub use color::Rgb;
pub use error::{GalaxyError, GalaxyResult};
pub use generator::{PointCloud, generate, generate_with_rng, power_offset};
pub use params::GalaxyParameters;
