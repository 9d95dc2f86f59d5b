use crate::color::Rgb;
use crate::error::{GalaxyError, GalaxyResult};

/// Inputs for one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParameters {
    /// Number of points.
    pub count: u32,
    /// Rendered point size, ignored by the generator itself.
    pub size: f32,
    /// Maximum distance of a point's arm position from the center.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Radians of twist per unit of radius.
    pub spin: f32,
    /// Carried along for callers but not used by the offset formula.
    pub randomness: f32,
    /// Exponent applied to the random offsets, larger values hug the arms tighter.
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.02,
            randomness_power: 3.0,
            inside_color: Rgb::from_srgb_u8([0xff, 0x60, 0x30]),
            outside_color: Rgb::from_srgb_u8([0x1b, 0x39, 0x84]),
        }
    }
}

impl GalaxyParameters {
    /// Lower bounds for interactive editing.
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Rgb::BLACK,
        outside_color: Rgb::BLACK,
    };
    /// Upper bounds for interactive editing.
    pub const MAX: Self = Self {
        count: 1_000_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Rgb::WHITE,
        outside_color: Rgb::WHITE,
    };

    /// Checks the parameters the generator cannot work without. Everything else is
    /// accepted, even when the result is geometrically degenerate.
    pub fn validate(&self) -> GalaxyResult<()> {
        if self.count < 1 {
            return Err(GalaxyError::invalid("count", "must be at least 1"));
        }
        // also rejects NaN
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(GalaxyError::invalid(
                "radius",
                format!("must be a positive finite number, got {}", self.radius),
            ));
        }
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        Ok(())
    }
}
