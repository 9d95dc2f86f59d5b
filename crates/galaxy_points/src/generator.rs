use crate::error::GalaxyResult;
use crate::params::GalaxyParameters;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Positions and colors of a generated galaxy, index-aligned.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl PointCloud {
    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(position, color)` pairs in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32; 3], &[f32; 3])> {
        self.positions.iter().zip(self.colors.iter())
    }

    /// Positions as one `x y z x y z ...` slice, for callers that upload flat float
    /// buffers.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as one `r g b r g b ...` slice.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Generates a galaxy using the thread-local random source.
pub fn generate(params: &GalaxyParameters) -> GalaxyResult<PointCloud> {
    generate_with_rng(params, &mut rand::rng())
}

/// Generates a galaxy, drawing every random value from `rng`.
///
/// Per point the draws are taken in a fixed order: the radius, then a magnitude and a
/// sign for each of x, y and z. A seeded source therefore reproduces a cloud exactly.
pub fn generate_with_rng<R: Rng>(params: &GalaxyParameters, rng: &mut R) -> GalaxyResult<PointCloud> {
    params.validate()?;

    let count = params.count as usize;
    let mut cloud = PointCloud::with_capacity(count);

    for i in 0..count {
        let radius = rng.random::<f32>() * params.radius;
        let spin_angle = radius * params.spin;

        let branch = i % params.branches as usize;
        let branch_angle = branch as f32 / params.branches as f32 * TAU;

        let offset_x = power_offset(rng, params.randomness_power);
        let offset_y = power_offset(rng, params.randomness_power);
        let offset_z = power_offset(rng, params.randomness_power);

        let angle = branch_angle + spin_angle;
        cloud.positions.push([
            angle.cos() * radius + offset_x,
            offset_y,
            angle.sin() * radius + offset_z,
        ]);

        let alpha = radius / params.radius;
        cloud
            .colors
            .push(params.inside_color.lerp(params.outside_color, alpha).to_array());
    }

    Ok(cloud)
}

/// A value in `(-1, 1)` shaped as `±u^power` for a uniform `u`, so larger powers pull
/// the distribution toward zero while keeping it symmetric.
pub fn power_offset<R: Rng>(rng: &mut R, power: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power);
    let sign = if rng.random::<f32>() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign
}
