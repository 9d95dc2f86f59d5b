use bevy::prelude::*;

mod galaxy_settings;
mod point_material;
mod point_mesh;
mod rebuild_points;

pub use galaxy_settings::{GalaxySettings, GalaxySettingsDraft, GalaxySettingsPlugin};
pub use point_material::GalaxyPointMaterial;
pub use point_mesh::build_point_mesh;
pub use rebuild_points::{GalaxyPointsPlugin, GalaxyStats};

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<GalaxyPointMaterial>::default(),
            GalaxySettingsPlugin,
            GalaxyPointsPlugin,
        ));
    }
}
