use bevy::prelude::*;
use galaxy_points::GalaxyParameters;

/// The applied galaxy settings. `generation` is bumped whenever anything else changes,
/// which is what the point rebuild keys off.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxySettings {
    pub generation: i32,
    pub parameters: GalaxyParameters,
    /// Fixed seed for reproducible galaxies, fresh randomness when `None`.
    pub seed: Option<u64>,
    pub size_attenuation: bool,
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self {
            generation: 1,
            parameters: GalaxyParameters::default(),
            seed: None,
            size_attenuation: true,
        }
    }
}

impl GalaxySettings {
    /// Forces a rebuild with the current parameters.
    pub fn regenerate(&mut self) {
        self.generation += 1;
    }

    fn same_content(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.seed == other.seed
            && self.size_attenuation == other.size_attenuation
    }
}

/// Working copy edited by the panel, committed to [`GalaxySettings`] when an edit
/// finishes rather than on every intermediate slider value.
#[derive(Resource, Clone, Default)]
pub struct GalaxySettingsDraft(pub GalaxySettings);

#[derive(Resource)]
struct GalaxySettingsOld(GalaxySettings);

impl Default for GalaxySettingsOld {
    fn default() -> Self {
        Self(GalaxySettings {
            generation: -1,
            ..default()
        })
    }
}

pub struct GalaxySettingsPlugin;

impl Plugin for GalaxySettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxySettings>()
            .init_resource::<GalaxySettingsDraft>()
            .init_resource::<GalaxySettingsOld>()
            .add_systems(Update, apply_ui_updates);
    }
}

fn apply_ui_updates(
    mut settings_old: ResMut<GalaxySettingsOld>,
    mut settings: ResMut<GalaxySettings>,
) {
    if !settings.is_changed() || *settings == settings_old.0 {
        return;
    }
    // an explicit regenerate already moved the generation on
    if !settings.same_content(&settings_old.0) && settings.generation == settings_old.0.generation {
        settings.generation += 1;
    }
    debug!("Galaxy settings now at generation {}", settings.generation);
    settings_old.0 = settings.clone();
}
