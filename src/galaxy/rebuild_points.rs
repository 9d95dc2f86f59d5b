use super::{build_point_mesh, GalaxyPointMaterial, GalaxySettings};
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use galaxy_points::{generate_with_rng, GalaxyParameters, GalaxyResult, Rgb};
use rand::prelude::*;
use std::time::{Duration, Instant};

pub struct GalaxyPointsPlugin;

impl Plugin for GalaxyPointsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointRebuildControl>()
            .init_resource::<GalaxyStats>()
            .add_systems(Update, (start_rebuild, finish_rebuild).chain());
    }
}

/// Marks the entity carrying the current galaxy mesh.
#[derive(Component)]
pub struct GalaxyPoints;

/// What the overlay reports about the galaxy on screen.
#[derive(Resource, Default)]
pub struct GalaxyStats {
    pub generation: i32,
    pub point_count: usize,
    pub generation_time: Duration,
}

#[derive(Resource)]
struct PointRebuildControl {
    generation: i32,
    task: Option<Task<(i32, GalaxyResult<RebuiltGalaxy>)>>,
}

impl Default for PointRebuildControl {
    fn default() -> Self {
        Self {
            generation: -1,
            task: None,
        }
    }
}

#[cfg(test)]
impl PointRebuildControl {
    /// True once the latest requested generation has been built or rejected.
    fn is_idle(&self) -> bool {
        self.task.is_none()
    }
}

struct RebuiltGalaxy {
    mesh: Mesh,
    material: GalaxyPointMaterial,
    point_count: usize,
    elapsed: Duration,
}

/// Kicks off a background rebuild whenever the settings generation moves. A rebuild
/// still in flight for an older generation is dropped.
fn start_rebuild(settings: Res<GalaxySettings>, mut control: ResMut<PointRebuildControl>) {
    if control.generation == settings.generation {
        return;
    }
    control.generation = settings.generation;

    if control.task.take().is_some() {
        debug!("Dropping stale galaxy rebuild");
    }
    info!(
        "Galaxy settings updated, regenerating {} points",
        settings.parameters.count
    );

    let settings = (*settings).clone();
    let generation = settings.generation;
    let task = AsyncComputeTaskPool::get().spawn(async move { (generation, rebuild(&settings)) });
    control.task = Some(task);
}

fn rebuild(settings: &GalaxySettings) -> GalaxyResult<RebuiltGalaxy> {
    let start = Instant::now();
    let params = with_linear_colors(&settings.parameters);

    let cloud = match settings.seed {
        Some(seed) => generate_with_rng(&params, &mut StdRng::seed_from_u64(seed))?,
        None => generate_with_rng(&params, &mut rand::rng())?,
    };

    Ok(RebuiltGalaxy {
        mesh: build_point_mesh(&cloud),
        material: GalaxyPointMaterial::new(params.size, settings.size_attenuation),
        point_count: cloud.len(),
        elapsed: start.elapsed(),
    })
}

/// The panel picks colors in sRGB, blending happens on linear values.
fn with_linear_colors(params: &GalaxyParameters) -> GalaxyParameters {
    let linear = |c: Rgb| {
        let l = Color::srgb(c.r, c.g, c.b).to_linear();
        Rgb::new(l.red, l.green, l.blue)
    };
    GalaxyParameters {
        inside_color: linear(params.inside_color),
        outside_color: linear(params.outside_color),
        ..params.clone()
    }
}

/// Swaps in a finished rebuild: the old galaxy entity is despawned and its mesh and
/// material are removed from their asset stores before the new one is spawned.
fn finish_rebuild(
    mut commands: Commands,
    mut control: ResMut<PointRebuildControl>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointMaterial>>,
    mut stats: ResMut<GalaxyStats>,
    existing: Query<(Entity, &Mesh3d, &MeshMaterial3d<GalaxyPointMaterial>), With<GalaxyPoints>>,
) {
    let Some(task) = control.task.as_mut() else {
        return;
    };
    let Some((generation, result)) = block_on(future::poll_once(task)) else {
        return;
    };
    control.task = None;

    let rebuilt = match result {
        Ok(rebuilt) => rebuilt,
        Err(err) => {
            error!("Galaxy generation {generation} rejected, keeping previous galaxy: {err}");
            return;
        }
    };

    for (entity, mesh, material) in &existing {
        meshes.remove(&mesh.0);
        materials.remove(&material.0);
        commands.entity(entity).despawn();
    }

    commands.spawn((
        Mesh3d(meshes.add(rebuilt.mesh)),
        MeshMaterial3d(materials.add(rebuilt.material)),
        Transform::default(),
        NoFrustumCulling,
        GalaxyPoints,
    ));

    info!(
        "Galaxy generation {generation} ready: {} points in {:.1} ms",
        rebuilt.point_count,
        rebuilt.elapsed.as_secs_f64() * 1000.0
    );
    *stats = GalaxyStats {
        generation,
        point_count: rebuilt.point_count,
        generation_time: rebuilt.elapsed,
    };
}
