use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::EguiContexts;
use std::f32::consts::FRAC_PI_2;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control_system);
    }
}

const ROTATE_SPEED: f32 = 0.005;
/// Share of the pending rotation applied per frame.
const DAMPING: f32 = 0.05;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 60.0;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let camera_main = CameraMain::default();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(camera_main.translation())
            .looking_at(camera_main.target_pos, Vec3::Y),
        camera_main,
    ));
}

/// Orbits `target_pos` on a sphere of radius `distance`.
#[derive(Component, Clone)]
pub struct CameraMain {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    smooth_zoom_buffer: f32,
}

impl Default for CameraMain {
    fn default() -> Self {
        Self::looking_from(Vec3::splat(3.0), Vec3::ZERO)
    }
}

impl CameraMain {
    fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        Self {
            target_pos: target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn translation(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target_pos
            + Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance
    }

    /// Applies part of the pending rotation and keeps the rest for later frames, which
    /// gives the orbit its glide after the mouse is released.
    fn apply_damping(&mut self) {
        self.yaw += self.pending_yaw * DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING)
            .clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
        self.pending_yaw *= 1.0 - DAMPING;
        self.pending_pitch *= 1.0 - DAMPING;
    }

    fn apply_zoom(&mut self) {
        let amount = smooth_zoom_step(self.smooth_zoom_buffer);
        self.smooth_zoom_buffer -= amount;
        self.distance = (self.distance * (1.0 - amount)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Portion of the zoom buffer to consume this frame: a fixed share of it, but never less
/// than a small minimum so the buffer actually drains.
fn smooth_zoom_step(buffer: f32) -> f32 {
    let smooth_zoom_min = 0.001f32;
    let smooth_zoom_factor = 0.2f32;

    if buffer < 0.0 {
        f32::min(buffer * smooth_zoom_factor, (-smooth_zoom_min).max(buffer))
    } else {
        f32::max(buffer * smooth_zoom_factor, smooth_zoom_min.min(buffer))
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut CameraMain)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut camera_main)) = query.single_mut() else {
        return;
    };
    let pointer_on_ui = contexts.ctx_mut().wants_pointer_input();

    let motion: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    if !pointer_on_ui && mouse_buttons.pressed(MouseButton::Left) {
        camera_main.pending_yaw -= motion.x * ROTATE_SPEED / DAMPING;
        camera_main.pending_pitch += motion.y * ROTATE_SPEED / DAMPING;
    }

    for ev in scroll_evr.read() {
        if pointer_on_ui {
            continue;
        }
        match ev.unit {
            MouseScrollUnit::Line => camera_main.smooth_zoom_buffer += ev.y * 0.1,
            MouseScrollUnit::Pixel => camera_main.smooth_zoom_buffer += ev.y * 0.002,
        }
    }

    camera_main.apply_damping();
    camera_main.apply_zoom();

    transform.translation = camera_main.translation();
    transform.look_at(camera_main.target_pos, Vec3::Y);
}
