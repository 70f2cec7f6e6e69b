use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(
                PostUpdate,
                camera_control_system.before(TransformSystem::TransformPropagate),
            );
    }
}

const START_EYE: Vec3 = Vec3::new(3.0, 3.0, 3.0);
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 60.0;
const PITCH_LIMIT: f32 = 1.54;
/// Fraction of the remaining motion applied per frame.
const DAMPING: f32 = 0.05;
const ROTATE_SPEED: f32 = 0.005;
const PAN_SPEED: f32 = 0.0015;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_translation(START_EYE).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::looking_from(START_EYE, Vec3::ZERO),
    ));
}

/// Orbit controls with inertia: input adds to pending motion, which bleeds into
/// the camera a fraction at a time.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vec3,
    smooth_zoom_buffer: f32,
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            target_pos: target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / offset.length()).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
            smooth_zoom_buffer: 0.0,
        }
    }

    fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target_pos + dir * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target_pos, Vec3::Y)
    }

    /// Drag by `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_yaw -= delta.x * ROTATE_SPEED;
        self.pending_pitch += delta.y * ROTATE_SPEED;
    }

    /// Shift the target in the view plane, scaled by how far out the camera is.
    pub fn pan(&mut self, delta: Vec2) {
        let transform = self.transform();
        let scale = self.distance * PAN_SPEED;
        self.pending_pan += (transform.left() * delta.x + transform.up() * delta.y) * scale;
    }

    pub fn zoom(&mut self, amount: f32) {
        self.smooth_zoom_buffer += amount;
    }

    /// Applies one frame of damped motion.
    pub fn step(&mut self) {
        self.yaw += self.pending_yaw * DAMPING;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.target_pos += self.pending_pan * DAMPING;
        self.pending_yaw *= 1.0 - DAMPING;
        self.pending_pitch *= 1.0 - DAMPING;
        self.pending_pan *= 1.0 - DAMPING;

        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = 0.2f32;

        let smooth_zoom_amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        };
        self.distance =
            (self.distance * (1.0 - smooth_zoom_amount)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.smooth_zoom_buffer -= smooth_zoom_amount;
    }
}

fn camera_control_system(
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mut contexts: EguiContexts,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    // the tweak panel owns the pointer while hovered
    let panel_has_pointer = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area());

    let drag: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    if !panel_has_pointer {
        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.rotate(drag);
        } else if mouse_buttons.pressed(MouseButton::Right) {
            orbit.pan(drag);
        }
        for ev in scroll_evr.read() {
            match ev.unit {
                MouseScrollUnit::Line => orbit.zoom(ev.y * 0.05),
                MouseScrollUnit::Pixel => orbit.zoom(ev.y * 0.005),
            }
        }
    } else {
        scroll_evr.clear();
    }

    // key delta, WASD slides the target over the galaxy plane
    let mut key_delta = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        key_delta.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        key_delta.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        key_delta.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        key_delta.x -= 1.0;
    }
    if key_delta != Vec2::ZERO {
        orbit.pan(key_delta * 400.0 * time.delta_secs());
    }

    orbit.step();
    *transform = orbit.transform();
}
