//! Input handling: keyboard to a fresh camera pose each frame. The engine
//! never sees a pose mid-change, only the snapshot handed to `render`.

use raylib::prelude::*;

use crate::core::camera::Pose;
use crate::core::map::{Location2D, Map};

pub const TURN_SPEED_DEGREES: f32 = 120.0; // per second
pub const MOVE_SPEED_CELLS: f32 = 2.5; // per second

pub fn process_events(rl: &RaylibHandle, map: &Map, pose: Pose, dt: f32) -> Pose {
    let mut pose = pose;

    if rl.is_key_down(KeyboardKey::KEY_LEFT) {
        pose = pose.turned_by(-TURN_SPEED_DEGREES * dt);
    }
    if rl.is_key_down(KeyboardKey::KEY_RIGHT) {
        pose = pose.turned_by(TURN_SPEED_DEGREES * dt);
    }

    let mut forward = 0.0;
    if rl.is_key_down(KeyboardKey::KEY_W) || rl.is_key_down(KeyboardKey::KEY_UP) {
        forward += 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_S) || rl.is_key_down(KeyboardKey::KEY_DOWN) {
        forward -= 1.0;
    }

    if forward != 0.0 {
        let heading = pose.facing_degrees().to_radians();
        let step = forward * MOVE_SPEED_CELLS * dt;
        let at = pose.location();
        let next = Location2D::new(at.x + heading.cos() * step, at.y + heading.sin() * step);

        // keep out of solid cells
        if map
            .surface_at(next.x.floor() as i32, next.y.floor() as i32)
            .has_no_height()
        {
            pose = pose.with_location(next);
        }
    }

    pose
}
