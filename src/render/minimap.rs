//! Top-down debug view: map cells, traversed sample points, camera dot.
//! Uses the same orientation convention as the renderer, so the overlay and
//! the 3D view stay visually consistent.

use raylib::prelude::*;

use crate::core::camera::Pose;
use crate::core::map::Map;
use crate::core::ray::SamplePoint;
use crate::render::framebuffer::Framebuffer;

const WALL_COLOR: Color = Color::RED;
const TRACE_COLOR: Color = Color::new(200, 200, 200, 255);
const CAMERA_COLOR: Color = Color::YELLOW;

fn fill_cell(fb: &mut Framebuffer, cell_x: u32, cell_y: u32, cell_px: u32, color: Color) {
    let x0 = cell_x * cell_px;
    let y0 = cell_y * cell_px;
    for y in y0..y0 + cell_px {
        for x in x0..x0 + cell_px {
            fb.set_pixel_color(x, y, color);
        }
    }
}

pub fn draw_minimap(
    fb: &mut Framebuffer,
    map: &Map,
    pose: Pose,
    samples: &[SamplePoint],
    cell_px: u32,
) {
    for y in 0..map.size() as i32 {
        for x in 0..map.size() as i32 {
            if !map.surface_at(x, y).has_no_height() {
                fill_cell(fb, x as u32, y as u32, cell_px, WALL_COLOR);
            }
        }
    }

    // traversed cells, the 2D picture of every cast ray
    for sample in samples {
        let x = sample.location.x.floor() as i32;
        let y = sample.location.y.floor() as i32;
        if x >= 0 && y >= 0 {
            let px = sample.location.x * cell_px as f32;
            let py = sample.location.y * cell_px as f32;
            fb.set_pixel_color(px as u32, py as u32, TRACE_COLOR);
        }
    }

    let location = pose.location();
    let cam_x = (location.x * cell_px as f32) as u32;
    let cam_y = (location.y * cell_px as f32) as u32;
    fb.set_current_color(CAMERA_COLOR);
    fb.set_pixel(cam_x, cam_y);
    fb.set_pixel(cam_x + 1, cam_y);
    fb.set_pixel(cam_x, cam_y + 1);
    fb.set_pixel(cam_x + 1, cam_y + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::{Location2D, Map};

    #[test]
    fn walls_and_camera_show_up() {
        let map = Map::new(&["###", "#c#", "###"]).unwrap();
        let pose = Pose::new(Location2D::new(1.5, 1.5), 0.0);
        let mut fb = Framebuffer::new(24, 24);
        draw_minimap(&mut fb, &map, pose, &[], 8);

        // a corner wall pixel and the camera dot
        assert_eq!(fb.color_buffer[0], WALL_COLOR);
        assert_eq!(fb.color_buffer[(12 * 24 + 12) as usize], CAMERA_COLOR);
        // the spawn cell stays open
        assert_eq!(fb.color_buffer[(12 * 24 + 11) as usize], Color::BLACK);
    }
}
