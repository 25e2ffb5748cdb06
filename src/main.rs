// main.rs
mod core;
mod render;

use std::env;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use raylib::prelude::*;

use crate::core::camera::{self, Pose, RenderParams};
use crate::core::map::{self, Map, MapLoadError};
use crate::core::process_events::process_events;
use crate::render::ascii;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::draw_minimap;
use crate::render::projector;

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const ASCII_COLUMNS: usize = 100;
const ASCII_ROWS: usize = 50;

const CEIL_COLOR: Color = Color::new(20, 24, 32, 255);
const FLOOR_COLOR: Color = Color::new(56, 58, 62, 255);

const DEFAULT_WORLD: [&str; 13] = [
    "########################################",
    "#                                      #",
    "#      #########                       #",
    "#         ###                          #",
    "###       ###            #             #",
    "###                      #             #",
    "##                     ###             #",
    "#          c           ###      ########",
    "#                      ###      ########",
    "#                        #             #",
    "###                                    #",
    "###                                    #",
    "########################################",
];

fn load_world(path: Option<&String>) -> Result<Map, MapLoadError> {
    match path {
        Some(path) => map::load_map_file(path),
        None => Ok(Map::new(&DEFAULT_WORLD)?),
    }
}

fn main() -> ExitCode {
    let mut ascii_only = false;
    let mut map_path = None;
    for arg in env::args().skip(1) {
        if arg == "--ascii" {
            ascii_only = true;
        } else {
            map_path = Some(arg);
        }
    }

    let world = match load_world(map_path.as_ref()) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let params = RenderParams::default();
    let spawn = Pose::new(world.spawn_location(), 0.0);

    // traversal overlay for the first frame, like the old console demo
    let preview = camera::render(&world, spawn, params, ASCII_COLUMNS, true);
    println!("Rays cast to render the first frame:");
    println!("{}", world.to_debug_string(&preview.all_sample_points));

    if ascii_only {
        let slices = projector::project(&preview.columns, WINDOW_HEIGHT as i32, params.range);
        println!(
            "{}",
            ascii::render_frame(&slices, WINDOW_HEIGHT as i32, ASCII_ROWS)
        );
        return ExitCode::SUCCESS;
    }

    run_window(&world, spawn, params);
    ExitCode::SUCCESS
}

fn paint_background(fb: &mut Framebuffer) {
    // two-tone ceiling and floor, wall slices land on top
    let hh = fb.height / 2;
    for y in 0..fb.height {
        let color = if y < hh { CEIL_COLOR } else { FLOOR_COLOR };
        fb.set_current_color(color);
        for x in 0..fb.width {
            fb.set_pixel(x, y);
        }
    }
}

fn run_window(world: &Map, spawn: Pose, params: RenderParams) {
    let (mut window, raylib_thread) = raylib::init()
        .size(WINDOW_WIDTH as i32, WINDOW_HEIGHT as i32)
        .title("Raycaster")
        .build();

    let mut framebuffer = Framebuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut pose = spawn;
    let mut top_down = false;

    let cell_px = (WINDOW_HEIGHT / world.size().max(1) as u32).max(1);

    while !window.window_should_close() {
        // M switches between the 3D view and the top-down debug view
        if window.is_key_pressed(KeyboardKey::KEY_M) {
            top_down = !top_down;
        }

        let dt = window.get_frame_time();
        pose = process_events(&window, world, pose, dt);

        // the debug trace is only collected when the top-down view wants it
        let result = camera::render(world, pose, params, WINDOW_WIDTH as usize, top_down);

        framebuffer.clear();
        if top_down {
            draw_minimap(
                &mut framebuffer,
                world,
                pose,
                &result.all_sample_points,
                cell_px,
            );
        } else {
            let slices = projector::project(&result.columns, WINDOW_HEIGHT as i32, params.range);
            paint_background(&mut framebuffer);
            for (column, slice) in slices.iter().enumerate() {
                let gray = Color::new(slice.shade, slice.shade, slice.shade, 255);
                framebuffer.draw_column(column as u32, slice.offset, slice.height, gray);
            }
        }

        let fps_now = window.get_fps();
        let facing = pose.facing_degrees();

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);

            for y in 0..framebuffer.height {
                for x in 0..framebuffer.width {
                    let color = framebuffer.color_buffer[(y * framebuffer.width + x) as usize];
                    if color != framebuffer.background_color {
                        d.draw_pixel(x as i32, y as i32, color);
                    }
                }
            }

            d.draw_text(&format!("FPS: {fps_now}"), 10, 10, 20, Color::WHITE);
            d.draw_text(&format!("facing: {facing:.0}"), 10, 40, 20, Color::WHITE);
        }

        // ~60 FPS
        thread::sleep(Duration::from_millis(16));
    }
}
