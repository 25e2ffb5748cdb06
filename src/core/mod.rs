//! Core engine types and algorithms (world, camera, traversal, input).
//!
//! Re-exports:
//! - `map`: Tile grid, surfaces and the debug overlay
//! - `camera`: Camera pose and the per-column render driver
//! - `ray`: DDA traversal over grid lines
//! - `process_events`: Input handling and movement

pub mod camera;
pub mod map;
pub mod process_events;
pub mod ray;
