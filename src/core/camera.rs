//! Camera pose and the per-column render driver.
//!
//! Orientation convention: facing 0 degrees looks along +x (increasing
//! column index within a row), angles grow toward +y (increasing row
//! index). The minimap and the textual overlay share this convention.

use rayon::prelude::*;

use crate::core::map::{Location2D, Map};
use crate::core::ray::{self, CastDirection, Ray, SamplePoint};

/// Immutable camera pose. The input loop builds a fresh one each frame and
/// the renderer only ever sees a snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    location: Location2D,
    facing_degrees: f32,
}

impl Pose {
    pub fn new(location: Location2D, facing_degrees: f32) -> Self {
        Self {
            location,
            facing_degrees: normalize_degrees(facing_degrees),
        }
    }

    pub fn location(self) -> Location2D {
        self.location
    }

    /// Always in [0, 360).
    pub fn facing_degrees(self) -> f32 {
        self.facing_degrees
    }

    pub fn with_location(self, location: Location2D) -> Self {
        Self { location, ..self }
    }

    pub fn turned_by(self, delta_degrees: f32) -> Self {
        Self {
            facing_degrees: normalize_degrees(self.facing_degrees + delta_degrees),
            ..self
        }
    }
}

fn normalize_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

#[derive(Clone, Copy, Debug)]
pub struct RenderParams {
    /// Max cells a ray may travel before it counts as a miss.
    pub range: i32,
    /// Field-of-view control: larger compresses the FOV.
    pub focal_length: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            range: 25,
            focal_length: 0.8,
        }
    }
}

pub struct RenderResult {
    /// Terminal sample of each column's trace, one per screen column.
    pub columns: Vec<SamplePoint>,
    /// Every intermediate step of every trace. Filled only for debug
    /// renders; the drawing path never reads it.
    pub all_sample_points: Vec<SamplePoint>,
}

/// Casts one ray per screen column. Pure with respect to the map, so columns
/// are computed in parallel; each one writes only its own slot.
pub fn render(
    map: &Map,
    pose: Pose,
    params: RenderParams,
    screen_width: usize,
    debug: bool,
) -> RenderResult {
    let rays: Vec<Ray> = (0..screen_width)
        .into_par_iter()
        .map(|column| {
            let u = column as f32 / screen_width as f32 - 0.5;
            let angle = u.atan2(params.focal_length);
            let direction = CastDirection::new(pose.facing_degrees.to_radians() + angle);
            ray::cast(map, column, pose.location, direction, params.range)
        })
        .collect();

    let origin = SamplePoint::origin(pose.location);
    let columns = rays
        .iter()
        .map(|ray| *ray.terminal().unwrap_or(&origin))
        .collect();

    let all_sample_points = if debug {
        rays.into_iter().flat_map(|ray| ray.points).collect()
    } else {
        Vec::new()
    };

    RenderResult {
        columns,
        all_sample_points,
    }
}
