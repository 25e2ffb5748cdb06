//! Ray traversal over grid lines (DDA): steps to the nearest boundary
//! crossing on either axis until a solid surface or the range limit.

use crate::core::map::{Location2D, Map, Surface};

/// Direction of a cast, precomputed once per ray.
#[derive(Clone, Copy, Debug)]
pub struct CastDirection {
    pub sin: f32,
    pub cos: f32,
}

impl CastDirection {
    pub fn new(angle: f32) -> Self {
        Self {
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }
}

/// One step of a ray's trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub location: Location2D,
    /// Squared length of the step that reached this point.
    pub length_squared: f32,
    /// Accumulated distance from the ray's origin. Non-decreasing.
    pub distance: f32,
    pub surface: Surface,
}

impl SamplePoint {
    pub fn origin(location: Location2D) -> Self {
        Self {
            location,
            length_squared: 0.0,
            distance: 0.0,
            surface: Surface::Nothing,
        }
    }
}

/// Ordered trace of one cast, tagged with the screen column it belongs to.
pub struct Ray {
    pub column: usize,
    pub points: Vec<SamplePoint>,
}

impl Ray {
    fn new(column: usize) -> Self {
        Self {
            column,
            points: Vec::new(),
        }
    }

    /// Last sample of the trace: the hit, or the farthest step of a miss.
    pub fn terminal(&self) -> Option<&SamplePoint> {
        self.points.last()
    }
}

/// Marches from `origin` along `direction` one grid-line crossing at a time.
/// Stops on the first solid surface (hit, appended) or once the next crossing
/// would exceed `range` (miss, not appended).
pub fn cast(
    map: &Map,
    column: usize,
    origin: Location2D,
    direction: CastDirection,
    range: i32,
) -> Ray {
    let mut path = Ray::new(column);
    let mut current = SamplePoint::origin(origin);

    loop {
        path.points.push(current);

        let step_x = next_step(
            direction.sin,
            direction.cos,
            current.location.x,
            current.location.y,
            false,
        );
        let step_y = next_step(
            direction.cos,
            direction.sin,
            current.location.y,
            current.location.x,
            true,
        );

        // The closer boundary crossing is the next cell the ray enters.
        let next = if step_x.length_squared < step_y.length_squared {
            inspect(map, step_x, 1, 0, current.distance, direction)
        } else {
            inspect(map, step_y, 0, 1, current.distance, direction)
        };

        if next.distance > range as f32 {
            return path;
        }
        if !next.surface.has_no_height() {
            path.points.push(next);
            return path;
        }
        current = next;
    }
}

/// Distance to the next integer boundary along one axis, with the matching
/// delta on the other axis. `inverted` swaps which computed component is x.
fn next_step(rise: f32, run: f32, x: f32, y: f32, inverted: bool) -> SamplePoint {
    if run == 0.0 {
        // No boundary crossing on this axis; the other axis always wins.
        let mut sentinel = SamplePoint::origin(Location2D::new(x, y));
        sentinel.length_squared = f32::INFINITY;
        return sentinel;
    }

    let dx = if run > 0.0 {
        (x + 1.0).floor() - x
    } else {
        (x - 1.0).ceil() - x
    };
    let dy = dx * (rise / run);

    let location = if inverted {
        Location2D::new(y + dy, x + dx)
    } else {
        Location2D::new(x + dx, y + dy)
    };

    SamplePoint {
        location,
        length_squared: dx * dx + dy * dy,
        distance: 0.0,
        surface: Surface::Nothing,
    }
}

/// Reads the surface for the cell the ray just entered. The sampled cell is
/// shifted by -1 on the stepped axis when travel on that axis is negative,
/// picking the correct side of the crossed boundary line.
fn inspect(
    map: &Map,
    mut step: SamplePoint,
    shift_x: i32,
    shift_y: i32,
    distance: f32,
    direction: CastDirection,
) -> SamplePoint {
    let dx = if direction.cos < 0.0 { shift_x } else { 0 };
    let dy = if direction.sin < 0.0 { shift_y } else { 0 };

    step.surface = detect_surface(map, step.location.x - dx as f32, step.location.y - dy as f32);
    step.distance = distance + step.length_squared.sqrt();
    step
}

fn detect_surface(map: &Map, x: f32, y: f32) -> Surface {
    map.surface_at(x.floor() as i32, y.floor() as i32)
}
