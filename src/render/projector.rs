//! Column projection: terminal samples to vertical wall slices.

use rayon::prelude::*;

use crate::core::ray::SamplePoint;

/// Compensates the per-column angular cast versus true perpendicular
/// distance. An approximation, not a geometric correction.
pub const FISHEYE_CORRECTION: f32 = 2.5;

const MAX_BRIGHTNESS: f32 = 200.0;

/// One vertical slice, centered on the horizon.
/// Occupies screen rows [offset, offset + height).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlice {
    pub height: i32,
    pub offset: i32,
    /// Brightness in [0, 200]; farther walls are darker.
    pub shade: u8,
}

/// Projects each column's terminal sample into a slice. Pure per-column
/// map, no pixel buffer here.
pub fn project(columns: &[SamplePoint], screen_height: i32, range: i32) -> Vec<ColumnSlice> {
    columns
        .par_iter()
        .map(|sample| project_sample(sample, screen_height, range))
        .collect()
}

fn project_sample(sample: &SamplePoint, screen_height: i32, range: i32) -> ColumnSlice {
    let surface_height = sample.surface.height();
    if surface_height <= 0.0 || sample.distance <= 0.0 {
        // misses draw nothing
        return ColumnSlice {
            height: 0,
            offset: screen_height / 2,
            shade: 0,
        };
    }

    let raw = screen_height as f32 * surface_height / (sample.distance / FISHEYE_CORRECTION);
    let height = raw.ceil().clamp(0.0, screen_height as f32) as i32;
    let offset = (screen_height - height) / 2;

    ColumnSlice {
        height,
        offset,
        shade: shade_for(sample.distance, range),
    }
}

fn shade_for(distance: f32, range: i32) -> u8 {
    let percentage = distance / range as f32 * 100.0;
    let brightness = MAX_BRIGHTNESS - (MAX_BRIGHTNESS / 100.0) * percentage;
    brightness.clamp(0.0, MAX_BRIGHTNESS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::{Location2D, Surface};

    fn hit(distance: f32, height: f32) -> SamplePoint {
        SamplePoint {
            location: Location2D::new(0.0, 0.0),
            length_squared: 0.0,
            distance,
            surface: Surface::Wall { height },
        }
    }

    #[test]
    fn wall_at_correction_distance_fills_the_screen() {
        let slices = project(&[hit(FISHEYE_CORRECTION, 1.0)], 100, 25);
        assert_eq!(slices[0].height, 100);
        assert_eq!(slices[0].offset, 0);
    }

    #[test]
    fn height_halves_as_distance_doubles() {
        let slices = project(&[hit(5.0, 1.0)], 100, 25);
        assert_eq!(slices[0].height, 50);
        assert_eq!(slices[0].offset, 25);
    }

    #[test]
    fn close_walls_clamp_to_screen_height() {
        let slices = project(&[hit(1.0, 1.0)], 100, 25);
        assert_eq!(slices[0].height, 100);
        assert_eq!(slices[0].offset, 0);
    }

    #[test]
    fn half_height_surfaces_project_half_slices() {
        let slices = project(&[hit(FISHEYE_CORRECTION, 0.5)], 100, 25);
        assert_eq!(slices[0].height, 50);
    }

    #[test]
    fn misses_project_to_empty_slices() {
        let miss = SamplePoint::origin(Location2D::new(3.0, 3.0));
        let slices = project(&[miss], 100, 25);
        assert_eq!(
            slices[0],
            ColumnSlice {
                height: 0,
                offset: 50,
                shade: 0
            }
        );
    }

    #[test]
    fn shade_fades_linearly_with_distance() {
        let near = project(&[hit(0.25, 1.0)], 100, 25)[0].shade;
        let mid = project(&[hit(12.5, 1.0)], 100, 25)[0].shade;
        let far = project(&[hit(25.0, 1.0)], 100, 25)[0].shade;

        assert_eq!(near, 198);
        assert_eq!(mid, 100);
        assert_eq!(far, 0);
    }

    #[test]
    fn slice_per_input_column_in_order() {
        let columns = [hit(5.0, 1.0), hit(10.0, 1.0), hit(20.0, 1.0)];
        let slices = project(&columns, 120, 25);
        assert_eq!(slices.len(), 3);
        assert!(slices[0].height > slices[1].height);
        assert!(slices[1].height > slices[2].height);
        assert!(slices[0].shade > slices[1].shade);
        assert!(slices[1].shade > slices[2].shade);
    }
}
