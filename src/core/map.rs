//! Map loading, surface queries and the debug overlay.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::core::ray::SamplePoint;

/// Tile that occludes a ray.
pub const WALL_GLYPH: char = '#';
/// Tile marking where the camera starts. Exactly one per map.
pub const SPAWN_MARKER: char = 'c';

/// A point in grid units. The fractional part is the position inside a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location2D {
    pub x: f32,
    pub y: f32,
}

impl Location2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Location2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What a cell occludes with. `Nothing` doubles as "out of bounds".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Nothing,
    Wall { height: f32 },
    // other surface kinds go here
}

impl Surface {
    pub fn height(self) -> f32 {
        match self {
            Surface::Nothing => 0.0,
            Surface::Wall { height } => height,
        }
    }

    /// A ray passes through any surface without height.
    pub fn has_no_height(self) -> bool {
        self.height() <= 0.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedMapError {
    #[error("row {row} is {len} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("no spawn marker 'c' in the map")]
    MissingSpawn,
    #[error("more than one spawn marker 'c' in the map")]
    AmbiguousSpawn,
}

#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("could not read map file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed map: {0}")]
    Malformed(#[from] MalformedMapError),
}

/// Reads a map from a text file, one row of tiles per line.
pub fn load_map_file<P: AsRef<Path>>(path: P) -> Result<Map, MapLoadError> {
    let text = fs::read_to_string(path)?;
    let rows: Vec<&str> = text.lines().collect();
    Ok(Map::new(&rows)?)
}

/// Square grid of tiles. Immutable once constructed.
pub struct Map {
    topology: Vec<Vec<char>>,
    size: usize,
    spawn: Location2D,
}

impl Map {
    /// Builds a map from equal-length rows of tiles. The spawn marker is
    /// extracted and its cell cleared, so it never renders as a tile.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self, MalformedMapError> {
        let mut topology: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let size = topology.first().map_or(0, Vec::len);
        for (row, tiles) in topology.iter().enumerate() {
            if tiles.len() != size {
                return Err(MalformedMapError::RaggedRow {
                    row,
                    len: tiles.len(),
                    expected: size,
                });
            }
        }

        let mut spawn = None;
        for (y, tiles) in topology.iter().enumerate() {
            for (x, &glyph) in tiles.iter().enumerate() {
                if glyph == SPAWN_MARKER {
                    if spawn.is_some() {
                        return Err(MalformedMapError::AmbiguousSpawn);
                    }
                    spawn = Some((x, y));
                }
            }
        }
        let (spawn_x, spawn_y) = spawn.ok_or(MalformedMapError::MissingSpawn)?;
        topology[spawn_y][spawn_x] = ' ';

        Ok(Self {
            topology,
            size,
            spawn: Location2D::new(spawn_x as f32, spawn_y as f32),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Where the spawn marker was found, as the cell's top-left corner.
    pub fn spawn_location(&self) -> Location2D {
        self.spawn
    }

    /// Surface at an integer cell. Out-of-bounds queries are not an error,
    /// they read as empty space.
    pub fn surface_at(&self, x: i32, y: i32) -> Surface {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return Surface::Nothing;
        }
        let glyph = self
            .topology
            .get(y as usize)
            .and_then(|row| row.get(x as usize));
        match glyph {
            Some(&WALL_GLYPH) => Surface::Wall { height: 1.0 },
            _ => Surface::Nothing,
        }
    }

    /// Copy of the topology with a `.` stamped on every traversed cell.
    /// Feed it the `all_sample_points` of a debug render.
    pub fn to_debug_string(&self, samples: &[SamplePoint]) -> String {
        let mut copy = self.topology.clone();
        for point in samples {
            let x = point.location.x.floor() as i32;
            let y = point.location.y.floor() as i32;
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(tile) = copy
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *tile = '.';
            }
        }
        copy.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> Map {
        Map::new(&["#####", "#   #", "# c #", "#   #", "#####"]).unwrap()
    }

    #[test]
    fn spawn_is_extracted_and_cleared() {
        let map = small_world();
        assert_eq!(map.spawn_location(), Location2D::new(2.0, 2.0));
        // the marker cell renders as open floor
        assert_eq!(map.surface_at(2, 2), Surface::Nothing);
    }

    #[test]
    fn walls_have_full_height() {
        let map = small_world();
        assert_eq!(map.surface_at(0, 0), Surface::Wall { height: 1.0 });
        assert!(!map.surface_at(0, 0).has_no_height());
        assert!(map.surface_at(1, 1).has_no_height());
    }

    #[test]
    fn out_of_bounds_reads_as_nothing() {
        let map = small_world();
        assert_eq!(map.surface_at(-1, 2), Surface::Nothing);
        assert_eq!(map.surface_at(2, -1), Surface::Nothing);
        assert_eq!(map.surface_at(5, 2), Surface::Nothing);
        assert_eq!(map.surface_at(2, 5), Surface::Nothing);
    }

    #[test]
    fn ragged_rows_fail_construction() {
        let err = Map::new(&["###", "# c #", "###"]).unwrap_err();
        assert_eq!(
            err,
            MalformedMapError::RaggedRow {
                row: 1,
                len: 5,
                expected: 3
            }
        );
    }

    #[test]
    fn missing_spawn_fails_construction() {
        let err = Map::new(&["###", "# #", "###"]).unwrap_err();
        assert_eq!(err, MalformedMapError::MissingSpawn);
    }

    #[test]
    fn two_markers_on_one_row_fail_construction() {
        let err = Map::new(&["#####", "#c c#", "#####"]).unwrap_err();
        assert_eq!(err, MalformedMapError::AmbiguousSpawn);
    }

    #[test]
    fn markers_on_two_rows_fail_construction() {
        let err = Map::new(&["#####", "#c  #", "#  c#"]).unwrap_err();
        assert_eq!(err, MalformedMapError::AmbiguousSpawn);
    }

    #[test]
    fn empty_input_fails_construction() {
        let rows: [&str; 0] = [];
        assert_eq!(Map::new(&rows).unwrap_err(), MalformedMapError::MissingSpawn);
    }

    #[test]
    fn debug_string_stamps_traversed_cells() {
        let map = small_world();
        let samples = [
            SamplePoint::origin(Location2D::new(1.0, 1.0)),
            SamplePoint::origin(Location2D::new(3.2, 3.7)),
            // out of bounds samples are skipped
            SamplePoint::origin(Location2D::new(-4.0, 9.0)),
        ];
        let overlay = map.to_debug_string(&samples);
        let lines: Vec<&str> = overlay.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(&lines[1][1..2], ".");
        assert_eq!(&lines[3][3..4], ".");
    }
}
