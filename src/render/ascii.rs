//! Text-art rendering of a projected frame, for terminals and tests.

use crate::render::projector::ColumnSlice;

/// Brightness thresholds to glyphs, darkest last. A cell takes the glyph of
/// the highest threshold not above its brightness, so bright (close) walls
/// wash out to spaces and the unlit background prints solid.
const RAMP: [(u8, char); 16] = [
    (0, '█'),
    (20, '▓'),
    (40, '▒'),
    (60, '░'),
    (80, '%'),
    (100, '@'),
    (110, '#'),
    (120, '+'),
    (130, 'O'),
    (140, 'o'),
    (150, '.'),
    (160, ' '),
    (170, ' '),
    (180, ' '),
    (190, ' '),
    (200, ' '),
];

fn glyph_for(brightness: u8) -> char {
    let mut current = ' ';
    for &(threshold, glyph) in RAMP.iter() {
        if threshold <= brightness {
            current = glyph;
        }
    }
    current
}

/// Down-samples the slices of one projected frame (rendered at
/// `screen_height`) to `rows` text lines, one character per column.
pub fn render_frame(slices: &[ColumnSlice], screen_height: i32, rows: usize) -> String {
    let mut frame = String::with_capacity((slices.len() + 1) * rows);

    for row in 0..rows {
        let screen_y = (row as i32 * screen_height) / rows.max(1) as i32;
        for slice in slices {
            let inside = screen_y >= slice.offset && screen_y < slice.offset + slice.height;
            let brightness = if inside { slice.shade } else { 0 };
            frame.push(glyph_for(brightness));
        }
        if row + 1 < rows {
            frame.push('\n');
        }
    }

    frame
}
