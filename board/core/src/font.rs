//! Built-in 4x6 Bitmap Font
//!
//! A caps-only monospaced face with a 4-pixel advance, which is the cell
//! width all stage-text anchoring math assumes. Glyphs are 3 pixels wide
//! inside the 4-pixel cell; the spare column is inter-character spacing.
//! Lowercase input maps to the uppercase shapes.
//!
//! Each glyph is six row bytes; bit 3 is the leftmost of the four columns.

/// Horizontal advance per character, in pixels
pub const GLYPH_WIDTH: u32 = 4;

/// Glyph height, in pixels
pub const GLYPH_HEIGHT: u32 = 6;

/// Row bitmap shown for characters outside the face
const MISSING: [u8; 6] = [0xE, 0xE, 0xE, 0xE, 0xE, 0x0];

/// Look up the row bitmaps for one character
pub fn glyph(c: char) -> [u8; 6] {
    let c = c.to_ascii_uppercase();
    match c {
        ' ' => [0x0, 0x0, 0x0, 0x0, 0x0, 0x0],
        '0' => [0xE, 0xA, 0xA, 0xA, 0xE, 0x0],
        '1' => [0x4, 0xC, 0x4, 0x4, 0xE, 0x0],
        '2' => [0xE, 0x2, 0xE, 0x8, 0xE, 0x0],
        '3' => [0xE, 0x2, 0xE, 0x2, 0xE, 0x0],
        '4' => [0xA, 0xA, 0xE, 0x2, 0x2, 0x0],
        '5' => [0xE, 0x8, 0xE, 0x2, 0xE, 0x0],
        '6' => [0xE, 0x8, 0xE, 0xA, 0xE, 0x0],
        '7' => [0xE, 0x2, 0x2, 0x4, 0x4, 0x0],
        '8' => [0xE, 0xA, 0xE, 0xA, 0xE, 0x0],
        '9' => [0xE, 0xA, 0xE, 0x2, 0xE, 0x0],
        'A' => [0xE, 0xA, 0xE, 0xA, 0xA, 0x0],
        'B' => [0xC, 0xA, 0xC, 0xA, 0xC, 0x0],
        'C' => [0xE, 0x8, 0x8, 0x8, 0xE, 0x0],
        'D' => [0xC, 0xA, 0xA, 0xA, 0xC, 0x0],
        'E' => [0xE, 0x8, 0xE, 0x8, 0xE, 0x0],
        'F' => [0xE, 0x8, 0xE, 0x8, 0x8, 0x0],
        'G' => [0xE, 0x8, 0xA, 0xA, 0xE, 0x0],
        'H' => [0xA, 0xA, 0xE, 0xA, 0xA, 0x0],
        'I' => [0xE, 0x4, 0x4, 0x4, 0xE, 0x0],
        'J' => [0x2, 0x2, 0x2, 0xA, 0xE, 0x0],
        'K' => [0xA, 0xA, 0xC, 0xA, 0xA, 0x0],
        'L' => [0x8, 0x8, 0x8, 0x8, 0xE, 0x0],
        'M' => [0xA, 0xE, 0xE, 0xA, 0xA, 0x0],
        'N' => [0xC, 0xA, 0xA, 0xA, 0xA, 0x0],
        'O' => [0xE, 0xA, 0xA, 0xA, 0xE, 0x0],
        'P' => [0xE, 0xA, 0xE, 0x8, 0x8, 0x0],
        'Q' => [0xE, 0xA, 0xA, 0xE, 0x2, 0x0],
        'R' => [0xE, 0xA, 0xC, 0xA, 0xA, 0x0],
        'S' => [0xE, 0x8, 0xE, 0x2, 0xE, 0x0],
        'T' => [0xE, 0x4, 0x4, 0x4, 0x4, 0x0],
        'U' => [0xA, 0xA, 0xA, 0xA, 0xE, 0x0],
        'V' => [0xA, 0xA, 0xA, 0xA, 0x4, 0x0],
        'W' => [0xA, 0xA, 0xE, 0xE, 0xA, 0x0],
        'X' => [0xA, 0xA, 0x4, 0xA, 0xA, 0x0],
        'Y' => [0xA, 0xA, 0x4, 0x4, 0x4, 0x0],
        'Z' => [0xE, 0x2, 0x4, 0x8, 0xE, 0x0],
        '-' => [0x0, 0x0, 0xE, 0x0, 0x0, 0x0],
        '.' => [0x0, 0x0, 0x0, 0x0, 0x4, 0x0],
        ',' => [0x0, 0x0, 0x0, 0x4, 0x8, 0x0],
        '!' => [0x4, 0x4, 0x4, 0x0, 0x4, 0x0],
        '%' => [0xA, 0x2, 0x4, 0x8, 0xA, 0x0],
        '\'' => [0x4, 0x4, 0x0, 0x0, 0x0, 0x0],
        '(' => [0x4, 0x8, 0x8, 0x8, 0x4, 0x0],
        ')' => [0x4, 0x2, 0x2, 0x2, 0x4, 0x0],
        ':' => [0x0, 0x4, 0x0, 0x4, 0x0, 0x0],
        _ => MISSING,
    }
}
