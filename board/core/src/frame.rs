//! Frame Composition
//!
//! An owned RGB pixel grid at the panel's fixed resolution, with the drawing
//! primitives the render machine needs: rectangle fill/outline, icon blits,
//! and scaled bitmap text. A frame has no identity beyond the tick that drew
//! it; the machine builds one, hands it to the display boundary, and drops it.
//!
//! All operations clip at the frame edge rather than erroring - the layout
//! tables keep everything on-panel, but overlay text with a negative anchor
//! offset may legitimately start left of a quadrant.

use crate::color::Rgb;
use crate::font;
use crate::layout::{Rect, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// One composed panel image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<Rgb>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Create a black frame at panel resolution
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb::BLACK; (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize],
        }
    }

    /// Panel width in pixels
    pub const fn width(&self) -> i32 {
        DISPLAY_WIDTH
    }

    /// Panel height in pixels
    pub const fn height(&self) -> i32 {
        DISPLAY_HEIGHT
    }

    /// Reset every pixel to black
    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    /// Set a single pixel; off-panel coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && x < DISPLAY_WIDTH && y >= 0 && y < DISPLAY_HEIGHT {
            self.pixels[(y * DISPLAY_WIDTH + x) as usize] = color;
        }
    }

    /// Read a single pixel; off-panel coordinates read black
    pub fn pixel(&self, x: i32, y: i32) -> Rgb {
        if x >= 0 && x < DISPLAY_WIDTH && y >= 0 && y < DISPLAY_HEIGHT {
            self.pixels[(y * DISPLAY_WIDTH + x) as usize]
        } else {
            Rgb::BLACK
        }
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Draw a one-pixel rectangle outline
    pub fn outline_rect(&mut self, rect: &Rect, color: Rgb) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        for x in rect.x..rect.right() {
            self.set_pixel(x, rect.y, color);
            self.set_pixel(x, rect.bottom() - 1, color);
        }
        for y in rect.y..rect.bottom() {
            self.set_pixel(rect.x, y, color);
            self.set_pixel(rect.right() - 1, y, color);
        }
    }

    /// Draw a filled box with an outline: interior in `fill`, border in
    /// `outline`
    pub fn box_with_outline(&mut self, rect: &Rect, fill: Rgb, outline: Rgb) {
        self.fill_rect(rect, fill);
        self.outline_rect(rect, outline);
    }

    /// Paste raw pixels at an origin (used for icons)
    pub fn blit(&mut self, origin: (i32, i32), width: u32, pixels: &[Rgb]) {
        if width == 0 {
            return;
        }
        for (i, color) in pixels.iter().enumerate() {
            let dx = (i as u32 % width) as i32;
            let dy = (i as u32 / width) as i32;
            self.set_pixel(origin.0 + dx, origin.1 + dy, *color);
        }
    }

    /// Draw text with the built-in 4x6 face at an integer scale
    ///
    /// Returns the x coordinate just past the last cell drawn.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Rgb) -> i32 {
        let scale = scale.max(1) as i32;
        let mut pen_x = x;
        for c in text.chars() {
            let rows = font::glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH as i32 {
                    if bits & (0x8 >> col) != 0 {
                        // One font pixel becomes a scale x scale block
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    pen_x + col * scale + sx,
                                    y + row as i32 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            pen_x += font::GLYPH_WIDTH as i32 * scale;
        }
        pen_x
    }
}
