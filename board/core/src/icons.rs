//! Character Icons
//!
//! Icon pixels live behind the [`IconSource`] trait: how icons get from
//! storage into memory is an external concern (PNG decoding, embedded
//! assets, a network cache - the board does not care). The render machine
//! asks for a key, and a missing icon substitutes the default rather than
//! failing a frame.

use crate::color::{IconKey, Rgb};

/// Edge length icons are authored at; layouts scale down from here
pub const NATIVE_ICON_SIZE: u32 = 24;

/// An owned square icon bitmap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    /// Edge length in pixels
    pub size: u32,
    /// Row-major pixels, `size * size` entries
    pub pixels: Vec<Rgb>,
}

impl Icon {
    /// Build an icon from row-major pixels
    ///
    /// Returns `None` when the pixel count is not `size * size`.
    pub fn from_pixels(size: u32, pixels: Vec<Rgb>) -> Option<Self> {
        if pixels.len() == (size * size) as usize {
            Some(Self { size, pixels })
        } else {
            None
        }
    }

    /// Build a solid-color icon
    pub fn solid(size: u32, color: Rgb) -> Self {
        Self {
            size,
            pixels: vec![color; (size * size) as usize],
        }
    }

    /// Nearest-neighbor resize to a new edge length
    pub fn resized(&self, size: u32) -> Icon {
        if size == self.size || self.size == 0 {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            let sy = y * self.size / size;
            for x in 0..size {
                let sx = x * self.size / size;
                pixels.push(self.pixels[(sy * self.size + sx) as usize]);
            }
        }
        Icon { size, pixels }
    }
}

/// Provider of icon pixels by key
pub trait IconSource: Send + Sync {
    /// Fetch the icon for a key, `None` when the asset is missing
    fn icon(&self, key: &IconKey) -> Option<Icon>;
}

/// The stand-in drawn when an icon asset is missing
///
/// A magenta/black checker, unmistakable on the panel without being garish
/// at 13px.
pub fn default_icon() -> Icon {
    let magenta = Rgb(180, 0, 180);
    let mut pixels = Vec::with_capacity((NATIVE_ICON_SIZE * NATIVE_ICON_SIZE) as usize);
    for y in 0..NATIVE_ICON_SIZE {
        for x in 0..NATIVE_ICON_SIZE {
            if (x / 4 + y / 4) % 2 == 0 {
                pixels.push(magenta);
            } else {
                pixels.push(Rgb::BLACK);
            }
        }
    }
    Icon {
        size: NATIVE_ICON_SIZE,
        pixels,
    }
}

/// Fetch an icon, substituting the default when the asset is missing
pub fn icon_or_default(source: &dyn IconSource, key: &IconKey) -> Icon {
    match source.icon(key) {
        Some(icon) => icon,
        None => {
            tracing::warn!(icon = %key, "Icon asset missing, substituting default");
            default_icon()
        }
    }
}

/// Icon source with no assets at all; every lookup substitutes the default
///
/// Useful headless and in tests, and the fallback when no asset directory
/// is wired up.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIcons;

impl IconSource for NoIcons {
    fn icon(&self, _key: &IconKey) -> Option<Icon> {
        None
    }
}
