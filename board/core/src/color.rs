//! Color and Identity Resolution
//!
//! Maps a (character, color-variant) pair to the foreground/background colors
//! and the icon key used everywhere downstream. Resolution happens once per
//! player at match start; the render side only ever sees the resolved values.
//!
//! # Precedence
//!
//! Foreground: custom per-pair override (if enabled) else a fixed default.
//! Background, first match wins:
//! 1. backgrounds disabled globally, or the variant has no visible background
//! 2. custom per-pair override (if enabled)
//! 3. static variant table (generic colors + a few character-specific names)
//! 4. otherwise black

use serde::{Deserialize, Serialize};

use crate::config::ColorConfig;

/// An RGB triple as it goes to the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure black (also the "no visible background" color)
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Pure white (text)
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Rgb(v[0], v[1], v[2])
    }
}

/// Default foreground when no custom override applies
pub const DEFAULT_FOREGROUND: Rgb = Rgb(255, 255, 0);

/// Neutral fallback when a team color is not in the team table
pub const NEUTRAL_GRAY: Rgb = Rgb(130, 130, 130);

/// Variants that render without a visible background
const NO_BACKGROUND_VARIANTS: &[&str] = &["Default", "Black"];

/// Static variant -> background color table
///
/// Generic costume colors plus the handful of character-specific variant
/// names that have their own entries.
const VARIANT_TABLE: &[(&str, Rgb)] = &[
    ("Red", Rgb(102, 0, 0)),
    ("Blue", Rgb(102, 102, 255)),
    ("Green", Rgb(0, 153, 56)),
    ("White", Rgb(130, 130, 130)),
    ("Yellow", Rgb(117, 106, 45)),
    ("Purple", Rgb(37, 12, 46)),
    // Pikachu-specific
    ("Party Hat", Rgb(102, 102, 255)),
    ("Cowboy Hat", Rgb(0, 153, 56)),
    // Jigglypuff-specific
    ("Crown", Rgb(252, 186, 3)),
    ("Headband", Rgb(7, 125, 94)),
];

/// Team color table for the postgame banner
///
/// Kept separate from the variant table on purpose: the variant background
/// is user-customizable, the team banner color is not.
const TEAM_TABLE: &[(&str, Rgb)] = &[
    ("Red", Rgb(102, 0, 0)),
    ("Blue", Rgb(102, 102, 255)),
    ("Green", Rgb(0, 153, 56)),
];

/// Key identifying one character icon, `<character>-<variant>` lowercased
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconKey(pub String);

impl IconKey {
    /// Build the key for a character/variant pair
    pub fn new(character: &str, variant: &str) -> Self {
        IconKey(format!(
            "{}-{}",
            character.to_lowercase(),
            variant.to_lowercase()
        ))
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the renderer needs to know about one player's identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Text and stock-box fill color
    pub foreground: Rgb,
    /// Seat background fill color
    pub background: Rgb,
    /// Icon lookup key
    pub icon: IconKey,
}

/// Resolves (character, variant) pairs against the loaded color configuration
#[derive(Clone, Debug)]
pub struct Resolver {
    colors: ColorConfig,
}

impl Resolver {
    /// Create a resolver over the startup color configuration
    pub fn new(colors: ColorConfig) -> Self {
        Self { colors }
    }

    /// Resolve the colors and icon key for one player
    pub fn resolve(&self, character: &str, variant: &str) -> ResolvedIdentity {
        let pairing = format!("{}-{}", character.to_lowercase(), variant.to_lowercase());

        let foreground = if self.colors.custom_foregrounds_active {
            self.colors
                .custom_char_fgs
                .get(&pairing)
                .map(|v| Rgb::from(*v))
                .unwrap_or(DEFAULT_FOREGROUND)
        } else {
            DEFAULT_FOREGROUND
        };

        let background = if !self.colors.backgrounds_active
            || NO_BACKGROUND_VARIANTS.contains(&variant)
        {
            Rgb::BLACK
        } else if self.colors.custom_backgrounds_active {
            match self.colors.custom_char_bgs.get(&pairing) {
                Some(v) => Rgb::from(*v),
                None => variant_background(variant),
            }
        } else {
            variant_background(variant)
        };

        ResolvedIdentity {
            foreground,
            background,
            icon: IconKey::new(character, variant),
        }
    }
}

/// Static table lookup; a variant with no entry renders on black
fn variant_background(variant: &str) -> Rgb {
    VARIANT_TABLE
        .iter()
        .find(|(name, _)| *name == variant)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(Rgb::BLACK)
}

/// Team banner color for a variant name, neutral gray when unknown
pub fn team_color(variant: &str) -> Rgb {
    TEAM_TABLE
        .iter()
        .find(|(name, _)| *name == variant)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(NEUTRAL_GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_colors() -> ColorConfig {
        ColorConfig::default()
    }

    #[test]
    fn default_foreground_when_no_override() {
        let resolver = Resolver::new(base_colors());
        let id = resolver.resolve("Fox", "Red");
        assert_eq!(id.foreground, DEFAULT_FOREGROUND);
        assert_eq!(id.background, Rgb(102, 0, 0));
    }

    #[test]
    fn custom_override_beats_variant_table() {
        let mut colors = base_colors();
        colors.custom_backgrounds_active = true;
        colors
            .custom_char_bgs
            .insert("fox-red".to_string(), [10, 20, 30]);
        let resolver = Resolver::new(colors);

        // "Red" is in the static table too; the override must win.
        let id = resolver.resolve("Fox", "Red");
        assert_eq!(id.background, Rgb(10, 20, 30));
    }

    #[test]
    fn override_ignored_when_disabled() {
        let mut colors = base_colors();
        colors.custom_foregrounds_active = false;
        colors
            .custom_char_fgs
            .insert("fox-red".to_string(), [1, 2, 3]);
        let resolver = Resolver::new(colors);
        assert_eq!(resolver.resolve("Fox", "Red").foreground, DEFAULT_FOREGROUND);
    }

    #[test]
    fn default_variant_has_no_background() {
        let mut colors = base_colors();
        colors.custom_backgrounds_active = true;
        colors
            .custom_char_bgs
            .insert("fox-default".to_string(), [9, 9, 9]);
        let resolver = Resolver::new(colors);

        // The no-visible-background set wins over any override.
        assert_eq!(resolver.resolve("Fox", "Default").background, Rgb::BLACK);
    }

    #[test]
    fn globally_disabled_backgrounds_render_black() {
        let mut colors = base_colors();
        colors.backgrounds_active = false;
        let resolver = Resolver::new(colors);
        assert_eq!(resolver.resolve("Marth", "Green").background, Rgb::BLACK);
    }

    #[test]
    fn unknown_variant_falls_back_to_black() {
        let resolver = Resolver::new(base_colors());
        assert_eq!(resolver.resolve("Fox", "Chartreuse").background, Rgb::BLACK);
    }

    #[test]
    fn character_specific_variants_resolve() {
        let resolver = Resolver::new(base_colors());
        assert_eq!(
            resolver.resolve("Pikachu", "Party Hat").background,
            Rgb(102, 102, 255)
        );
        assert_eq!(
            resolver.resolve("Jigglypuff", "Crown").background,
            Rgb(252, 186, 3)
        );
    }

    #[test]
    fn icon_key_is_lowercased_pair() {
        assert_eq!(
            IconKey::new("Pikachu", "Party Hat"),
            IconKey("pikachu-party hat".to_string())
        );
    }

    #[test]
    fn team_colors() {
        assert_eq!(team_color("Blue"), Rgb(102, 102, 255));
        assert_eq!(team_color("Magenta"), NEUTRAL_GRAY);
    }
}
