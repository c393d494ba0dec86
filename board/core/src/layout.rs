//! Layout Table
//!
//! Pure placement data: a function from (player count, grid mode) to the set
//! of per-seat regions on the 64x64 panel, plus the text-anchoring helpers.
//!
//! # Arrival order, not slot index
//!
//! Regions are indexed by the order players appeared in the match-start
//! event. The first player listed always takes region 0 (top band / top-left
//! quadrant) regardless of which physical port they occupy. Which player is
//! *in* a region is the state store's business; this module only says where
//! region N is.
//!
//! Four configurations exist: 2-player stacked halves, 3-player bands with a
//! shrunk icon, 4-player bars with the smallest icon, and a 4-player 2x2 grid
//! with a per-quadrant sub-layout.

/// Panel width in pixels
pub const DISPLAY_WIDTH: i32 = 64;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: i32 = 64;

/// Monospaced cell advance of the stage font, in pixels
pub const STAGE_CHAR_WIDTH: i32 = 4;

/// Longest stage name that still gets centered
pub const STAGE_CENTER_MAX_LEN: usize = 15;

/// An axis-aligned pixel rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the right edge
    pub const fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// One past the bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Whether two rectangles share any pixel
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies fully inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Where a seat's damage text goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PercentAnchor {
    /// Offset added to the length-based base x (varies per grid quadrant)
    pub dx: i32,
    /// Text baseline-top y
    pub y: i32,
    /// Integer font scale (1 = 4x6 cells, 2 = 8x12)
    pub scale: u32,
}

/// Placement of everything belonging to one seat
#[derive(Clone, Copy, Debug)]
pub struct SeatRegion {
    /// The seat's exclusive band/quadrant, used for overlap checks
    pub bounds: Rect,
    /// Where the character icon's top-left corner goes
    pub icon_origin: (i32, i32),
    /// Icon edge length for this layout (icons are square)
    pub icon_size: u32,
    /// Per-seat background fill
    pub fill: Rect,
    /// The four stock-indicator boxes, indexed by stock number - 1
    pub stocks: [Rect; 4],
    /// Damage text anchor
    pub percent: PercentAnchor,
}

/// One complete panel configuration
#[derive(Clone, Copy, Debug)]
pub struct LayoutSpec {
    /// Per-seat regions in arrival order
    pub seats: &'static [SeatRegion],
    /// Divider outlines drawn when borders are enabled
    pub borders: &'static [Rect],
    /// Stage name text y
    pub stage_y: i32,
}

// =============================================================================
// Static configurations
// =============================================================================

static LAYOUT_2P: LayoutSpec = LayoutSpec {
    seats: &[
        SeatRegion {
            bounds: Rect::new(0, 0, 64, 25),
            icon_origin: (1, 1),
            icon_size: 24,
            fill: Rect::new(25, 1, 38, 24),
            stocks: [
                Rect::new(33, 18, 4, 4),
                Rect::new(39, 18, 4, 4),
                Rect::new(45, 18, 4, 4),
                Rect::new(51, 18, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 3, scale: 2 },
        },
        SeatRegion {
            bounds: Rect::new(0, 25, 64, 25),
            icon_origin: (1, 26),
            icon_size: 24,
            fill: Rect::new(25, 26, 38, 24),
            stocks: [
                Rect::new(33, 43, 4, 4),
                Rect::new(39, 43, 4, 4),
                Rect::new(45, 43, 4, 4),
                Rect::new(51, 43, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 28, scale: 2 },
        },
    ],
    borders: &[Rect::new(0, 0, 64, 51), Rect::new(0, 0, 64, 26)],
    stage_y: 54,
};

static LAYOUT_3P: LayoutSpec = LayoutSpec {
    seats: &[
        SeatRegion {
            bounds: Rect::new(0, 0, 64, 17),
            icon_origin: (1, 1),
            icon_size: 16,
            fill: Rect::new(18, 1, 45, 16),
            stocks: [
                Rect::new(32, 12, 3, 3),
                Rect::new(37, 12, 3, 3),
                Rect::new(42, 12, 3, 3),
                Rect::new(47, 12, 3, 3),
            ],
            percent: PercentAnchor { dx: 0, y: 3, scale: 1 },
        },
        SeatRegion {
            bounds: Rect::new(0, 17, 64, 17),
            icon_origin: (1, 18),
            icon_size: 16,
            fill: Rect::new(18, 18, 45, 16),
            stocks: [
                Rect::new(32, 29, 3, 3),
                Rect::new(37, 29, 3, 3),
                Rect::new(42, 29, 3, 3),
                Rect::new(47, 29, 3, 3),
            ],
            percent: PercentAnchor { dx: 0, y: 20, scale: 1 },
        },
        SeatRegion {
            bounds: Rect::new(0, 34, 64, 17),
            icon_origin: (1, 35),
            icon_size: 16,
            fill: Rect::new(18, 35, 45, 16),
            stocks: [
                Rect::new(32, 46, 3, 3),
                Rect::new(37, 46, 3, 3),
                Rect::new(42, 46, 3, 3),
                Rect::new(47, 46, 3, 3),
            ],
            percent: PercentAnchor { dx: 0, y: 37, scale: 1 },
        },
    ],
    borders: &[
        Rect::new(0, 0, 64, 52),
        Rect::new(0, 0, 64, 35),
        Rect::new(0, 0, 64, 18),
    ],
    stage_y: 55,
};

static LAYOUT_4P_BAR: LayoutSpec = LayoutSpec {
    seats: &[
        SeatRegion {
            bounds: Rect::new(0, 0, 64, 14),
            icon_origin: (1, 1),
            icon_size: 13,
            fill: Rect::new(14, 1, 49, 13),
            stocks: [
                Rect::new(16, 3, 4, 4),
                Rect::new(21, 3, 4, 4),
                Rect::new(16, 8, 4, 4),
                Rect::new(21, 8, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 1, scale: 2 },
        },
        SeatRegion {
            bounds: Rect::new(0, 14, 64, 14),
            icon_origin: (1, 15),
            icon_size: 13,
            fill: Rect::new(14, 15, 49, 13),
            stocks: [
                Rect::new(16, 17, 4, 4),
                Rect::new(21, 17, 4, 4),
                Rect::new(16, 22, 4, 4),
                Rect::new(21, 22, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 15, scale: 2 },
        },
        SeatRegion {
            bounds: Rect::new(0, 28, 64, 14),
            icon_origin: (1, 29),
            icon_size: 13,
            fill: Rect::new(14, 29, 49, 13),
            stocks: [
                Rect::new(16, 31, 4, 4),
                Rect::new(21, 31, 4, 4),
                Rect::new(16, 36, 4, 4),
                Rect::new(21, 36, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 29, scale: 2 },
        },
        SeatRegion {
            bounds: Rect::new(0, 42, 64, 14),
            icon_origin: (1, 43),
            icon_size: 13,
            fill: Rect::new(14, 43, 49, 13),
            stocks: [
                Rect::new(16, 45, 4, 4),
                Rect::new(21, 45, 4, 4),
                Rect::new(16, 50, 4, 4),
                Rect::new(21, 50, 4, 4),
            ],
            percent: PercentAnchor { dx: 0, y: 43, scale: 2 },
        },
    ],
    borders: &[
        Rect::new(0, 0, 64, 57),
        Rect::new(0, 0, 64, 43),
        Rect::new(0, 0, 64, 29),
        Rect::new(0, 0, 64, 15),
    ],
    stage_y: 58,
};

// Grid quadrants get an outlined box with a filled name-plate corner instead
// of a full-width fill; percent text shifts per quadrant so it clears the icon.
static LAYOUT_4P_GRID: LayoutSpec = LayoutSpec {
    seats: &[
        SeatRegion {
            bounds: Rect::new(0, 0, 32, 27),
            icon_origin: (2, 2),
            icon_size: 14,
            fill: Rect::new(16, 1, 16, 15),
            stocks: [
                Rect::new(19, 4, 4, 4),
                Rect::new(25, 4, 4, 4),
                Rect::new(19, 10, 4, 4),
                Rect::new(25, 10, 4, 4),
            ],
            percent: PercentAnchor { dx: -25, y: 16, scale: 1 },
        },
        SeatRegion {
            bounds: Rect::new(32, 0, 32, 27),
            icon_origin: (33, 2),
            icon_size: 14,
            fill: Rect::new(47, 1, 16, 15),
            stocks: [
                Rect::new(50, 4, 4, 4),
                Rect::new(56, 4, 4, 4),
                Rect::new(50, 10, 4, 4),
                Rect::new(56, 10, 4, 4),
            ],
            percent: PercentAnchor { dx: 6, y: 16, scale: 1 },
        },
        SeatRegion {
            bounds: Rect::new(0, 27, 32, 27),
            icon_origin: (2, 29),
            icon_size: 14,
            fill: Rect::new(16, 28, 16, 15),
            stocks: [
                Rect::new(19, 31, 4, 4),
                Rect::new(25, 31, 4, 4),
                Rect::new(19, 37, 4, 4),
                Rect::new(25, 37, 4, 4),
            ],
            percent: PercentAnchor { dx: -25, y: 43, scale: 1 },
        },
        SeatRegion {
            bounds: Rect::new(32, 27, 32, 27),
            icon_origin: (33, 29),
            icon_size: 14,
            fill: Rect::new(47, 28, 16, 15),
            stocks: [
                Rect::new(50, 31, 4, 4),
                Rect::new(56, 31, 4, 4),
                Rect::new(50, 37, 4, 4),
                Rect::new(56, 37, 4, 4),
            ],
            percent: PercentAnchor { dx: 6, y: 43, scale: 1 },
        },
    ],
    borders: &[],
    stage_y: 56,
};

/// Quadrant outlines for the grid layout, one per seat position
///
/// Drawn in the seat's background color (the grid has no global borders).
pub static GRID_OUTLINES: [Rect; 4] = [
    Rect::new(1, 1, 31, 26),
    Rect::new(32, 1, 31, 26),
    Rect::new(1, 28, 31, 26),
    Rect::new(32, 28, 31, 26),
];

/// Look up the layout for a player count and grid-mode flag
///
/// Returns `None` for player counts outside 2..=4; grid mode is only
/// meaningful at four players.
pub fn layout_for(player_count: usize, grid_mode: bool) -> Option<&'static LayoutSpec> {
    match (player_count, grid_mode) {
        (2, _) => Some(&LAYOUT_2P),
        (3, _) => Some(&LAYOUT_3P),
        (4, false) => Some(&LAYOUT_4P_BAR),
        (4, true) => Some(&LAYOUT_4P_GRID),
        _ => None,
    }
}

// =============================================================================
// Text anchoring
// =============================================================================

/// Known long stage names and their shortened display forms
const STAGE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Mushroom Kingdom", "Mushroom King."),
    ("Mushroom Kingdom II", "Mushroom K. II"),
    ("Final Destination", "Final Dest."),
    ("Fountain of Dreams", "Fountain of Dr."),
    ("Princess Peach's Castle", "Peach's Castle"),
];

/// Shorten a known long stage name, pass anything else through
pub fn abbreviate_stage(name: &str) -> &str {
    STAGE_ABBREVIATIONS
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// X anchor for centered stage-font text
///
/// Names up to [`STAGE_CENTER_MAX_LEN`] characters are centered on the panel
/// at 4px per character; longer names left-anchor at 0.
pub fn stage_anchor_x(text: &str) -> i32 {
    let len = text.chars().count();
    if len <= STAGE_CENTER_MAX_LEN {
        (DISPLAY_WIDTH - STAGE_CHAR_WIDTH * len as i32) / 2
    } else {
        0
    }
}

/// Base x for damage text, by rendered string length
///
/// Tuned for right-ish alignment inside the seat fill: "-" sits at 40,
/// "0%" at 37, "10%" at 34, "100%" and anything longer at 30. A region's
/// `PercentAnchor::dx` is added on top.
pub fn percent_anchor_x(len: usize) -> i32 {
    match len {
        0 | 1 => 40,
        2 => 37,
        3 => 34,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DISPLAY: Rect = Rect::new(0, 0, 64, 64);

    fn all_layouts() -> Vec<(&'static str, &'static LayoutSpec, usize)> {
        vec![
            ("2p", layout_for(2, false).unwrap(), 2),
            ("2p-grid-flag", layout_for(2, true).unwrap(), 2),
            ("3p", layout_for(3, false).unwrap(), 3),
            ("4p-bar", layout_for(4, false).unwrap(), 4),
            ("4p-grid", layout_for(4, true).unwrap(), 4),
        ]
    }

    #[test]
    fn seat_counts_match_player_counts() {
        for (name, layout, count) in all_layouts() {
            assert_eq!(layout.seats.len(), count, "layout {name}");
        }
    }

    #[test]
    fn seat_bounds_do_not_overlap() {
        for (name, layout, _) in all_layouts() {
            for (i, a) in layout.seats.iter().enumerate() {
                for (j, b) in layout.seats.iter().enumerate().skip(i + 1) {
                    assert!(
                        !a.bounds.intersects(&b.bounds),
                        "layout {name}: seats {i} and {j} overlap"
                    );
                }
            }
        }
    }

    #[test]
    fn everything_stays_on_the_panel() {
        for (name, layout, _) in all_layouts() {
            for (i, seat) in layout.seats.iter().enumerate() {
                assert!(
                    DISPLAY.contains(&seat.bounds),
                    "layout {name} seat {i}: bounds off-panel"
                );
                assert!(
                    DISPLAY.contains(&seat.fill),
                    "layout {name} seat {i}: fill off-panel"
                );
                let icon = Rect::new(
                    seat.icon_origin.0,
                    seat.icon_origin.1,
                    seat.icon_size,
                    seat.icon_size,
                );
                assert!(
                    DISPLAY.contains(&icon),
                    "layout {name} seat {i}: icon off-panel"
                );
                for (k, stock) in seat.stocks.iter().enumerate() {
                    assert!(
                        DISPLAY.contains(stock),
                        "layout {name} seat {i}: stock box {k} off-panel"
                    );
                }
            }
            for border in layout.borders {
                assert!(DISPLAY.contains(border), "layout {name}: border off-panel");
            }
        }
    }

    #[test]
    fn stock_boxes_sit_inside_their_seat_band() {
        for (name, layout, _) in all_layouts() {
            for (i, seat) in layout.seats.iter().enumerate() {
                for stock in &seat.stocks {
                    assert!(
                        seat.bounds.contains(stock),
                        "layout {name} seat {i}: stock box escapes band"
                    );
                }
            }
        }
    }

    #[test]
    fn unsupported_player_counts_have_no_layout() {
        assert!(layout_for(0, false).is_none());
        assert!(layout_for(1, false).is_none());
        assert!(layout_for(5, true).is_none());
    }

    #[test]
    fn stage_anchor_centers_short_names() {
        // Length 10 on a 64-wide panel: (64 - 40) / 2 = 12
        assert_eq!(stage_anchor_x("Battlefiel"), 12);
        assert_eq!(stage_anchor_x(""), 32);
    }

    #[test]
    fn stage_anchor_left_aligns_long_names() {
        assert_eq!(stage_anchor_x("A Very Long Stage Name"), 0);
    }

    #[test]
    fn known_stages_are_abbreviated_before_measuring() {
        let short = abbreviate_stage("Final Destination");
        assert_eq!(short, "Final Dest.");
        assert!(short.chars().count() <= STAGE_CENTER_MAX_LEN);
        assert_eq!(abbreviate_stage("Battlefield"), "Battlefield");
    }

    #[test]
    fn percent_anchor_shrinks_with_length() {
        assert_eq!(percent_anchor_x("-".len()), 40);
        assert_eq!(percent_anchor_x("0%".len()), 37);
        assert_eq!(percent_anchor_x("10%".len()), 34);
        assert_eq!(percent_anchor_x("100%".len()), 30);
        assert_eq!(percent_anchor_x("999%".len()), 30);
    }

    #[test]
    fn grid_percent_offsets_are_keyed_by_quadrant() {
        let grid = layout_for(4, true).unwrap();
        // Left quadrants pull text left, right quadrants push it right.
        assert_eq!(grid.seats[0].percent.dx, -25);
        assert_eq!(grid.seats[1].percent.dx, 6);
        assert_eq!(grid.seats[2].percent.dx, -25);
        assert_eq!(grid.seats[3].percent.dx, 6);
    }
}
