//! Scene Drawing
//!
//! Pure frame construction for each render phase. Nothing here touches the
//! store or the display; the machine feeds these functions a snapshot and
//! commits whatever comes back, which keeps every scene testable as plain
//! pixels.

use super::RenderError;
use crate::color::{team_color, Rgb};
use crate::config::ColorConfig;
use crate::icons::{icon_or_default, IconSource};
use crate::frame::Frame;
use crate::layout::{
    layout_for, percent_anchor_x, stage_anchor_x, LayoutSpec, Rect, GRID_OUTLINES,
};
use crate::state::MatchState;

/// Grow-animation step count for the splash mark
pub const SPLASH_GROW_STEPS: u32 = 30;

/// Fade-in step count for the splash title
pub const SPLASH_FADE_STEPS: u32 = 25;

/// Total splash steps
pub const SPLASH_TOTAL_STEPS: u32 = SPLASH_GROW_STEPS + SPLASH_FADE_STEPS;

/// The idle ellipsis cycle
const ELLIPSIS: [&str; 4] = ["", ".", "..", "..."];

/// Look up the layout for a snapshot
pub(super) fn snapshot_layout(snapshot: &MatchState) -> Result<&'static LayoutSpec, RenderError> {
    layout_for(snapshot.player_count(), snapshot.grid_view).ok_or(RenderError::NoLayout {
        player_count: snapshot.player_count(),
        grid_mode: snapshot.grid_view,
    })
}

/// Draw one step of the waiting animation
pub fn draw_waiting(frame: &mut Frame, step: usize) {
    frame.clear();
    let ellipsis = ELLIPSIS[step % ELLIPSIS.len()];
    frame.draw_text(14, 23, "Waiting", 1, Rgb::WHITE);
    frame.draw_text(5, 31, &format!("for game{ellipsis}"), 1, Rgb::WHITE);
}

/// Draw one step of the boot splash
///
/// Steps `0..SPLASH_GROW_STEPS` grow a diamond mark from the panel center;
/// the remaining steps fade the title text in under the full-size mark.
pub fn draw_splash(frame: &mut Frame, step: u32) {
    frame.clear();
    let size = step.min(SPLASH_GROW_STEPS) as i32;
    draw_diamond(frame, (32, 22), size, Rgb::WHITE);

    if step >= SPLASH_GROW_STEPS {
        let fade = (step - SPLASH_GROW_STEPS + 1) * 10;
        let val = fade.min(255) as u8;
        let title = "Stockboard";
        frame.draw_text(stage_anchor_x(title), 50, title, 1, Rgb(val, val, val));
    }
}

/// A filled diamond (rotated square) centered on a point
fn draw_diamond(frame: &mut Frame, center: (i32, i32), radius: i32, color: Rgb) {
    for dy in -radius..=radius {
        let half = radius - dy.abs();
        for dx in -half..=half {
            frame.set_pixel(center.0 + dx, center.1 + dy, color);
        }
    }
}

/// Build the static background layer for a starting match
///
/// Everything that does not change during the match: borders, per-seat
/// background fills, character icons scaled to the layout, and the stage
/// name. Built once per match because it is expensive next to the overlay.
pub fn build_background(
    snapshot: &MatchState,
    colors: &ColorConfig,
    icons: &dyn IconSource,
) -> Result<Frame, RenderError> {
    let layout = snapshot_layout(snapshot)?;
    let grid = snapshot.player_count() == 4 && snapshot.grid_view;
    let mut frame = Frame::new();

    if !grid && colors.borders_active {
        let border = Rgb::from(colors.borders_rgb);
        for rect in layout.borders {
            frame.outline_rect(rect, border);
        }
    }

    for (position, (_, slot)) in snapshot.seats_in_arrival_order().enumerate() {
        let seat = &layout.seats[position];

        if grid {
            // Each quadrant gets an outline in the seat color and a filled
            // name-plate corner behind the stock boxes.
            frame.outline_rect(&GRID_OUTLINES[position], slot.background);
        }
        if colors.backgrounds_active {
            frame.fill_rect(&seat.fill, slot.background);
        }

        let icon = icon_or_default(icons, &slot.icon).resized(seat.icon_size);
        frame.blit(seat.icon_origin, icon.size, &icon.pixels);
    }

    frame.draw_text(
        snapshot.stage.anchor_x,
        layout.stage_y,
        &snapshot.stage.name,
        1,
        Rgb::WHITE,
    );

    Ok(frame)
}

/// Draw the per-tick overlay onto a copy of the cached background
///
/// Stock boxes - foreground fill while the stock is still there, background
/// fill once it is gone, outline always foreground - and the damage text at
/// the seat's percent anchor.
pub fn draw_overlay(frame: &mut Frame, snapshot: &MatchState) -> Result<(), RenderError> {
    let layout = snapshot_layout(snapshot)?;

    for (position, (_, slot)) in snapshot.seats_in_arrival_order().enumerate() {
        let seat = &layout.seats[position];

        for (k, rect) in seat.stocks.iter().enumerate() {
            let filled = slot.stocks >= (k + 1) as u32;
            let fill = if filled { slot.foreground } else { slot.background };
            frame.box_with_outline(rect, fill, slot.foreground);
        }

        let text = slot.damage.to_string();
        let x = percent_anchor_x(text.chars().count()) + seat.percent.dx;
        frame.draw_text(x, seat.percent.y, &text, seat.percent.scale, slot.foreground);
    }

    Ok(())
}

/// Build the postgame winner screen
pub fn draw_postgame(snapshot: &MatchState, icons: &dyn IconSource) -> Frame {
    let mut frame = Frame::new();
    let winner_slot = snapshot.winner.and_then(|w| snapshot.slot(w));

    let label = match (snapshot.is_teams, snapshot.winner, winner_slot) {
        (true, Some(_), Some(slot)) => {
            // Team banner color comes from the fixed team table, not the
            // seat's customizable background.
            let banner = team_color(&slot.variant);
            frame.fill_rect(&Rect::new(19, 7, 24, 24), banner);
            format!("{} Team", slot.variant)
        }
        (false, Some(winner), Some(slot)) => {
            let icon = icon_or_default(icons, &slot.icon);
            frame.blit((19, 7), icon.size, &icon.pixels);
            format!("{} (P{})", slot.character, winner + 1)
        }
        _ => "No Contest".to_string(),
    };

    if winner_slot.is_some() {
        frame.draw_text(4, 32, "Winner!", 2, Rgb::WHITE);
    }
    frame.draw_text(stage_anchor_x(&label), 47, &label, 1, Rgb::WHITE);
    frame
}
