//! Footprint clamping and gesture geometry.
//!
//! # Invariants
//!
//! Every rect produced here is grid-aligned, lies inside the canvas and has
//! a size within the widget type's [`SizeLimits`]. Clamping is idempotent:
//! `clamp_rect(clamp_rect(r, t), t) == clamp_rect(r, t)`.
//!
//! Inverted bounds never panic; the upper bound wins (see [`clamp_to`]).

use panelkit_primitives::loose::to_rounded_i32;
use panelkit_primitives::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID, Rect, clamp_to, snap};
use panelkit_registry::{SizeLimits, WidgetType};

pub mod drag;

/// Clamps `rect` into the legal footprint of `kind`.
pub fn clamp_rect(rect: Rect, kind: WidgetType) -> Rect {
	clamp_rect_with(rect, kind.size_limits())
}

/// Clamps `rect` against explicit limits.
///
/// A zero width or height means "unset" and takes the minimum.
pub fn clamp_rect_with(rect: Rect, limits: SizeLimits) -> Rect {
	let w = if rect.w == 0 { limits.min_w } else { rect.w };
	let h = if rect.h == 0 { limits.min_h } else { rect.h };
	let w = clamp_to(snap(w), limits.min_w, limits.max_w);
	let h = clamp_to(snap(h), limits.min_h, limits.max_h);
	let x = clamp_to(snap(rect.x), 0, CANVAS_WIDTH - w);
	let y = clamp_to(snap(rect.y), 0, CANVAS_HEIGHT - h);
	Rect::new(x, y, w, h)
}

/// Snaps a loose numeric value to the grid, or `None` when it is not finite.
///
/// Rounds `value / GRID` half-up before scaling back, so `14.6` snaps to
/// `10` rather than to `20`.
pub fn snap_number(value: f64) -> Option<i32> {
	to_rounded_i32(value / f64::from(GRID)).map(|cells| cells.saturating_mul(GRID))
}

/// Moves `start` by a pointer delta, keeping its size.
pub fn dragged(start: Rect, dx: i32, dy: i32) -> Rect {
	let x = clamp_to(snap(start.x.saturating_add(dx)), 0, CANVAS_WIDTH - start.w);
	let y = clamp_to(snap(start.y.saturating_add(dy)), 0, CANVAS_HEIGHT - start.h);
	Rect::new(x, y, start.w, start.h)
}

/// Grows or shrinks `start` by a pointer delta, keeping its origin.
///
/// The far edge may not cross the canvas border, so the effective maximum is
/// the smaller of the type maximum and the space left after the origin.
pub fn resized(start: Rect, dx: i32, dy: i32, limits: SizeLimits) -> Rect {
	let max_w = limits.max_w.min(CANVAS_WIDTH - start.x);
	let max_h = limits.max_h.min(CANVAS_HEIGHT - start.y);
	let w = clamp_to(snap(start.w.saturating_add(dx)), limits.min_w, max_w);
	let h = clamp_to(snap(start.h.saturating_add(dy)), limits.min_h, max_h);
	Rect::new(start.x, start.y, w, h)
}
