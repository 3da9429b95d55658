//! Abstract geometry types for the panel canvas.
//!
//! All coordinates are logical panel units. The device renders a fixed
//! [`CANVAS_WIDTH`] x [`CANVAS_HEIGHT`] canvas and every stored rectangle is
//! aligned to [`GRID`].

use serde::{Deserialize, Serialize};

/// Grid pitch in logical units.
pub const GRID: i32 = 10;

/// Logical canvas width of the panel.
pub const CANVAS_WIDTH: i32 = 720;

/// Logical canvas height of the panel.
pub const CANVAS_HEIGHT: i32 = 600;

/// Snaps a value to the nearest grid line, rounding halves upwards.
///
/// Saturates at the ends of the `i32` range.
pub const fn snap(value: i32) -> i32 {
	value.saturating_add(GRID / 2).div_euclid(GRID).saturating_mul(GRID)
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `min > max` the upper bound
/// wins.
pub fn clamp_to(value: i32, min: i32, max: i32) -> i32 {
	value.max(min).min(max)
}

/// A widget rectangle with position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	pub x: i32,
	pub y: i32,
	pub w: i32,
	pub h: i32,
}

impl Rect {
	/// Creates a new rectangle.
	pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
		Self { x, y, w, h }
	}

	/// Returns the right edge x coordinate (exclusive).
	pub const fn right(&self) -> i32 {
		self.x.saturating_add(self.w)
	}

	/// Returns the bottom edge y coordinate (exclusive).
	pub const fn bottom(&self) -> i32 {
		self.y.saturating_add(self.h)
	}

	/// Returns true if the rectangle has zero area.
	pub const fn is_empty(&self) -> bool {
		self.w <= 0 || self.h <= 0
	}

	/// Returns true if every component sits on a grid line.
	pub const fn is_grid_aligned(&self) -> bool {
		self.x % GRID == 0 && self.y % GRID == 0 && self.w % GRID == 0 && self.h % GRID == 0
	}

	/// Returns true if the rectangle lies entirely within the canvas.
	pub const fn fits_canvas(&self) -> bool {
		self.x >= 0 && self.y >= 0 && self.right() <= CANVAS_WIDTH && self.bottom() <= CANVAS_HEIGHT
	}

	/// Returns true if `pos` falls inside the rectangle.
	///
	/// The origin edge is inclusive, the far edge exclusive.
	pub const fn contains(&self, pos: PointerPosition) -> bool {
		pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
	}
}

/// Pointer position in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerPosition {
	pub x: i32,
	pub y: i32,
}

impl PointerPosition {
	/// Creates a new pointer position.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}

	/// Returns the `(dx, dy)` offset of this position from `origin`.
	pub const fn delta_from(self, origin: PointerPosition) -> (i32, i32) {
		(self.x.saturating_sub(origin.x), self.y.saturating_sub(origin.y))
	}
}
