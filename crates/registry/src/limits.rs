//! Per-type footprint limits.

use panelkit_primitives::{CANVAS_HEIGHT, CANVAS_WIDTH};
use serde::Serialize;

use crate::widget::WidgetType;

/// Smallest edge any widget may have when its type is not known.
pub const MIN_WIDGET_SIZE: i32 = 60;

/// Inclusive size bounds for one widget type.
///
/// Values returned by the constructors are already capped by the canvas,
/// so `min_w <= max_w <= CANVAS_WIDTH` and `min_h <= max_h <= CANVAS_HEIGHT`
/// always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SizeLimits {
	pub min_w: i32,
	pub min_h: i32,
	pub max_w: i32,
	pub max_h: i32,
}

impl SizeLimits {
	/// Limits applied to names outside the registry.
	pub const FALLBACK: SizeLimits = SizeLimits::capped(MIN_WIDGET_SIZE, MIN_WIDGET_SIZE, CANVAS_WIDTH, CANVAS_HEIGHT);

	/// Builds limits from raw table values, capping them by the canvas.
	pub const fn capped(min_w: i32, min_h: i32, max_w: i32, max_h: i32) -> Self {
		let max_w = if max_w < CANVAS_WIDTH { max_w } else { CANVAS_WIDTH };
		let max_h = if max_h < CANVAS_HEIGHT { max_h } else { CANVAS_HEIGHT };
		Self {
			min_w: if min_w < max_w { min_w } else { max_w },
			min_h: if min_h < max_h { min_h } else { max_h },
			max_w,
			max_h,
		}
	}

	/// Returns the limits for a registered type.
	pub const fn for_type(kind: WidgetType) -> Self {
		match kind {
			WidgetType::Sensor => Self::capped(120, 80, CANVAS_WIDTH, CANVAS_HEIGHT),
			WidgetType::Button => Self::capped(100, 100, 480, 320),
			WidgetType::Slider => Self::capped(100, 100, CANVAS_WIDTH, CANVAS_HEIGHT),
			WidgetType::Graph => Self::capped(220, 140, CANVAS_WIDTH, CANVAS_HEIGHT),
			WidgetType::EmptyTile => Self::capped(120, 80, CANVAS_WIDTH, CANVAS_HEIGHT),
			WidgetType::LightTile => Self::capped(200, 180, 480, 480),
			WidgetType::HeatingTile => Self::capped(220, 200, 480, 480),
			WidgetType::WeatherTile => Self::capped(220, 200, 480, 480),
			WidgetType::Weather3Day => Self::capped(260, 220, 640, 420),
		}
	}

	/// Returns the limits for a type name, or [`Self::FALLBACK`] if unknown.
	pub fn for_name(name: &str) -> Self {
		WidgetType::from_name(name).map_or(Self::FALLBACK, Self::for_type)
	}
}
