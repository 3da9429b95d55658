//! Per-field coercion of loosely typed widget settings.

use panelkit_primitives::HexColor;
use panelkit_primitives::loose::{coerce_number, to_rounded_i32};
use panelkit_registry::options::{
	DEFAULT_GRAPH_TIME_WINDOW_MIN, GRAPH_POINTS_MAX, GRAPH_POINTS_MIN, GRAPH_TIME_WINDOW_MAX, GRAPH_TIME_WINDOW_MIN,
};
use serde_json::Value;

/// Returns the value when it is a JSON string.
pub fn text(value: Option<&Value>) -> Option<&str> {
	value.and_then(Value::as_str)
}

/// Parses a color field, falling back to `default`.
pub fn color(value: Option<&Value>, default: HexColor) -> HexColor {
	HexColor::parse_or(text(value), default)
}

/// Coerces an absent value to NaN and everything else per [`coerce_number`].
fn number(value: Option<&Value>) -> f64 {
	value.map_or(f64::NAN, coerce_number)
}

/// Graph history window in minutes.
///
/// Non-numeric and non-positive values take the default; others are rounded
/// and clamped into `1..=1440`.
pub fn time_window(value: Option<&Value>) -> u16 {
	match to_rounded_i32(number(value)) {
		Some(minutes) if minutes > 0 => clamp_u16(minutes, GRAPH_TIME_WINDOW_MIN, GRAPH_TIME_WINDOW_MAX),
		_ => DEFAULT_GRAPH_TIME_WINDOW_MIN,
	}
}

/// Graph point count. Blank, non-numeric and non-positive values mean unset.
pub fn point_count(value: Option<&Value>) -> Option<u16> {
	match to_rounded_i32(number(value)) {
		Some(points) if points > 0 => Some(clamp_u16(points, GRAPH_POINTS_MIN, GRAPH_POINTS_MAX)),
		_ => None,
	}
}

/// Pulls an already typed window into range; zero takes the default.
pub fn clamp_time_window(minutes: u16) -> u16 {
	if minutes == 0 {
		DEFAULT_GRAPH_TIME_WINDOW_MIN
	} else {
		minutes.clamp(GRAPH_TIME_WINDOW_MIN, GRAPH_TIME_WINDOW_MAX)
	}
}

/// Pulls an already typed point count into range; zero means unset.
pub fn clamp_point_count(points: u16) -> Option<u16> {
	(points > 0).then(|| points.clamp(GRAPH_POINTS_MIN, GRAPH_POINTS_MAX))
}

fn clamp_u16(value: i32, min: u16, max: u16) -> u16 {
	let clamped = value.clamp(i32::from(min), i32::from(max));
	u16::try_from(clamped).unwrap_or(max)
}
