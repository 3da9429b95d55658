//! The closed set of widget types a page can hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limits::SizeLimits;

/// Widget kinds understood by the panel renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
	/// Single sensor readout.
	Sensor,
	/// Switch or media transport button.
	Button,
	/// Brightness, volume or cover position slider.
	Slider,
	/// History graph of one sensor.
	Graph,
	/// Decorative tile with no entity.
	EmptyTile,
	/// Light control tile.
	LightTile,
	/// Thermostat tile with a separate measured-temperature sensor.
	HeatingTile,
	/// Current weather tile.
	WeatherTile,
	/// Three-day forecast tile.
	#[serde(rename = "weather_3day")]
	Weather3Day,
}

/// Error returned when a type name is not part of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget type: {0:?}")]
pub struct UnknownWidgetType(pub String);

impl WidgetType {
	/// Every registered type, in palette order.
	pub const ALL: [WidgetType; 9] = [
		Self::Sensor,
		Self::Button,
		Self::Slider,
		Self::Graph,
		Self::EmptyTile,
		Self::LightTile,
		Self::HeatingTile,
		Self::WeatherTile,
		Self::Weather3Day,
	];

	/// Returns the wire name used in layout documents.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sensor => "sensor",
			Self::Button => "button",
			Self::Slider => "slider",
			Self::Graph => "graph",
			Self::EmptyTile => "empty_tile",
			Self::LightTile => "light_tile",
			Self::HeatingTile => "heating_tile",
			Self::WeatherTile => "weather_tile",
			Self::Weather3Day => "weather_3day",
		}
	}

	/// Looks up a type by its exact wire name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == name)
	}

	/// Returns the canvas-capped footprint limits for this type.
	pub fn size_limits(self) -> SizeLimits {
		SizeLimits::for_type(self)
	}

	/// Returns the `(w, h)` a freshly created widget of this type asks for.
	///
	/// The request is clamped against [`Self::size_limits`] on insertion.
	pub const fn default_size(self) -> (i32, i32) {
		match self {
			Self::Weather3Day => (360, 260),
			Self::LightTile | Self::HeatingTile | Self::WeatherTile | Self::EmptyTile => (300, 260),
			_ => (220, 120),
		}
	}

	/// Returns true if the type binds a second, measured-value entity.
	pub const fn uses_secondary_entity(self) -> bool {
		matches!(self, Self::HeatingTile)
	}

	/// Returns true if the type binds no entity at all.
	pub const fn is_entityless(self) -> bool {
		matches!(self, Self::EmptyTile)
	}
}

impl fmt::Display for WidgetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for WidgetType {
	type Err = UnknownWidgetType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_name(s).ok_or_else(|| UnknownWidgetType(s.to_string()))
	}
}
