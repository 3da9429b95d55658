//! Entity domain compatibility rules.
//!
//! A widget accepts an entity when the entity id starts with one of the
//! widget's allowed domains followed by a dot. The allowed set depends on the
//! widget type and, for sliders and buttons, on one of their settings.

use serde::{Deserialize, Serialize};

use crate::options::{ButtonMode, SliderEntityDomain};
use crate::widget::WidgetType;

const SENSOR: &[&str] = &["sensor"];
const SENSOR_OR_BINARY: &[&str] = &["sensor", "binary_sensor"];
const MEDIA_PLAYER: &[&str] = &["media_player"];
const SWITCH_OR_MEDIA_PLAYER: &[&str] = &["switch", "media_player"];
const LIGHT: &[&str] = &["light"];
const CLIMATE: &[&str] = &["climate"];
const WEATHER: &[&str] = &["weather"];
const COVER: &[&str] = &["cover"];
const SLIDER_ANY: &[&str] = &["light", "media_player", "cover"];

/// How `sensor` widgets treat `binary_sensor` entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
	/// Only `sensor.` entities.
	#[default]
	Strict,
	/// `sensor.` and `binary_sensor.` entities.
	IncludeBinary,
}

/// Everything that decides a widget's allowed entity domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainQuery {
	pub kind: WidgetType,
	pub slider_domain: SliderEntityDomain,
	pub button_mode: ButtonMode,
	pub policy: DomainPolicy,
}

impl DomainQuery {
	/// Creates a query with default settings for `kind`.
	pub fn new(kind: WidgetType) -> Self {
		Self {
			kind,
			slider_domain: SliderEntityDomain::default(),
			button_mode: ButtonMode::default(),
			policy: DomainPolicy::default(),
		}
	}

	/// Sets the slider domain setting.
	pub fn with_slider_domain(mut self, slider_domain: SliderEntityDomain) -> Self {
		self.slider_domain = slider_domain;
		self
	}

	/// Sets the button mode setting.
	pub fn with_button_mode(mut self, button_mode: ButtonMode) -> Self {
		self.button_mode = button_mode;
		self
	}

	/// Sets the `sensor` domain policy.
	pub fn with_policy(mut self, policy: DomainPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Returns the ordered allowed domains. Empty means "any entity".
	pub fn allowed(&self) -> &'static [&'static str] {
		match self.kind {
			// Graphs plot the numeric state of whatever they are bound to.
			WidgetType::EmptyTile | WidgetType::Graph => &[],
			WidgetType::Sensor => match self.policy {
				DomainPolicy::Strict => SENSOR,
				DomainPolicy::IncludeBinary => SENSOR_OR_BINARY,
			},
			WidgetType::Button if self.button_mode.requires_media_player() => MEDIA_PLAYER,
			WidgetType::Button => SWITCH_OR_MEDIA_PLAYER,
			WidgetType::LightTile => LIGHT,
			WidgetType::HeatingTile => CLIMATE,
			WidgetType::WeatherTile | WidgetType::Weather3Day => WEATHER,
			WidgetType::Slider => match self.slider_domain {
				SliderEntityDomain::Auto => SLIDER_ANY,
				SliderEntityDomain::Light => LIGHT,
				SliderEntityDomain::MediaPlayer => MEDIA_PLAYER,
				SliderEntityDomain::Cover => COVER,
			},
		}
	}

	/// Returns the single allowed domain, or `None` when zero or several apply.
	///
	/// Only used as a search hint.
	pub fn expected(&self) -> Option<&'static str> {
		match self.allowed() {
			[only] => Some(only),
			_ => None,
		}
	}
}

/// Allowed domains for a widget under the strict `sensor` policy.
pub fn allowed_domains(kind: WidgetType, slider_domain: SliderEntityDomain, button_mode: ButtonMode) -> &'static [&'static str] {
	DomainQuery::new(kind)
		.with_slider_domain(slider_domain)
		.with_button_mode(button_mode)
		.allowed()
}

/// Expected (single) domain for a widget under the strict `sensor` policy.
pub fn expected_domain(kind: WidgetType, slider_domain: SliderEntityDomain, button_mode: ButtonMode) -> Option<&'static str> {
	DomainQuery::new(kind)
		.with_slider_domain(slider_domain)
		.with_button_mode(button_mode)
		.expected()
}
