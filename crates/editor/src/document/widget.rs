//! Canonical widget records.

use panelkit_primitives::{HexColor, Rect, has_domain};
use panelkit_registry::options::{
	DEFAULT_BUTTON_ACCENT_COLOR, DEFAULT_GRAPH_LINE_COLOR, DEFAULT_GRAPH_TIME_WINDOW_MIN, DEFAULT_SLIDER_ACCENT_COLOR,
};
use panelkit_registry::{ButtonMode, DomainPolicy, DomainQuery, SliderDirection, SliderEntityDomain, WidgetType};
use serde::{Deserialize, Serialize};

use crate::geometry::clamp_rect;
use crate::normalize::fields::{clamp_point_count, clamp_time_window};
use crate::normalize::raw::RawWidget;

/// Where a freshly created widget is placed before clamping.
pub const NEW_WIDGET_ORIGIN: (i32, i32) = (20, 20);

/// Button settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSettings {
	pub mode: ButtonMode,
	pub accent_color: HexColor,
}

impl Default for ButtonSettings {
	fn default() -> Self {
		Self {
			mode: ButtonMode::Auto,
			accent_color: DEFAULT_BUTTON_ACCENT_COLOR,
		}
	}
}

/// Slider settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSettings {
	pub direction: SliderDirection,
	pub accent_color: HexColor,
	pub entity_domain: SliderEntityDomain,
}

impl Default for SliderSettings {
	fn default() -> Self {
		Self {
			direction: SliderDirection::Auto,
			accent_color: DEFAULT_SLIDER_ACCENT_COLOR,
			entity_domain: SliderEntityDomain::Auto,
		}
	}
}

/// Graph settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSettings {
	pub line_color: HexColor,
	/// History window in minutes, `1..=1440`.
	pub time_window_min: u16,
	/// Sample count in `16..=64`; `None` lets the renderer choose.
	pub point_count: Option<u16>,
}

impl Default for GraphSettings {
	fn default() -> Self {
		Self {
			line_color: DEFAULT_GRAPH_LINE_COLOR,
			time_window_min: DEFAULT_GRAPH_TIME_WINDOW_MIN,
			point_count: None,
		}
	}
}

/// Type tag plus the settings only that type carries.
///
/// A widget's type is the variant, so settings of other types cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSettings {
	Sensor,
	Button(ButtonSettings),
	Slider(SliderSettings),
	Graph(GraphSettings),
	EmptyTile,
	LightTile,
	HeatingTile,
	WeatherTile,
	Weather3Day,
}

impl WidgetSettings {
	/// Returns default settings for `kind`.
	pub fn defaults(kind: WidgetType) -> Self {
		match kind {
			WidgetType::Sensor => Self::Sensor,
			WidgetType::Button => Self::Button(ButtonSettings::default()),
			WidgetType::Slider => Self::Slider(SliderSettings::default()),
			WidgetType::Graph => Self::Graph(GraphSettings::default()),
			WidgetType::EmptyTile => Self::EmptyTile,
			WidgetType::LightTile => Self::LightTile,
			WidgetType::HeatingTile => Self::HeatingTile,
			WidgetType::WeatherTile => Self::WeatherTile,
			WidgetType::Weather3Day => Self::Weather3Day,
		}
	}

	pub fn kind(&self) -> WidgetType {
		match self {
			Self::Sensor => WidgetType::Sensor,
			Self::Button(_) => WidgetType::Button,
			Self::Slider(_) => WidgetType::Slider,
			Self::Graph(_) => WidgetType::Graph,
			Self::EmptyTile => WidgetType::EmptyTile,
			Self::LightTile => WidgetType::LightTile,
			Self::HeatingTile => WidgetType::HeatingTile,
			Self::WeatherTile => WidgetType::WeatherTile,
			Self::Weather3Day => WidgetType::Weather3Day,
		}
	}

	/// Button mode, or the default for non-buttons.
	pub fn button_mode(&self) -> ButtonMode {
		match self {
			Self::Button(button) => button.mode,
			_ => ButtonMode::default(),
		}
	}

	/// Slider domain, or the default for non-sliders.
	pub fn slider_domain(&self) -> SliderEntityDomain {
		match self {
			Self::Slider(slider) => slider.entity_domain,
			_ => SliderEntityDomain::default(),
		}
	}
}

/// A widget on a page.
///
/// Identity and geometry are private: the id never changes once the widget
/// is in a document, and the rect can only be replaced through
/// [`Widget::set_rect`], which clamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawWidget", try_from = "RawWidget")]
pub struct Widget {
	id: String,
	pub title: String,
	pub entity_id: String,
	/// Measured-value entity; always empty unless the widget is a heating tile.
	pub secondary_entity_id: String,
	rect: Rect,
	settings: WidgetSettings,
}

impl Widget {
	/// Creates a widget with default settings at the default placement.
	///
	/// The title starts as the id and both entity fields are empty.
	pub fn new(id: impl Into<String>, kind: WidgetType) -> Self {
		let id = id.into();
		let (w, h) = kind.default_size();
		let (x, y) = NEW_WIDGET_ORIGIN;
		Self {
			title: id.clone(),
			id,
			entity_id: String::new(),
			secondary_entity_id: String::new(),
			rect: clamp_rect(Rect::new(x, y, w, h), kind),
			settings: WidgetSettings::defaults(kind),
		}
	}

	/// Assembles a widget from already-parsed parts, then normalizes it.
	pub(crate) fn from_parts(id: String, title: String, entity_id: String, secondary_entity_id: String, rect: Rect, settings: WidgetSettings) -> Self {
		let mut widget = Self {
			id,
			title,
			entity_id,
			secondary_entity_id,
			rect,
			settings,
		};
		widget.normalize();
		widget
	}

	/// Sets the primary entity.
	pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
		self.entity_id = entity_id.into();
		self
	}

	/// Replaces the settings, then normalizes.
	///
	/// Passing settings of another type changes the widget's type; the rect
	/// is re-clamped against the new type's limits.
	pub fn with_settings(mut self, settings: WidgetSettings) -> Self {
		self.settings = settings;
		self.normalize();
		self
	}

	/// Places the widget, clamping into its legal footprint.
	pub fn with_rect(mut self, rect: Rect) -> Self {
		self.set_rect(rect);
		self
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub(crate) fn set_id(&mut self, id: String) {
		self.id = id;
	}

	pub fn kind(&self) -> WidgetType {
		self.settings.kind()
	}

	pub fn rect(&self) -> Rect {
		self.rect
	}

	/// Clamps and stores `rect`, returning what was stored.
	pub fn set_rect(&mut self, rect: Rect) -> Rect {
		self.rect = clamp_rect(rect, self.kind());
		self.rect
	}

	pub fn settings(&self) -> &WidgetSettings {
		&self.settings
	}

	pub fn button(&self) -> Option<&ButtonSettings> {
		match &self.settings {
			WidgetSettings::Button(button) => Some(button),
			_ => None,
		}
	}

	pub fn slider(&self) -> Option<&SliderSettings> {
		match &self.settings {
			WidgetSettings::Slider(slider) => Some(slider),
			_ => None,
		}
	}

	pub fn graph(&self) -> Option<&GraphSettings> {
		match &self.settings {
			WidgetSettings::Graph(graph) => Some(graph),
			_ => None,
		}
	}

	/// Domain query for this widget's primary entity.
	pub fn query(&self, policy: DomainPolicy) -> DomainQuery {
		DomainQuery::new(self.kind())
			.with_slider_domain(self.settings.slider_domain())
			.with_button_mode(self.settings.button_mode())
			.with_policy(policy)
	}

	/// Re-applies the canonical repairs.
	///
	/// * A media transport button not bound to a `media_player.` entity
	///   falls back to `auto`.
	/// * Graph window and point count are pulled into range.
	/// * The secondary entity is cleared for every type but heating tiles.
	/// * The rect is clamped.
	///
	/// Idempotent.
	pub fn normalize(&mut self) {
		match &mut self.settings {
			WidgetSettings::Button(button) => {
				if button.mode.requires_media_player() && !has_domain(&self.entity_id, "media_player") {
					button.mode = ButtonMode::Auto;
				}
			}
			WidgetSettings::Graph(graph) => {
				graph.time_window_min = clamp_time_window(graph.time_window_min);
				graph.point_count = graph.point_count.and_then(clamp_point_count);
			}
			_ => {}
		}
		if !self.kind().uses_secondary_entity() {
			self.secondary_entity_id.clear();
		}
		self.rect = clamp_rect(self.rect, self.kind());
	}
}
