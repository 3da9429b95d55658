//! Normalization of untrusted layout JSON.
//!
//! # Purpose
//!
//! * Turns any JSON object into a canonical [`Widget`], or reports why not.
//! * Turns any JSON document with a `pages` array into a valid
//!   [`LayoutDocument`], repairing ids and recording what changed.
//!
//! # Rules
//!
//! | Field | Rule |
//! |---|---|
//! | `type` | exact registry name; anything else drops the widget |
//! | `rect` | components coerced to numbers; missing, zero or NaN `w`/`h` take the type minimum; then clamped |
//! | `*_color` | `#rrggbb`, `rrggbb` or `0xrrggbb` in any case; otherwise the type default |
//! | `button_mode` etc. | exact wire name; otherwise `auto` |
//! | `graph_time_window_min` | rounded, non-positive or non-numeric takes 120, clamped to `1..=1440` |
//! | `graph_point_count` | rounded, non-positive or non-numeric means unset, clamped to `16..=64` |
//! | `secondary_entity_id` | forced empty unless the type is `heating_tile` |
//!
//! Settings belonging to another type are discarded, and a media transport
//! button mode without a `media_player.` entity falls back to `auto`.
//!
//! # Invariants
//!
//! * [`normalize_widget`] never fails for a registered type.
//! * Normalizing the serialized form of a normalized widget yields the same
//!   widget.

use std::collections::HashSet;
use std::fmt;

use panelkit_primitives::Rect;
use panelkit_primitives::loose::coerce_number;
use panelkit_registry::options::{DEFAULT_BUTTON_ACCENT_COLOR, DEFAULT_GRAPH_LINE_COLOR, DEFAULT_SLIDER_ACCENT_COLOR};
use panelkit_registry::{ButtonMode, SliderDirection, SliderEntityDomain, UnknownWidgetType, WidgetType};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::document::ids::{first_free, widget_id_prefix};
use crate::document::{ButtonSettings, GraphSettings, LAYOUT_VERSION, LayoutDocument, Page, SliderSettings, Widget, WidgetSettings};
use crate::error::{EditorError, Result};
use crate::geometry::snap_number;

pub mod fields;
pub mod raw;

use raw::{RawLayoutDocument, RawPage, RawWidget};

impl TryFrom<RawWidget> for Widget {
	type Error = UnknownWidgetType;

	fn try_from(raw: RawWidget) -> std::result::Result<Self, Self::Error> {
		normalize_widget(&raw)
	}
}

/// Builds a canonical widget from stored fields.
pub fn normalize_widget(raw: &RawWidget) -> std::result::Result<Widget, UnknownWidgetType> {
	let kind = WidgetType::from_name(&raw.kind).ok_or_else(|| UnknownWidgetType(raw.kind.clone()))?;
	let settings = match kind {
		WidgetType::Button => WidgetSettings::Button(ButtonSettings {
			mode: ButtonMode::normalize(fields::text(raw.button_mode.as_ref())),
			accent_color: fields::color(raw.button_accent_color.as_ref(), DEFAULT_BUTTON_ACCENT_COLOR),
		}),
		WidgetType::Slider => WidgetSettings::Slider(SliderSettings {
			direction: SliderDirection::normalize(fields::text(raw.slider_direction.as_ref())),
			accent_color: fields::color(raw.slider_accent_color.as_ref(), DEFAULT_SLIDER_ACCENT_COLOR),
			entity_domain: SliderEntityDomain::normalize(fields::text(raw.slider_entity_domain.as_ref())),
		}),
		WidgetType::Graph => WidgetSettings::Graph(GraphSettings {
			line_color: fields::color(raw.graph_line_color.as_ref(), DEFAULT_GRAPH_LINE_COLOR),
			time_window_min: fields::time_window(raw.graph_time_window_min.as_ref()),
			point_count: fields::point_count(raw.graph_point_count.as_ref()),
		}),
		other => WidgetSettings::defaults(other),
	};
	Ok(Widget::from_parts(
		raw.id.clone(),
		raw.title.clone(),
		raw.entity_id.clone(),
		raw.secondary_entity_id.clone(),
		rect_from_value(raw.rect.as_ref()),
		settings,
	))
}

/// Reads a stored rect. Unusable components become zero, which the clamp
/// treats as "unset" for sizes and as the canvas edge for positions.
fn rect_from_value(value: Option<&Value>) -> Rect {
	let component = |key: &str| {
		value
			.and_then(|rect| rect.get(key))
			.map(coerce_number)
			.and_then(snap_number)
			.unwrap_or(0)
	};
	Rect::new(component("x"), component("y"), component("w"), component("h"))
}

/// A widget removed because its type is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedWidget {
	pub page_id: String,
	pub widget_id: String,
	pub kind: String,
}

/// An id replaced because it was blank or already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
	pub from: String,
	pub to: String,
}

/// What document normalization changed beyond per-field coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
	pub dropped_widgets: Vec<DroppedWidget>,
	pub renamed_pages: Vec<Renamed>,
	pub renamed_widgets: Vec<Renamed>,
	/// Page or widget entries that were not JSON objects.
	pub skipped_entries: usize,
	/// The input had no usable page; the configured default page was added.
	pub added_default_page: bool,
	/// The stored version was missing or not a positive integer.
	pub version_reset: bool,
}

impl NormalizeReport {
	/// Returns true if nothing beyond field coercion happened.
	pub fn is_clean(&self) -> bool {
		self.dropped_widgets.is_empty()
			&& self.renamed_pages.is_empty()
			&& self.renamed_widgets.is_empty()
			&& self.skipped_entries == 0
			&& !self.added_default_page
			&& !self.version_reset
	}
}

impl fmt::Display for NormalizeReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_clean() {
			return f.write_str("no structural repairs");
		}
		let mut lines = Vec::new();
		for dropped in &self.dropped_widgets {
			lines.push(format!(
				"dropped widget {:?} on page {:?}: unknown type {:?}",
				dropped.widget_id, dropped.page_id, dropped.kind
			));
		}
		for renamed in &self.renamed_pages {
			lines.push(format!("renamed page {:?} to {:?}", renamed.from, renamed.to));
		}
		for renamed in &self.renamed_widgets {
			lines.push(format!("renamed widget {:?} to {:?}", renamed.from, renamed.to));
		}
		if self.skipped_entries > 0 {
			lines.push(format!("skipped {} non-object entries", self.skipped_entries));
		}
		if self.added_default_page {
			lines.push("added default page".to_string());
		}
		if self.version_reset {
			lines.push(format!("set version to {LAYOUT_VERSION}"));
		}
		f.write_str(&lines.join("\n"))
	}
}

/// Builds a valid document from stored fields.
///
/// Fails only when `pages` is missing or not an array. Everything else is
/// repaired and recorded in the returned report.
pub fn normalize_document(raw: RawLayoutDocument, config: &LayoutConfig) -> Result<(LayoutDocument, NormalizeReport)> {
	let Some(Value::Array(entries)) = raw.pages else {
		return Err(EditorError::MissingPages);
	};
	let version = raw.version.as_ref().and_then(stored_version);
	let mut report = NormalizeReport {
		version_reset: version.is_none(),
		..NormalizeReport::default()
	};
	if report.version_reset {
		debug!(version = ?raw.version, "normalize.version_reset");
	}

	let mut pages: Vec<Page> = Vec::with_capacity(entries.len());
	let mut widget_ids: HashSet<String> = HashSet::new();
	for entry in entries {
		let Some(raw_page) = object_entry::<RawPage>(entry, &mut report) else {
			continue;
		};
		let mut id = raw_page.id;
		if id.trim().is_empty() || pages.iter().any(|p| p.id() == id) {
			let fresh = first_free("page", |candidate| pages.iter().any(|p| p.id() == candidate));
			warn!(from = %id, to = %fresh, "normalize.page_renamed");
			report.renamed_pages.push(Renamed { from: id, to: fresh.clone() });
			id = fresh;
		}
		let mut page = Page::new(id, raw_page.title);

		let widgets = match raw_page.widgets {
			Some(Value::Array(widgets)) => widgets,
			_ => Vec::new(),
		};
		for entry in widgets {
			let Some(raw_widget) = object_entry::<RawWidget>(entry, &mut report) else {
				continue;
			};
			let mut widget = match normalize_widget(&raw_widget) {
				Ok(widget) => widget,
				Err(UnknownWidgetType(kind)) => {
					warn!(page = %page.id(), widget = %raw_widget.id, %kind, "normalize.widget_dropped");
					report.dropped_widgets.push(DroppedWidget {
						page_id: page.id().to_string(),
						widget_id: raw_widget.id,
						kind,
					});
					continue;
				}
			};
			if widget.id().trim().is_empty() || widget_ids.contains(widget.id()) {
				let prefix = widget_id_prefix(page.id(), widget.kind().as_str());
				let fresh = first_free(&prefix, |candidate| widget_ids.contains(candidate));
				warn!(from = %widget.id(), to = %fresh, "normalize.widget_renamed");
				report.renamed_widgets.push(Renamed {
					from: widget.id().to_string(),
					to: fresh.clone(),
				});
				widget.set_id(fresh);
			}
			widget_ids.insert(widget.id().to_string());
			page.push_widget(widget);
		}
		pages.push(page);
	}

	if pages.is_empty() {
		pages.push(Page::new(config.default_page_id.clone(), config.default_page_title.clone()));
		report.added_default_page = true;
	}
	Ok((LayoutDocument::from_parts(version.unwrap_or(LAYOUT_VERSION), pages), report))
}

/// A stored version is kept when it is a positive integer.
fn stored_version(value: &Value) -> Option<u32> {
	value.as_u64().filter(|v| *v > 0).and_then(|v| u32::try_from(v).ok())
}

/// Parses an array entry that must be a JSON object, counting skips.
fn object_entry<T: serde::de::DeserializeOwned>(entry: Value, report: &mut NormalizeReport) -> Option<T> {
	if !entry.is_object() {
		report.skipped_entries += 1;
		return None;
	}
	match serde_json::from_value(entry) {
		Ok(parsed) => Some(parsed),
		Err(err) => {
			warn!(error = %err, "normalize.entry_skipped");
			report.skipped_entries += 1;
			None
		}
	}
}
