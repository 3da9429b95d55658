//! Widget creation, inspector edits and type changes.
//!
//! Edits are computed on a copy and only swapped into the document once
//! every field validated, so a rejected edit never leaves a widget half
//! applied.

use panelkit_primitives::{HexColor, Rect, has_domain};
use panelkit_registry::{ButtonMode, DomainPolicy, DomainQuery, SliderDirection, SliderEntityDomain, WidgetType};
use tracing::{debug, info};

use super::EditorSession;
use crate::document::{ButtonSettings, GraphSettings, SliderSettings, Widget, WidgetSettings};
use crate::entities::{EntityCatalog, PLACEHOLDER_ENTITY, matches_type};
use crate::error::{EditorError, Result};
use crate::normalize::fields;

/// Domain the heating tile's measured-temperature entity must use.
const SECONDARY_DOMAIN: &str = "sensor";

/// Rect fields of an inspector edit. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectEdit {
	pub x: Option<i32>,
	pub y: Option<i32>,
	pub w: Option<i32>,
	pub h: Option<i32>,
}

/// An explicit inspector edit.
///
/// Every field is optional; `None` keeps the current value. Type-specific
/// values arrive as the loose strings an inspector form produces and are
/// coerced the same way imported documents are. Values for fields the
/// widget's type does not carry are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetEdit {
	pub title: Option<String>,
	/// Blank input picks the default entity for the widget.
	pub entity_id: Option<String>,
	/// Heating tiles only. Blank input picks the first sensor.
	pub secondary_entity_id: Option<String>,
	pub rect: RectEdit,
	pub button_mode: Option<String>,
	pub button_accent_color: Option<String>,
	pub slider_direction: Option<String>,
	pub slider_accent_color: Option<String>,
	pub slider_entity_domain: Option<String>,
	pub graph_line_color: Option<String>,
	pub graph_time_window_min: Option<String>,
	pub graph_point_count: Option<String>,
}

fn edited_color(input: Option<&str>, current: HexColor) -> HexColor {
	HexColor::parse_or(input, current)
}

fn edited_settings(current: &WidgetSettings, edit: &WidgetEdit) -> WidgetSettings {
	match *current {
		WidgetSettings::Button(button) => WidgetSettings::Button(ButtonSettings {
			mode: edit
				.button_mode
				.as_deref()
				.map_or(button.mode, |mode| ButtonMode::normalize(Some(mode.trim()))),
			accent_color: edited_color(edit.button_accent_color.as_deref(), button.accent_color),
		}),
		WidgetSettings::Slider(slider) => WidgetSettings::Slider(SliderSettings {
			direction: edit
				.slider_direction
				.as_deref()
				.map_or(slider.direction, |d| SliderDirection::normalize(Some(d.trim()))),
			accent_color: edited_color(edit.slider_accent_color.as_deref(), slider.accent_color),
			entity_domain: edit
				.slider_entity_domain
				.as_deref()
				.map_or(slider.entity_domain, |d| SliderEntityDomain::normalize(Some(d.trim()))),
		}),
		WidgetSettings::Graph(graph) => WidgetSettings::Graph(GraphSettings {
			line_color: edited_color(edit.graph_line_color.as_deref(), graph.line_color),
			time_window_min: edit.graph_time_window_min.as_deref().map_or(graph.time_window_min, |v| {
				fields::time_window(Some(&serde_json::Value::from(v.trim())))
			}),
			point_count: edit.graph_point_count.as_deref().map_or(graph.point_count, |v| {
				fields::point_count(Some(&serde_json::Value::from(v.trim())))
			}),
		}),
		other => other,
	}
}

fn edited_rect(current: Rect, edit: RectEdit) -> Rect {
	Rect::new(
		edit.x.unwrap_or(current.x),
		edit.y.unwrap_or(current.y),
		edit.w.unwrap_or(current.w),
		edit.h.unwrap_or(current.h),
	)
}

/// Applies `edit` to a copy of `current`.
///
/// The primary entity (edited or kept) must match the domains allowed by
/// the edited settings, and a heating tile's secondary entity must be a
/// sensor. Blank entity input picks the default, which must pass the same
/// checks.
pub(crate) fn edited_widget(current: &Widget, edit: &WidgetEdit, catalog: &EntityCatalog, policy: DomainPolicy) -> Result<Widget> {
	let settings = edited_settings(current.settings(), edit);
	let kind = settings.kind();
	let query = DomainQuery::new(kind)
		.with_slider_domain(settings.slider_domain())
		.with_button_mode(settings.button_mode())
		.with_policy(policy);

	let entity_input = edit.entity_id.as_deref().unwrap_or(&current.entity_id).trim();
	let entity_id = if kind.is_entityless() {
		entity_input.to_string()
	} else {
		let entity_id = if entity_input.is_empty() {
			catalog.pick_default(&query)
		} else {
			entity_input.to_string()
		};
		if !matches_type(&entity_id, &query) {
			return Err(EditorError::EntityDomain {
				entity_id,
				allowed: query.allowed().to_vec(),
			});
		}
		entity_id
	};

	let secondary_entity_id = if kind.uses_secondary_entity() {
		let input = edit
			.secondary_entity_id
			.as_deref()
			.unwrap_or(&current.secondary_entity_id)
			.trim();
		let secondary = if input.is_empty() {
			catalog.pick_default_sensor()
		} else {
			input.to_string()
		};
		if !has_domain(&secondary, SECONDARY_DOMAIN) {
			return Err(EditorError::SecondaryDomain {
				entity_id: secondary,
				required: SECONDARY_DOMAIN,
			});
		}
		secondary
	} else {
		String::new()
	};

	let title = edit.title.as_deref().map_or_else(|| current.title.clone(), |t| t.trim().to_string());
	Ok(Widget::from_parts(
		current.id().to_string(),
		title,
		entity_id,
		secondary_entity_id,
		edited_rect(current.rect(), edit.rect),
		settings,
	))
}

/// Secondary entity for a new heating tile. Falls back to the placeholder
/// when the catalog has no sensor.
fn default_secondary(catalog: &EntityCatalog) -> String {
	let picked = catalog.pick_default_sensor();
	if has_domain(&picked, SECONDARY_DOMAIN) {
		picked
	} else {
		PLACEHOLDER_ENTITY.to_string()
	}
}

/// Returns `current` re-typed as `kind`.
///
/// Settings reset to the new type's defaults; title and position are kept
/// and the size is clamped into the new type's limits. The entity is kept
/// when it is still compatible, otherwise the default is picked.
pub(crate) fn retyped_widget(current: &Widget, kind: WidgetType, catalog: &EntityCatalog, policy: DomainPolicy) -> Widget {
	let mut widget = Widget::from_parts(
		current.id().to_string(),
		current.title.clone(),
		current.entity_id.clone(),
		current.secondary_entity_id.clone(),
		current.rect(),
		WidgetSettings::defaults(kind),
	);
	let query = widget.query(policy);
	if kind.is_entityless() {
		widget.entity_id.clear();
	} else if widget.entity_id.is_empty() || !matches_type(&widget.entity_id, &query) {
		widget.entity_id = catalog.pick_default(&query);
	}
	if kind.uses_secondary_entity() && !has_domain(&widget.secondary_entity_id, SECONDARY_DOMAIN) {
		widget.secondary_entity_id = default_secondary(catalog);
	}
	widget.normalize();
	widget
}

impl EditorSession {
	fn ensure_idle(&self, widget_id: &str) -> Result<()> {
		if self.drag.owns(widget_id) {
			return Err(EditorError::WidgetBusy(widget_id.to_string()));
		}
		Ok(())
	}

	fn selected_widget_in_page(&self, widget_id: &str) -> Result<&Widget> {
		self.selected_page()
			.widget(widget_id)
			.ok_or_else(|| EditorError::UnknownWidget(widget_id.to_string()))
	}

	/// Adds a widget of `kind` to the selected page and selects it.
	///
	/// The widget gets the default footprint and the default entities for
	/// its type. Returns the generated id.
	pub fn add_widget(&mut self, kind: WidgetType) -> Result<String> {
		let page_id = self.selected_page().id().to_string();
		let id = self.document.next_widget_id(&page_id, kind);
		let mut widget = Widget::new(id.clone(), kind);
		let query = widget.query(self.config.entities.sensor_domains);
		widget.entity_id = self.catalog.pick_default(&query);
		if kind.uses_secondary_entity() {
			widget.secondary_entity_id = default_secondary(&self.catalog);
		}
		self.document.insert_widget(&page_id, widget)?;
		self.selected_widget = Some(id.clone());
		self.modified = true;
		info!(page = %page_id, widget = %id, kind = %kind.as_str(), "session.widget_added");
		Ok(id)
	}

	/// Removes a widget from the selected page.
	pub fn delete_widget(&mut self, widget_id: &str) -> Result<Widget> {
		self.ensure_idle(widget_id)?;
		let page_id = self.selected_page().id().to_string();
		let removed = self.document.remove_widget(&page_id, widget_id)?;
		if self.selected_widget.as_deref() == Some(widget_id) {
			self.selected_widget = None;
		}
		self.modified = true;
		debug!(page = %page_id, widget = %widget_id, "session.widget_deleted");
		Ok(removed)
	}

	/// Applies an inspector edit to a widget on the selected page.
	///
	/// On error the widget is left exactly as it was.
	pub fn apply_edit(&mut self, widget_id: &str, edit: &WidgetEdit) -> Result<&Widget> {
		self.ensure_idle(widget_id)?;
		let current = self.selected_widget_in_page(widget_id)?;
		let widget = edited_widget(current, edit, &self.catalog, self.config.entities.sensor_domains)?;
		self.commit(widget)
	}

	/// Changes a widget's type in place.
	pub fn change_widget_type(&mut self, widget_id: &str, kind: WidgetType) -> Result<&Widget> {
		self.ensure_idle(widget_id)?;
		let current = self.selected_widget_in_page(widget_id)?;
		let from = current.kind();
		let widget = retyped_widget(current, kind, &self.catalog, self.config.entities.sensor_domains);
		debug!(widget = %widget_id, from = %from.as_str(), to = %kind.as_str(), "session.widget_retyped");
		self.commit(widget)
	}

	fn commit(&mut self, widget: Widget) -> Result<&Widget> {
		let page_id = self.selected_page().id().to_string();
		let widget_id = widget.id().to_string();
		self.document.replace_widget(&page_id, widget)?;
		self.modified = true;
		self.document.widget_mut(&page_id, &widget_id).map(|w| &*w)
	}
}
