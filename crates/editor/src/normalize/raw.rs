//! Lenient wire shapes.
//!
//! These mirror the stored JSON but accept any value in any field, so that
//! deserialization itself never fails on content. Interpretation happens in
//! [`super::normalize_widget`] and [`super::normalize_document`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::document::{Widget, WidgetSettings};

/// Stored widget fields, as found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWidget {
	#[serde(default, deserialize_with = "loose_string")]
	pub id: String,
	#[serde(rename = "type", default, deserialize_with = "loose_string")]
	pub kind: String,
	#[serde(default, deserialize_with = "loose_string")]
	pub title: String,
	#[serde(default, deserialize_with = "loose_string")]
	pub entity_id: String,
	#[serde(default, deserialize_with = "loose_string")]
	pub secondary_entity_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rect: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_mode: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_accent_color: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slider_direction: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slider_accent_color: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slider_entity_domain: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub graph_line_color: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub graph_time_window_min: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub graph_point_count: Option<Value>,
}

/// Stored page fields, as found.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPage {
	#[serde(default, deserialize_with = "loose_string")]
	pub id: String,
	#[serde(default, deserialize_with = "loose_string")]
	pub title: String,
	#[serde(default)]
	pub widgets: Option<Value>,
}

/// Stored document fields, as found.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLayoutDocument {
	#[serde(default)]
	pub version: Option<Value>,
	#[serde(default)]
	pub pages: Option<Value>,
}

/// Reads strings as-is, scalars via their JSON text, and anything else as empty.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(s) => s,
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
	})
}

impl From<Widget> for RawWidget {
	fn from(widget: Widget) -> Self {
		let rect = widget.rect();
		let settings = *widget.settings();
		let mut raw = RawWidget {
			id: widget.id().to_string(),
			kind: settings.kind().as_str().to_string(),
			title: widget.title,
			entity_id: widget.entity_id,
			secondary_entity_id: widget.secondary_entity_id,
			rect: Some(json!({ "x": rect.x, "y": rect.y, "w": rect.w, "h": rect.h })),
			..RawWidget::default()
		};
		match settings {
			WidgetSettings::Button(button) => {
				raw.button_mode = Some(json!(button.mode.as_str()));
				raw.button_accent_color = Some(json!(button.accent_color.to_string()));
			}
			WidgetSettings::Slider(slider) => {
				raw.slider_direction = Some(json!(slider.direction.as_str()));
				raw.slider_accent_color = Some(json!(slider.accent_color.to_string()));
				raw.slider_entity_domain = Some(json!(slider.entity_domain.as_str()));
			}
			WidgetSettings::Graph(graph) => {
				raw.graph_line_color = Some(json!(graph.line_color.to_string()));
				raw.graph_time_window_min = Some(json!(graph.time_window_min));
				raw.graph_point_count = graph.point_count.map(|points| json!(points));
			}
			_ => {}
		}
		raw
	}
}
