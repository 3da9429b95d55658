use std::collections::HashMap;

use async_trait::async_trait;
use panelkit_primitives::{PointerPosition, Rect};
use panelkit_registry::{ButtonMode, DomainPolicy, SliderEntityDomain, WidgetType};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{EditorSession, RectEdit, WidgetEdit};
use crate::config::EditorConfig;
use crate::entities::Entity;
use crate::entities::autocomplete::SuggestScope;
use crate::error::EditorError;
use crate::geometry::drag::{DragEffect, DragOutcome, PressTarget};
use crate::provider::{EntityProvider, EntitySearch, ProviderError, StateProvider, StaticEntityProvider};
use crate::store::{LayoutStore, MemoryLayoutStore};

fn catalog() -> Vec<Entity> {
	vec![
		Entity::new("light.kitchen", "Kitchen"),
		Entity::new("climate.living", "Living room"),
		Entity::new("sensor.living_temp", "Living temperature"),
		Entity::new("binary_sensor.door", "Door"),
		Entity::new("switch.kettle", "Kettle"),
		Entity::new("media_player.tv", "TV"),
		Entity::new("cover.blinds", "Blinds"),
	]
}

fn session() -> EditorSession {
	let mut session = EditorSession::new(EditorConfig::default());
	session.set_entities(catalog());
	session
}

struct FailingProvider;

#[async_trait]
impl EntityProvider for FailingProvider {
	async fn search(&self, _query: EntitySearch) -> Result<Vec<Entity>, ProviderError> {
		Err(ProviderError::Unavailable("offline".to_string()))
	}

	async fn catalog(&self) -> Result<Vec<Entity>, ProviderError> {
		Err(ProviderError::Unavailable("offline".to_string()))
	}
}

#[async_trait]
impl StateProvider for FailingProvider {
	async fn states(&self) -> Result<HashMap<String, String>, ProviderError> {
		Err(ProviderError::Unavailable("offline".to_string()))
	}
}

#[test]
fn new_session_selects_default_page() {
	let session = EditorSession::new(EditorConfig::default());
	assert_eq!(session.selected_page().id(), "home");
	assert!(session.selected_widget().is_none());
	assert!(!session.is_modified());
}

#[rstest]
#[case(WidgetType::Sensor, "sensor.living_temp")]
#[case(WidgetType::Button, "switch.kettle")]
#[case(WidgetType::Slider, "light.kitchen")]
#[case(WidgetType::LightTile, "light.kitchen")]
#[case(WidgetType::HeatingTile, "climate.living")]
#[case(WidgetType::Graph, "light.kitchen")]
#[case(WidgetType::EmptyTile, "")]
// No weather entity: the first entity of any domain.
#[case(WidgetType::WeatherTile, "light.kitchen")]
fn add_widget_picks_default_entity(#[case] kind: WidgetType, #[case] expected: &str) {
	let mut session = session();
	let id = session.add_widget(kind).unwrap();
	let widget = session.selected_widget().unwrap();
	assert_eq!(widget.id(), id);
	assert_eq!(widget.entity_id, expected);
	assert!(session.is_modified());
}

#[test]
fn add_widget_without_catalog_uses_placeholder() {
	let mut session = EditorSession::new(EditorConfig::default());
	session.add_widget(WidgetType::LightTile).unwrap();
	assert_eq!(session.selected_widget().unwrap().entity_id, "sensor.example");
}

#[test]
fn heating_tile_gets_both_entities() {
	let mut session = session();
	let id = session.add_widget(WidgetType::HeatingTile).unwrap();
	assert_eq!(id, "home_heating_tile_1");
	let widget = session.selected_widget().unwrap();
	assert_eq!(widget.entity_id, "climate.living");
	assert_eq!(widget.secondary_entity_id, "sensor.living_temp");
	assert_eq!(widget.rect(), Rect::new(20, 20, 300, 260));
}

#[test]
fn rejected_edit_leaves_widget_unchanged() {
	let mut session = session();
	let id = session.add_widget(WidgetType::HeatingTile).unwrap();
	let before = session.selected_widget().unwrap().clone();

	let edit = WidgetEdit {
		title: Some("Changed".to_string()),
		secondary_entity_id: Some("climate.living".to_string()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert!(matches!(&err, EditorError::SecondaryDomain { required: "sensor", .. }));
	assert!(err.to_string().contains("sensor"), "{err}");
	assert_eq!(session.selected_widget().unwrap(), &before);

	let edit = WidgetEdit {
		entity_id: Some("light.kitchen".to_string()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert_eq!(err.to_string(), "entity must use domain: climate");
	assert_eq!(session.selected_widget().unwrap(), &before);
}

#[test]
fn blank_entity_input_picks_default() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Slider).unwrap();
	let edit = WidgetEdit {
		entity_id: Some("  ".to_string()),
		slider_entity_domain: Some("cover".to_string()),
		..WidgetEdit::default()
	};
	let widget = session.apply_edit(&id, &edit).unwrap();
	assert_eq!(widget.entity_id, "cover.blinds");
	assert_eq!(widget.slider().map(|s| s.entity_domain), Some(SliderEntityDomain::Cover));
}

#[test]
fn blank_input_default_must_match_domain() {
	let mut session = EditorSession::new(EditorConfig::default());
	session.set_entities(vec![Entity::new("climate.living", "Living room"), Entity::new("light.a", "A")]);

	let id = session.add_widget(WidgetType::HeatingTile).unwrap();
	let before = session.selected_widget().unwrap().clone();
	assert_eq!(before.entity_id, "climate.living");
	assert_eq!(before.secondary_entity_id, "sensor.example");

	let edit = WidgetEdit {
		secondary_entity_id: Some(String::new()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert!(matches!(&err, EditorError::SecondaryDomain { entity_id, required: "sensor" } if entity_id == "climate.living"));
	assert_eq!(session.selected_widget().unwrap(), &before);

	let id = session.add_widget(WidgetType::Sensor).unwrap();
	let edit = WidgetEdit {
		entity_id: Some(String::new()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert!(matches!(&err, EditorError::EntityDomain { entity_id, .. } if entity_id == "climate.living"));
	assert_eq!(err.to_string(), "entity must use domain: sensor");
}

#[test]
fn retyping_to_heating_tile_without_sensor_uses_placeholder() {
	let mut session = EditorSession::new(EditorConfig::default());
	session.set_entities(vec![Entity::new("climate.living", "Living room")]);
	let id = session.add_widget(WidgetType::LightTile).unwrap();
	let widget = session.change_widget_type(&id, WidgetType::HeatingTile).unwrap();
	assert_eq!(widget.entity_id, "climate.living");
	assert_eq!(widget.secondary_entity_id, "sensor.example");
}

#[test]
fn narrowing_slider_domain_rejects_current_entity() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Slider).unwrap();
	let edit = WidgetEdit {
		slider_entity_domain: Some("cover".to_string()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert!(matches!(err, EditorError::EntityDomain { ref allowed, .. } if allowed == &["cover"]));
}

#[test]
fn edit_coerces_loose_values_and_clamps() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Graph).unwrap();
	let edit = WidgetEdit {
		title: Some("  Power  ".to_string()),
		rect: RectEdit {
			x: Some(1000),
			w: Some(333),
			..RectEdit::default()
		},
		graph_line_color: Some("#ABCDEF".to_string()),
		graph_time_window_min: Some("99999".to_string()),
		graph_point_count: Some("3".to_string()),
		button_mode: Some("stop".to_string()),
		..WidgetEdit::default()
	};
	let widget = session.apply_edit(&id, &edit).unwrap();
	assert_eq!(widget.title, "Power");
	assert_eq!(widget.rect(), Rect::new(390, 20, 330, 140));
	let graph = widget.graph().unwrap();
	assert_eq!(graph.line_color.to_string(), "#abcdef");
	assert_eq!(graph.time_window_min, 1440);
	assert_eq!(graph.point_count, Some(16));
	assert!(widget.button().is_none());
}

#[test]
fn media_mode_needs_media_player_in_same_edit() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Button).unwrap();

	let err = session
		.apply_edit(
			&id,
			&WidgetEdit {
				button_mode: Some("play_pause".to_string()),
				..WidgetEdit::default()
			},
		)
		.unwrap_err();
	assert!(matches!(err, EditorError::EntityDomain { ref entity_id, .. } if entity_id == "switch.kettle"));

	let widget = session
		.apply_edit(
			&id,
			&WidgetEdit {
				entity_id: Some("media_player.tv".to_string()),
				button_mode: Some("play_pause".to_string()),
				..WidgetEdit::default()
			},
		)
		.unwrap();
	assert_eq!(widget.button().map(|b| b.mode), Some(ButtonMode::PlayPause));
}

#[test]
fn change_type_keeps_compatible_entity_and_reclamps() {
	let mut session = session();
	let id = session.add_widget(WidgetType::LightTile).unwrap();

	let widget = session.change_widget_type(&id, WidgetType::Slider).unwrap();
	assert_eq!(widget.kind(), WidgetType::Slider);
	assert_eq!(widget.entity_id, "light.kitchen");
	assert_eq!(widget.id(), id);

	let widget = session.change_widget_type(&id, WidgetType::HeatingTile).unwrap();
	assert_eq!(widget.entity_id, "climate.living");
	assert_eq!(widget.secondary_entity_id, "sensor.living_temp");
	assert!(widget.slider().is_none());

	let widget = session.change_widget_type(&id, WidgetType::EmptyTile).unwrap();
	assert_eq!(widget.entity_id, "");
	assert_eq!(widget.secondary_entity_id, "");
}

#[test]
fn deleting_pages_keeps_one_and_moves_selection() {
	let mut session = session();
	assert!(matches!(session.delete_page("home"), Err(EditorError::LastPage)));

	let page = session.add_page();
	assert_eq!(session.selected_page().id(), page);
	session.delete_page(&page).unwrap();
	assert_eq!(session.selected_page().id(), "home");
	assert_eq!(session.document().pages().len(), 1);
}

#[test]
fn selection_is_scoped_to_page() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Sensor).unwrap();
	let other = session.add_page();
	assert!(session.selected_widget().is_none());
	assert!(matches!(session.select_widget(Some(&id)), Err(EditorError::UnknownWidget(_))));
	assert!(matches!(session.select_page("missing"), Err(EditorError::UnknownPage(_))));

	session.select_page("home").unwrap();
	session.select_widget(Some(&id)).unwrap();
	assert_eq!(session.selected_widget().map(|w| w.id()), Some(id.as_str()));
	session.rename_page(&other, " ").unwrap();
	assert_eq!(session.document().page(&other).unwrap().title, other);
}

#[test]
fn drag_moves_widget_and_locks_it() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Sensor).unwrap();
	session.select_widget(None).unwrap();

	session.press(&id, PressTarget::Body, PointerPosition::new(30, 30)).unwrap();
	assert_eq!(session.selected_widget().map(|w| w.id()), Some(id.as_str()));
	assert_eq!(
		session.pointer_move(PointerPosition::new(64, 47)).unwrap(),
		DragEffect::Applied(Rect::new(50, 40, 220, 120))
	);
	assert_eq!(session.selected_widget().unwrap().rect(), Rect::new(50, 40, 220, 120));

	assert!(matches!(session.delete_widget(&id), Err(EditorError::WidgetBusy(_))));
	assert!(matches!(
		session.apply_edit(&id, &WidgetEdit::default()),
		Err(EditorError::WidgetBusy(_))
	));
	assert!(matches!(
		session.press(&id, PressTarget::ResizeHandle, PointerPosition::new(0, 0)),
		Err(EditorError::Drag(_))
	));

	let outcome = session.release(PointerPosition::new(64, 47)).unwrap();
	assert!(matches!(outcome, Some(DragOutcome::Committed { rect, .. }) if rect == Rect::new(50, 40, 220, 120)));
	session.delete_widget(&id).unwrap();
}

#[test]
fn resize_then_cancel_restores_start() {
	let mut session = session();
	let id = session.add_widget(WidgetType::LightTile).unwrap();
	let start = session.selected_widget().unwrap().rect();

	session.press(&id, PressTarget::ResizeHandle, PointerPosition::new(0, 0)).unwrap();
	session.pointer_move(PointerPosition::new(900, 900)).unwrap();
	assert_eq!(session.selected_widget().unwrap().rect(), Rect::new(20, 20, 480, 480));

	session.cancel_drag().unwrap();
	assert_eq!(session.selected_widget().unwrap().rect(), start);
	assert!(!session.drag().is_active());
}

#[test]
fn click_without_motion_is_not_a_change() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Button).unwrap();
	session.press(&id, PressTarget::Body, PointerPosition::new(10, 10)).unwrap();
	let outcome = session.release(PointerPosition::new(12, 11)).unwrap();
	assert!(matches!(outcome, Some(DragOutcome::Click { .. })));
	assert_eq!(session.release(PointerPosition::new(0, 0)).unwrap(), None);
}

#[test]
fn import_replaces_document_and_cancels_gesture() {
	let mut session = session();
	let id = session.add_widget(WidgetType::Sensor).unwrap();
	session.press(&id, PressTarget::Body, PointerPosition::new(0, 0)).unwrap();

	assert!(matches!(session.import_json("not json"), Err(EditorError::InvalidJson(_))));
	assert!(session.drag().is_active());

	let report = session
		.import_json(r#"{"pages": [{"id": "a", "widgets": [{"id": "x", "type": "clock"}]}]}"#)
		.unwrap();
	assert_eq!(report.dropped_widgets.len(), 1);
	assert!(!session.drag().is_active());
	assert_eq!(session.selected_page().id(), "a");
	assert!(session.is_modified());
}

#[test]
fn export_is_normalized_json() {
	let mut session = session();
	session.add_widget(WidgetType::Graph).unwrap();
	let text = session.export_json().unwrap();
	let value: serde_json::Value = serde_json::from_str(&text).unwrap();
	assert_eq!(value["version"], 1);
	assert_eq!(value["pages"][0]["widgets"][0]["type"], "graph");
}

#[tokio::test]
async fn store_round_trip_and_default_fallback() {
	let store = MemoryLayoutStore::new();
	let mut session = session();

	let err = session.load_from(&store).await.unwrap_err();
	assert!(matches!(err, EditorError::Store(_)));
	assert_eq!(session.document().pages().len(), 1);

	session.add_widget(WidgetType::LightTile).unwrap();
	session.save_to(&store).await.unwrap();
	assert!(!session.is_modified());

	let mut reopened = EditorSession::new(EditorConfig::default());
	reopened.load_from(&store).await.unwrap();
	assert_eq!(reopened.document(), session.document());

	let broken = MemoryLayoutStore::with_text("{\"pages\": null}");
	assert!(matches!(reopened.load_from(&broken).await, Err(EditorError::MissingPages)));
	assert_eq!(reopened.document().first_page().widgets().len(), 0);
	assert!(store.load().await.is_ok());
}

#[tokio::test]
async fn refresh_keeps_previous_data_on_failure() {
	let mut session = session();
	let mut states = HashMap::new();
	states.insert("light.kitchen".to_string(), "on".to_string());
	let provider = StaticEntityProvider::new(vec![Entity::new("weather.home", "Home")]).with_states(states);

	assert_eq!(session.refresh_states(&provider).await.unwrap(), 1);
	assert_eq!(session.state_of("light.kitchen"), Some("on"));
	assert_eq!(session.refresh_entities(&provider).await.unwrap(), 1);

	assert!(session.refresh_entities(&FailingProvider).await.is_err());
	assert!(session.refresh_states(&FailingProvider).await.is_err());
	assert_eq!(session.catalog().len(), 1);
	assert_eq!(session.state_of("light.kitchen"), Some("on"));
}

#[test]
fn scopes_follow_selection() {
	let mut config = EditorConfig::default();
	config.entities.sensor_domains = DomainPolicy::IncludeBinary;
	let mut session = EditorSession::new(config);
	assert_eq!(session.primary_scope(), None);

	session.add_widget(WidgetType::Sensor).unwrap();
	let scope = session.primary_scope().unwrap();
	assert_eq!(scope.allowed(), ["sensor", "binary_sensor"]);
	assert_eq!(session.secondary_scope(), None);

	session.add_widget(WidgetType::HeatingTile).unwrap();
	assert_eq!(session.secondary_scope(), Some(SuggestScope::Domain("sensor")));

	session.add_widget(WidgetType::EmptyTile).unwrap();
	assert_eq!(session.primary_scope(), None);
}
