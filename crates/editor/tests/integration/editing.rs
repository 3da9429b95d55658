use panelkit_editor::{DragOutcome, EditorError, PressTarget, WidgetEdit};
use panelkit_primitives::{PointerPosition, Rect};
use panelkit_registry::WidgetType;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn heating_tile_defaults_and_secondary_validation() {
	let mut session = common::session().await;
	let id = session.add_widget(WidgetType::HeatingTile).unwrap();

	let widget = session.selected_widget().unwrap();
	assert_eq!(widget.entity_id, "climate.living");
	assert_eq!(widget.secondary_entity_id, "sensor.living_temp");
	assert_eq!(session.state_of(&widget.entity_id), Some("heat"));

	let edit = WidgetEdit {
		secondary_entity_id: Some("binary_sensor.door".to_string()),
		..WidgetEdit::default()
	};
	let err = session.apply_edit(&id, &edit).unwrap_err();
	assert_eq!(err.to_string(), "secondary entity must use domain: sensor");
	assert_eq!(session.selected_widget().unwrap().secondary_entity_id, "sensor.living_temp");

	let edit = WidgetEdit {
		entity_id: Some("climate.office".to_string()),
		secondary_entity_id: Some("sensor.outdoor_temp".to_string()),
		..WidgetEdit::default()
	};
	let widget = session.apply_edit(&id, &edit).unwrap();
	assert_eq!(widget.entity_id, "climate.office");
	assert_eq!(widget.secondary_entity_id, "sensor.outdoor_temp");
}

#[tokio::test]
async fn last_page_survives_every_delete() {
	let mut session = common::session().await;
	let second = session.add_page();
	let third = session.add_page();
	assert_eq!((second.as_str(), third.as_str()), ("page_1", "page_2"));

	session.delete_page("home").unwrap();
	session.delete_page(&third).unwrap();
	assert!(matches!(session.delete_page(&second), Err(EditorError::LastPage)));
	assert_eq!(session.document().pages().len(), 1);
	assert_eq!(session.selected_page().id(), second);
}

#[tokio::test]
async fn widget_ids_stay_unique_across_pages() {
	let mut session = common::session().await;
	let first = session.add_widget(WidgetType::Sensor).unwrap();
	let second = session.add_widget(WidgetType::Sensor).unwrap();
	session.add_page();
	let third = session.add_widget(WidgetType::Sensor).unwrap();
	assert_eq!([first.as_str(), second.as_str(), third.as_str()], [
		"home_sensor_1",
		"home_sensor_2",
		"page_1_sensor_1"
	]);
	assert_eq!(session.document().widgets().count(), 3);
}

#[tokio::test]
async fn drag_and_resize_session_stays_on_canvas() {
	let mut session = common::session().await;
	let id = session.add_widget(WidgetType::Weather3Day).unwrap();

	session.press(&id, PressTarget::Body, PointerPosition::new(100, 100)).unwrap();
	for step in 1..=20 {
		session.pointer_move(PointerPosition::new(100 + step * 50, 100 + step * 50)).unwrap();
		let rect = session.selected_widget().unwrap().rect();
		assert!(rect.fits_canvas() && rect.is_grid_aligned(), "{rect:?}");
	}
	let outcome = session.release(PointerPosition::new(2000, 2000)).unwrap();
	assert!(matches!(outcome, Some(DragOutcome::Committed { rect, .. }) if rect == Rect::new(360, 340, 360, 260)));

	session.press(&id, PressTarget::ResizeHandle, PointerPosition::new(0, 0)).unwrap();
	session.pointer_move(PointerPosition::new(-1000, -1000)).unwrap();
	session.release(PointerPosition::new(-1000, -1000)).unwrap();
	assert_eq!(session.selected_widget().unwrap().rect(), Rect::new(360, 340, 260, 220));
}
