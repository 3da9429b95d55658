use panelkit_editor::{EditorConfig, EditorError, EditorSession, LayoutDocument};
use panelkit_primitives::Rect;
use panelkit_registry::{ButtonMode, WidgetType};
use pretty_assertions::assert_eq;

const MESSY_LAYOUT: &str = r##"{
	"version": 7,
	"pages": [
		{"id": "Living Room", "title": "  ", "widgets": [
			{"id": "btn", "type": "button", "entity_id": "switch.x", "button_mode": "play_pause",
			 "rect": {"x": "13", "y": 999, "w": 5000, "h": null}, "button_accent_color": "nope"},
			{"id": "btn", "type": "graph", "entity_id": "sensor.power", "secondary_entity_id": "sensor.other",
			 "graph_time_window_min": "0", "graph_point_count": 200, "graph_line_color": "#FF0000"},
			{"id": "x", "type": "clock"},
			"garbage"
		]},
		{"id": "Living Room", "widgets": []}
	]
}"##;

#[test]
fn messy_import_is_repaired_and_reported() {
	let mut session = EditorSession::new(EditorConfig::default());
	let report = session.import_json(MESSY_LAYOUT).unwrap();
	assert!(!report.is_clean());
	assert_eq!(report.dropped_widgets.len(), 1);
	assert_eq!(report.renamed_pages.len(), 1);
	assert_eq!(report.renamed_widgets.len(), 1);

	let document = session.document();
	assert_eq!(document.version(), 7);
	assert!(!report.version_reset);
	assert_eq!(document.pages().len(), 2);
	let page = document.first_page();
	assert_eq!(page.widgets().len(), 2);

	let button = &page.widgets()[0];
	assert_eq!(button.kind(), WidgetType::Button);
	assert_eq!(button.button().map(|b| b.mode), Some(ButtonMode::Auto));
	assert_eq!(button.rect(), Rect::new(10, 500, 480, 100));

	let graph = &page.widgets()[1];
	assert_ne!(graph.id(), "btn");
	assert_eq!(graph.secondary_entity_id, "");
	let settings = graph.graph().unwrap();
	assert_eq!((settings.time_window_min, settings.point_count), (120, Some(64)));
	assert_eq!(settings.line_color.to_string(), "#ff0000");
}

#[test]
fn export_then_import_is_a_fixed_point() {
	let mut session = EditorSession::new(EditorConfig::default());
	session.import_json(MESSY_LAYOUT).unwrap();
	let exported = session.export_json().unwrap();

	let mut again = EditorSession::new(EditorConfig::default());
	let report = again.import_json(&exported).unwrap();
	assert!(report.is_clean(), "{report}");
	assert_eq!(again.document(), session.document());
	assert_eq!(again.export_json().unwrap(), exported);

	let via_serde: LayoutDocument = serde_json::from_str(&exported).unwrap();
	assert_eq!(&via_serde, session.document());
}

#[test]
fn broken_import_leaves_document_alone() {
	let mut session = EditorSession::new(EditorConfig::default());
	session.add_page();
	let before = session.document().clone();
	assert!(matches!(session.import_json("{\"pages\": {}}"), Err(EditorError::MissingPages)));
	assert!(matches!(session.import_json("[1, 2"), Err(EditorError::InvalidJson(_))));
	assert_eq!(session.document(), &before);
}

#[test]
fn empty_pages_array_gets_default_page() {
	let mut session = EditorSession::new(EditorConfig::default());
	let report = session.import_json("{\"pages\": []}").unwrap();
	assert!(report.added_default_page);
	assert_eq!(session.document().first_page().id(), "home");
}
