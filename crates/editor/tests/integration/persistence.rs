use panelkit_editor::{EditorConfig, EditorError, EditorSession, FileLayoutStore, LayoutStore, StoreError};
use panelkit_registry::WidgetType;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn file_store_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let store = FileLayoutStore::new(dir.path().join("layout.json"));

	let mut session = common::session().await;
	session.add_widget(WidgetType::LightTile).unwrap();
	session.add_widget(WidgetType::Graph).unwrap();
	session.save_to(&store).await.unwrap();

	let mut reopened = EditorSession::new(EditorConfig::default());
	let report = reopened.load_from(&store).await.unwrap();
	assert!(report.is_clean());
	assert_eq!(reopened.document(), session.document());
	assert!(!reopened.is_modified());
}

#[tokio::test]
async fn missing_or_corrupt_file_falls_back_to_default() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("layout.json");
	let store = FileLayoutStore::new(&path);

	let mut session = common::session().await;
	session.add_page();
	let err = session.load_from(&store).await.unwrap_err();
	assert!(matches!(err, EditorError::Store(StoreError::Empty)));
	assert_eq!(session.document().pages().len(), 1);

	tokio::fs::write(&path, "{ not json").await.unwrap();
	session.add_page();
	assert!(matches!(session.load_from(&store).await, Err(EditorError::InvalidJson(_))));
	assert_eq!(session.document().pages().len(), 1);
	assert_eq!(store.load().await.unwrap(), "{ not json");
}
