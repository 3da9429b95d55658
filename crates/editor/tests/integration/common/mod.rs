//! Common utilities for editor integration tests.

use std::time::Duration;

use panelkit_editor::{EditorConfig, EditorSession, StaticEntityProvider};

/// Entity listing shaped like the backend's `/api/entities` answer.
pub const CATALOG_JSON: &str = r#"{"items": [
	{"id": "light.kitchen", "name": "Kitchen", "domain": "light"},
	{"id": "light.hall", "name": "Hall", "domain": "light", "state": "off"},
	{"id": "climate.living", "name": "Living room", "domain": "climate", "state": "heat"},
	{"id": "climate.office", "name": "Office", "domain": "climate"},
	{"id": "sensor.living_temp", "name": "Living temperature", "domain": "sensor", "unit": "°C", "state": 21.5},
	{"id": "sensor.outdoor_temp", "name": "Outdoor temperature", "domain": "sensor", "unit": "°C"},
	{"id": "binary_sensor.door", "name": "Front door", "domain": "binary_sensor"},
	{"id": "media_player.tv", "name": "TV", "domain": "media_player"},
	{"id": "weather.home", "name": "Home", "domain": "weather"}
]}"#;

pub fn provider() -> StaticEntityProvider {
	let _ = tracing_subscriber::fmt::try_init();
	StaticEntityProvider::from_json(CATALOG_JSON).expect("catalog fixture parses")
}

/// Session with the fixture catalog and states loaded.
pub async fn session() -> EditorSession {
	let provider = provider();
	let mut session = EditorSession::new(EditorConfig::default());
	session.refresh_entities(&provider).await.expect("static provider never fails");
	session.refresh_states(&provider).await.expect("static provider never fails");
	session
}

pub async fn wait_until<F>(name: &str, mut condition: F)
where
	F: FnMut() -> bool,
{
	tokio::time::timeout(Duration::from_secs(2), async move {
		loop {
			if condition() {
				return;
			}
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
	})
	.await
	.unwrap_or_else(|_| panic!("timed out waiting for {name}"));
}
