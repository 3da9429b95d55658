use std::sync::Arc;

use panelkit_editor::{AutocompleteConfig, EntityAutocomplete, PumpReport, SuggestField};
use panelkit_registry::WidgetType;

use crate::common;

#[tokio::test]
async fn session_scopes_drive_autocomplete() {
	let mut session = common::session().await;
	let mut autocomplete = EntityAutocomplete::new(Arc::new(common::provider()), AutocompleteConfig::default());
	session.add_widget(WidgetType::HeatingTile).unwrap();

	let primary = session.primary_scope().unwrap();
	autocomplete.focus(SuggestField::Primary, "off", primary, session.catalog());
	let local: Vec<_> = autocomplete
		.suggestions(SuggestField::Primary)
		.iter()
		.map(|e| e.id.clone())
		.collect();
	assert_eq!(local, ["climate.office"]);

	let secondary = session.secondary_scope().unwrap();
	autocomplete.focus(SuggestField::Secondary, "sensor.*out", secondary, session.catalog());
	let mut report = PumpReport::default();
	common::wait_until("remote results", || {
		report += autocomplete.pump(session.catalog());
		report.applied + report.stale >= 2
	})
	.await;
	let ids: Vec<_> = autocomplete
		.suggestions(SuggestField::Secondary)
		.iter()
		.map(|e| e.id.as_str())
		.collect();
	assert_eq!(ids, ["sensor.outdoor_temp"]);
	assert_eq!(report.failed, 0);
}
