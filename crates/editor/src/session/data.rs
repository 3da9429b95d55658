//! Entity catalog, preview states and suggestion scopes.

use std::collections::HashMap;

use tracing::{info, warn};

use super::EditorSession;
use crate::entities::autocomplete::SuggestScope;
use crate::entities::{Entity, EntityCatalog};
use crate::error::Result;
use crate::provider::{EntityProvider, StateProvider};

impl EditorSession {
	pub fn catalog(&self) -> &EntityCatalog {
		&self.catalog
	}

	/// Last known state of an entity, for previews.
	pub fn state_of(&self, entity_id: &str) -> Option<&str> {
		self.states.get(entity_id).map(String::as_str)
	}

	/// Replaces the entity catalog.
	pub fn set_entities(&mut self, entities: Vec<Entity>) {
		self.catalog = EntityCatalog::new(entities);
	}

	/// Reloads the catalog from `provider`. Returns the entity count.
	///
	/// On failure the previous catalog is kept.
	pub async fn refresh_entities(&mut self, provider: &dyn EntityProvider) -> Result<usize> {
		match provider.catalog().await {
			Ok(entities) => {
				self.set_entities(entities);
				info!(count = self.catalog.len(), "session.entities_refreshed");
				Ok(self.catalog.len())
			}
			Err(err) => {
				warn!(error = %err, "session.entities_refresh_failed");
				Err(err.into())
			}
		}
	}

	/// Reloads preview states from `provider`.
	///
	/// On failure the previous states are kept.
	pub async fn refresh_states(&mut self, provider: &dyn StateProvider) -> Result<usize> {
		match provider.states().await {
			Ok(states) => {
				self.states = states;
				Ok(self.states.len())
			}
			Err(err) => {
				warn!(error = %err, "session.states_refresh_failed");
				Err(err.into())
			}
		}
	}

	/// Preview states by entity id.
	pub fn states(&self) -> &HashMap<String, String> {
		&self.states
	}

	/// Suggestion scope for the selected widget's entity field.
	///
	/// `None` without a selection or for entity-less widgets.
	pub fn primary_scope(&self) -> Option<SuggestScope> {
		let widget = self.selected_widget()?;
		if widget.kind().is_entityless() {
			return None;
		}
		Some(SuggestScope::Widget(widget.query(self.config.entities.sensor_domains)))
	}

	/// Suggestion scope for the selected widget's secondary entity field.
	///
	/// Only heating tiles have one.
	pub fn secondary_scope(&self) -> Option<SuggestScope> {
		self.selected_widget()
			.filter(|w| w.kind().uses_secondary_entity())
			.map(|_| SuggestScope::Domain("sensor"))
	}
}
