//! Entity catalog and widget compatibility.
//!
//! Entities are opaque `<domain>.<object_id>` records fetched from the
//! backend. The editor only interprets the domain prefix, matching it against
//! the allowed set of a widget's [`DomainQuery`].

use panelkit_primitives::{domain_of, has_domain};
use panelkit_registry::{DomainQuery, WidgetType};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod autocomplete;
pub mod search;

/// Id used when neither a compatible nor any entity is known.
pub const PLACEHOLDER_ENTITY: &str = "sensor.example";

/// A bindable backend entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub unit: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub device_class: String,
}

impl Entity {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Self::default()
		}
	}

	/// Domain prefix of the id, if any.
	pub fn domain(&self) -> Option<&str> {
		domain_of(&self.id)
	}

	/// `id (name)`, or `id (id)` when unnamed.
	pub fn label(&self) -> String {
		let name = if self.name.is_empty() { &self.id } else { &self.name };
		format!("{} ({name})", self.id)
	}
}

/// Returns true if `entity_id` may be bound to a widget described by `query`.
///
/// An empty allowed set accepts anything.
pub fn matches_type(entity_id: &str, query: &DomainQuery) -> bool {
	let allowed = query.allowed();
	allowed.is_empty() || allowed.iter().any(|domain| has_domain(entity_id, domain))
}

/// Last known entity list, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCatalog {
	entities: Vec<Entity>,
}

impl EntityCatalog {
	/// Builds a catalog, dropping entries without an id.
	pub fn new(entities: Vec<Entity>) -> Self {
		let total = entities.len();
		let entities: Vec<Entity> = entities.into_iter().filter(|e| !e.id.trim().is_empty()).collect();
		if entities.len() != total {
			debug!(dropped = total - entities.len(), "entities.catalog_blank_ids");
		}
		Self { entities }
	}

	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn get(&self, id: &str) -> Option<&Entity> {
		self.entities.iter().find(|e| e.id == id)
	}

	/// Entities whose id starts with `<domain>.`.
	pub fn in_domain<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
		self.entities.iter().filter(move |e| has_domain(&e.id, domain))
	}

	/// Compatible entities in catalog order.
	///
	/// Entity-less widgets have no candidates.
	pub fn candidates_for(&self, query: &DomainQuery) -> Vec<&Entity> {
		if query.kind.is_entityless() {
			return Vec::new();
		}
		self.entities.iter().filter(|e| matches_type(&e.id, query)).collect()
	}

	/// Default binding for a new widget or a cleared entity field.
	///
	/// The first compatible entity, else the first entity of any domain, else
	/// [`PLACEHOLDER_ENTITY`]. Entity-less widgets get an empty id.
	pub fn pick_default(&self, query: &DomainQuery) -> String {
		if query.kind.is_entityless() {
			return String::new();
		}
		self.candidates_for(query)
			.first()
			.copied()
			.or_else(|| self.entities.first())
			.map_or_else(|| PLACEHOLDER_ENTITY.to_string(), |e| e.id.clone())
	}

	/// Default for a heating tile's measured-temperature field.
	pub fn pick_default_sensor(&self) -> String {
		self.pick_default(&DomainQuery::new(WidgetType::Sensor))
	}
}
