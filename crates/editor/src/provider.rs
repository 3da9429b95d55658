//! Remote collaborators: entity search and entity states.
//!
//! The editor never talks to a backend directly. Hosts implement these traits
//! over whatever transport they have; [`StaticEntityProvider`] serves a fixed
//! list and is what the CLI and tests use.

use std::collections::HashMap;

use async_trait::async_trait;
use panelkit_primitives::has_domain;
use serde::Deserialize;
use thiserror::Error;

use crate::entities::Entity;
use crate::entities::search::entity_contains;

/// Errors from remote collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// The backend could not be reached or refused the request.
	#[error("entity backend unavailable: {0}")]
	Unavailable(String),

	/// The backend answered with something that is not an entity list.
	#[error("malformed entity data: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Parameters of a remote entity search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySearch {
	/// Only entities of this domain.
	pub domain: Option<String>,
	/// Case-insensitive substring of id or name.
	pub search: Option<String>,
	pub limit: usize,
}

/// Source of entity lists.
#[async_trait]
pub trait EntityProvider: Send + Sync {
	/// Returns at most `query.limit` matching entities.
	async fn search(&self, query: EntitySearch) -> Result<Vec<Entity>, ProviderError>;

	/// Returns every known entity.
	async fn catalog(&self) -> Result<Vec<Entity>, ProviderError>;
}

/// Source of current entity states, used for previews only.
#[async_trait]
pub trait StateProvider: Send + Sync {
	/// Returns `entity_id -> state`.
	async fn states(&self) -> Result<HashMap<String, String>, ProviderError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityListing {
	Bare(Vec<StaticEntity>),
	Wrapped { items: Vec<StaticEntity> },
}

#[derive(Deserialize)]
struct StaticEntity {
	#[serde(flatten)]
	entity: Entity,
	#[serde(default)]
	state: Option<serde_json::Value>,
}

/// In-memory provider over a fixed entity list.
#[derive(Debug, Clone, Default)]
pub struct StaticEntityProvider {
	entities: Vec<Entity>,
	states: HashMap<String, String>,
}

impl StaticEntityProvider {
	pub fn new(entities: Vec<Entity>) -> Self {
		Self {
			entities,
			states: HashMap::new(),
		}
	}

	/// Sets preview states.
	pub fn with_states(mut self, states: HashMap<String, String>) -> Self {
		self.states = states;
		self
	}

	/// Parses a listing: either a bare array or `{"items": [...]}`.
	///
	/// Entries may carry a `state`; scalars become preview states.
	pub fn from_json(text: &str) -> Result<Self, ProviderError> {
		let listing: EntityListing = serde_json::from_str(text)?;
		let items = match listing {
			EntityListing::Bare(items) | EntityListing::Wrapped { items } => items,
		};
		let mut provider = Self::default();
		for item in items {
			let state = match item.state {
				Some(serde_json::Value::String(s)) => Some(s),
				Some(serde_json::Value::Number(n)) => Some(n.to_string()),
				Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
				_ => None,
			};
			if let Some(state) = state {
				provider.states.insert(item.entity.id.clone(), state);
			}
			provider.entities.push(item.entity);
		}
		Ok(provider)
	}

	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}
}

#[async_trait]
impl EntityProvider for StaticEntityProvider {
	async fn search(&self, query: EntitySearch) -> Result<Vec<Entity>, ProviderError> {
		let domain = query.domain.as_deref().unwrap_or_default();
		let search = query.search.as_deref().unwrap_or_default();
		Ok(self
			.entities
			.iter()
			.filter(|e| domain.is_empty() || has_domain(&e.id, domain))
			.filter(|e| entity_contains(e, search))
			.take(query.limit)
			.cloned()
			.collect())
	}

	async fn catalog(&self) -> Result<Vec<Entity>, ProviderError> {
		Ok(self.entities.clone())
	}
}

#[async_trait]
impl StateProvider for StaticEntityProvider {
	async fn states(&self) -> Result<HashMap<String, String>, ProviderError> {
		Ok(self.states.clone())
	}
}
