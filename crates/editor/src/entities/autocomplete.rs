//! Debounced entity suggestions with stale-response protection.
//!
//! # Purpose
//!
//! * Produces suggestion lists for the primary and secondary entity fields.
//! * Shows local catalog matches immediately and upgrades them with remote
//!   results when those arrive in time.
//!
//! # Mental model
//!
//! Each field has two counters:
//!
//! * `ticket` identifies the latest scheduled keystroke. A debounce timer that
//!   fires with an older ticket is ignored, so a timer that raced its own
//!   cancellation cannot run a search.
//! * `generation` identifies the latest search. Remote responses carry the
//!   generation they were issued for and are dropped on mismatch, so a slow
//!   response can never overwrite the results of a newer query.
//!
//! Timer and remote completions are pushed into one channel; the owner
//! drains it with [`EntityAutocomplete::pump`], which is the only place
//! suggestions change after a search was issued.
//!
//! # Invariants
//!
//! * At most one debounce timer per field is pending.
//! * A remote result is applied only if its generation is current and it is
//!   non-empty; failures keep the local results.
//! * A typed domain outside the field's allowed set yields no suggestions
//!   and no remote query.
//!
//! # Lifecycle
//!
//! Timers and remote requests are spawned on the ambient Tokio runtime, so
//! [`EntityAutocomplete::schedule`], [`EntityAutocomplete::focus`] and
//! [`EntityAutocomplete::pump`] must run inside one. Dropping the
//! autocomplete aborts pending timers; in-flight remote requests finish and
//! their results are discarded.

use std::ops::AddAssign;
use std::sync::Arc;

use panelkit_registry::DomainQuery;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::search::{filter_local, parse_search_input};
use super::{Entity, EntityCatalog};
use crate::config::AutocompleteConfig;
use crate::provider::{EntityProvider, EntitySearch, ProviderError};

/// Which entity field suggestions are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestField {
	Primary,
	Secondary,
}

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestScope {
	/// A widget's primary entity. Local matches come from the compatible
	/// entities, or the whole catalog when none are compatible.
	Widget(DomainQuery),
	/// A field pinned to one domain.
	Domain(&'static str),
}

impl SuggestScope {
	/// Allowed domains; empty means any.
	pub fn allowed(&self) -> &[&'static str] {
		match self {
			Self::Widget(query) => query.allowed(),
			Self::Domain(domain) => std::slice::from_ref(domain),
		}
	}

	/// Domain assumed when the input names none.
	pub fn fallback_domain(&self) -> &'static str {
		match self {
			Self::Widget(query) => query.expected().unwrap_or_default(),
			Self::Domain(domain) => *domain,
		}
	}

	/// Returns true if a typed `domain` may be searched in this scope.
	///
	/// An empty domain and an empty allowed set accept anything.
	pub fn accepts_domain(&self, domain: &str) -> bool {
		let allowed = self.allowed();
		domain.is_empty() || allowed.is_empty() || allowed.iter().any(|d| *d == domain)
	}

	/// Catalog entries local filtering starts from.
	pub fn local_source<'a>(&self, catalog: &'a EntityCatalog) -> Vec<&'a Entity> {
		match self {
			Self::Widget(query) => {
				let typed = catalog.candidates_for(query);
				if typed.is_empty() { catalog.entities().iter().collect() } else { typed }
			}
			Self::Domain(domain) => catalog.in_domain(*domain).collect(),
		}
	}
}

/// Counts of what one [`EntityAutocomplete::pump`] call processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
	/// Debounced searches that ran.
	pub local_runs: usize,
	/// Remote results that replaced the suggestions.
	pub applied: usize,
	/// Remote results dropped because a newer search was issued.
	pub stale: usize,
	/// Remote searches that failed.
	pub failed: usize,
}

impl AddAssign for PumpReport {
	fn add_assign(&mut self, rhs: Self) {
		self.local_runs += rhs.local_runs;
		self.applied += rhs.applied;
		self.stale += rhs.stale;
		self.failed += rhs.failed;
	}
}

enum AutocompleteEvent {
	Due {
		field: SuggestField,
		ticket: u64,
		input: String,
		scope: SuggestScope,
	},
	Remote {
		field: SuggestField,
		generation: u64,
		result: Result<Vec<Entity>, ProviderError>,
	},
}

#[derive(Default)]
struct FieldState {
	ticket: u64,
	generation: u64,
	timer: Option<JoinHandle<()>>,
	suggestions: Vec<Entity>,
}

impl FieldState {
	fn cancel_timer(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.abort();
		}
		self.ticket += 1;
	}
}

/// Suggestion engine for both entity fields.
pub struct EntityAutocomplete {
	provider: Arc<dyn EntityProvider>,
	config: AutocompleteConfig,
	primary: FieldState,
	secondary: FieldState,
	tx: mpsc::UnboundedSender<AutocompleteEvent>,
	rx: mpsc::UnboundedReceiver<AutocompleteEvent>,
}

impl EntityAutocomplete {
	pub fn new(provider: Arc<dyn EntityProvider>, config: AutocompleteConfig) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		Self {
			provider,
			config,
			primary: FieldState::default(),
			secondary: FieldState::default(),
			tx,
			rx,
		}
	}

	fn field(&self, field: SuggestField) -> &FieldState {
		match field {
			SuggestField::Primary => &self.primary,
			SuggestField::Secondary => &self.secondary,
		}
	}

	fn field_mut(&mut self, field: SuggestField) -> &mut FieldState {
		match field {
			SuggestField::Primary => &mut self.primary,
			SuggestField::Secondary => &mut self.secondary,
		}
	}

	/// Current suggestions for `field`.
	pub fn suggestions(&self, field: SuggestField) -> &[Entity] {
		&self.field(field).suggestions
	}

	/// Id of the latest search issued for `field`.
	pub fn generation(&self, field: SuggestField) -> u64 {
		self.field(field).generation
	}

	/// Returns true while a debounce timer is pending for `field`.
	pub fn is_scheduled(&self, field: SuggestField) -> bool {
		self.field(field).timer.as_ref().is_some_and(|t| !t.is_finished())
	}

	/// Runs a search for `input` after the debounce period.
	///
	/// Replaces any pending timer for the same field.
	pub fn schedule(&mut self, field: SuggestField, input: impl Into<String>, scope: SuggestScope) {
		let debounce = self.config.debounce();
		let tx = self.tx.clone();
		let input = input.into();
		let state = self.field_mut(field);
		state.cancel_timer();
		let ticket = state.ticket;
		state.timer = Some(tokio::spawn(async move {
			tokio::time::sleep(debounce).await;
			let _ = tx.send(AutocompleteEvent::Due { field, ticket, input, scope });
		}));
	}

	/// Runs a search for `input` now, dropping any pending timer.
	pub fn focus(&mut self, field: SuggestField, input: &str, scope: SuggestScope, catalog: &EntityCatalog) {
		self.field_mut(field).cancel_timer();
		self.run(field, input, scope, catalog);
	}

	/// Drops pending work for `field` and clears its suggestions.
	///
	/// In-flight remote results for the field become stale.
	pub fn cancel(&mut self, field: SuggestField) {
		let state = self.field_mut(field);
		state.cancel_timer();
		state.generation += 1;
		state.suggestions.clear();
	}

	fn run(&mut self, field: SuggestField, input: &str, scope: SuggestScope, catalog: &EntityCatalog) {
		let max_items = self.config.max_items;
		let min_remote = self.config.min_remote_query_len;
		let state = self.field_mut(field);
		state.generation += 1;
		let generation = state.generation;

		let parsed = parse_search_input(input, scope.fallback_domain());
		if !scope.accepts_domain(&parsed.domain) {
			trace!(?field, domain = %parsed.domain, "autocomplete.domain_rejected");
			state.suggestions.clear();
			return;
		}

		state.suggestions = filter_local(scope.local_source(catalog), &parsed, max_items);
		if !parsed.wants_remote(min_remote) {
			return;
		}

		let query = EntitySearch {
			domain: (!parsed.domain.is_empty()).then_some(parsed.domain),
			search: (!parsed.fragment.is_empty()).then_some(parsed.fragment),
			limit: max_items,
		};
		trace!(?field, generation, ?query, "autocomplete.remote");
		let provider = Arc::clone(&self.provider);
		let tx = self.tx.clone();
		tokio::spawn(async move {
			let result = provider.search(query).await;
			let _ = tx.send(AutocompleteEvent::Remote { field, generation, result });
		});
	}

	/// Processes fired timers and arrived remote results.
	pub fn pump(&mut self, catalog: &EntityCatalog) -> PumpReport {
		let mut report = PumpReport::default();
		while let Ok(event) = self.rx.try_recv() {
			match event {
				AutocompleteEvent::Due { field, ticket, input, scope } => {
					let state = self.field_mut(field);
					if ticket != state.ticket {
						continue;
					}
					state.timer = None;
					self.run(field, &input, scope, catalog);
					report.local_runs += 1;
				}
				AutocompleteEvent::Remote { field, generation, result } => {
					let state = self.field_mut(field);
					if generation != state.generation {
						trace!(?field, generation, current = state.generation, "autocomplete.stale");
						report.stale += 1;
						continue;
					}
					match result {
						Ok(items) if !items.is_empty() => {
							state.suggestions = items;
							report.applied += 1;
						}
						Ok(_) => {}
						Err(err) => {
							warn!(?field, error = %err, "autocomplete.remote_failed");
							report.failed += 1;
						}
					}
				}
			}
		}
		report
	}
}

impl Drop for EntityAutocomplete {
	fn drop(&mut self) {
		for state in [&mut self.primary, &mut self.secondary] {
			if let Some(timer) = state.timer.take() {
				timer.abort();
			}
		}
	}
}
