//! Error types for editor operations.

use thiserror::Error;

use crate::geometry::drag::DragError;
use crate::provider::ProviderError;
use crate::store::StoreError;

/// Errors surfaced by document and session operations.
///
/// Every variant leaves the document untouched: an operation either applies
/// completely or reports one of these.
#[derive(Debug, Error)]
pub enum EditorError {
	/// Input JSON has no `pages` array.
	#[error("invalid layout JSON: no pages array")]
	MissingPages,

	/// Input text is not JSON at all.
	#[error("invalid layout JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	/// Deleting the only remaining page.
	#[error("at least one page is required")]
	LastPage,

	/// No page with this id.
	#[error("unknown page: {0}")]
	UnknownPage(String),

	/// No widget with this id on the addressed page.
	#[error("unknown widget: {0}")]
	UnknownWidget(String),

	/// A page with this id already exists.
	#[error("duplicate page id: {0}")]
	DuplicatePage(String),

	/// A widget with this id already exists in the document.
	#[error("duplicate widget id: {0}")]
	DuplicateWidget(String),

	/// Primary entity outside the widget's allowed domains.
	#[error("entity must use domain: {}", allowed.join(", "))]
	EntityDomain {
		/// The rejected entity id.
		entity_id: String,
		/// Domains the widget accepts.
		allowed: Vec<&'static str>,
	},

	/// Secondary entity outside its required domain.
	#[error("secondary entity must use domain: {required}")]
	SecondaryDomain {
		/// The rejected entity id.
		entity_id: String,
		/// The single domain the secondary field accepts.
		required: &'static str,
	},

	/// The widget is owned by an active drag or resize gesture.
	#[error("widget {0} is being moved")]
	WidgetBusy(String),

	#[error(transparent)]
	Drag(#[from] DragError),

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Provider(#[from] ProviderError),
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
