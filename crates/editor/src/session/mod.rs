//! Editor session: the document plus everything around it.
//!
//! The [`EditorSession`] is the single owner of the layout being edited.
//! Implementation is split across focused modules:
//!
//! - `edit` - Widget creation, inspector edits and type changes
//! - `gesture` - Drag and resize routing
//! - `data` - Entity catalog, preview states and suggestion scopes
//!
//! # Invariants
//!
//! * The selected page always exists.
//! * The selected widget, when set, exists on the selected page.
//! * Operations that fail leave the document unchanged.
//! * A widget owned by an active gesture cannot be edited or deleted.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::document::{LayoutDocument, Page, Widget};
use crate::entities::EntityCatalog;
use crate::error::{EditorError, Result};
use crate::geometry::drag::DragResizeMachine;
use crate::normalize::NormalizeReport;
use crate::store::LayoutStore;

mod data;
mod edit;
mod gesture;

pub use edit::{RectEdit, WidgetEdit};

/// An open layout with selection, gesture and entity state.
pub struct EditorSession {
	config: EditorConfig,
	document: LayoutDocument,
	selected_page: String,
	selected_widget: Option<String>,
	drag: DragResizeMachine,
	catalog: EntityCatalog,
	states: HashMap<String, String>,
	modified: bool,
}

impl EditorSession {
	/// Opens a session on the configured default layout.
	pub fn new(config: EditorConfig) -> Self {
		let document = LayoutDocument::new(&config.layout);
		let selected_page = document.first_page().id().to_string();
		Self {
			config,
			document,
			selected_page,
			selected_widget: None,
			drag: DragResizeMachine::new(),
			catalog: EntityCatalog::default(),
			states: HashMap::new(),
			modified: false,
		}
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn document(&self) -> &LayoutDocument {
		&self.document
	}

	/// Returns true if the document changed since it was loaded or saved.
	pub fn is_modified(&self) -> bool {
		self.modified
	}

	pub fn selected_page(&self) -> &Page {
		self.document
			.page(&self.selected_page)
			.unwrap_or_else(|| self.document.first_page())
	}

	pub fn selected_widget(&self) -> Option<&Widget> {
		self.selected_widget
			.as_deref()
			.and_then(|id| self.selected_page().widget(id))
	}

	/// Replaces the document wholesale.
	///
	/// Cancels any gesture, selects the first page and clears the widget
	/// selection.
	pub fn load_document(&mut self, document: LayoutDocument) {
		self.drag.cancel();
		self.selected_page = document.first_page().id().to_string();
		self.selected_widget = None;
		self.document = document;
		self.modified = false;
	}

	/// Replaces the document with normalized JSON text.
	///
	/// Unparseable text or text without a `pages` array is an error and
	/// leaves the current document in place. The imported document counts
	/// as modified until saved.
	pub fn import_json(&mut self, text: &str) -> Result<NormalizeReport> {
		let (document, report) = LayoutDocument::from_json(text, &self.config.layout)?;
		if !report.is_clean() {
			warn!(repairs = %report, "session.import_repaired");
		}
		self.load_document(document);
		self.modified = true;
		info!(pages = self.document.pages().len(), "session.imported");
		Ok(report)
	}

	/// Returns the normalized document as pretty JSON.
	pub fn export_json(&self) -> Result<String> {
		let mut document = self.document.clone();
		document.normalize();
		document.to_json()
	}

	/// Loads from `store`.
	///
	/// On any failure the default layout is installed and the error is
	/// returned, so the session is always usable afterwards.
	pub async fn load_from(&mut self, store: &dyn LayoutStore) -> Result<NormalizeReport> {
		let loaded = match store.load().await {
			Ok(text) => LayoutDocument::from_json(&text, &self.config.layout),
			Err(err) => Err(err.into()),
		};
		match loaded {
			Ok((document, report)) => {
				self.load_document(document);
				info!(pages = self.document.pages().len(), clean = report.is_clean(), "session.loaded");
				Ok(report)
			}
			Err(err) => {
				warn!(error = %err, "session.load_failed_using_default");
				self.load_document(LayoutDocument::new(&self.config.layout));
				Err(err)
			}
		}
	}

	/// Normalizes the document and writes it to `store`.
	pub async fn save_to(&mut self, store: &dyn LayoutStore) -> Result<()> {
		self.document.normalize();
		store.save(&self.document).await?;
		self.modified = false;
		info!("session.saved");
		Ok(())
	}

	/// Appends a generated page and selects it. Returns its id.
	pub fn add_page(&mut self) -> String {
		let id = self.document.add_page().id().to_string();
		self.selected_page = id.clone();
		self.selected_widget = None;
		self.modified = true;
		id
	}

	/// Deletes a page. The last page cannot be deleted.
	///
	/// Deleting the selected page selects the first remaining one.
	pub fn delete_page(&mut self, id: &str) -> Result<()> {
		if let Some(gesture) = self.drag.gesture()
			&& gesture.target.page_id == id
		{
			return Err(EditorError::WidgetBusy(gesture.target.widget_id.clone()));
		}
		self.document.remove_page(id)?;
		if self.selected_page == id {
			self.selected_page = self.document.first_page().id().to_string();
			self.selected_widget = None;
		}
		self.modified = true;
		Ok(())
	}

	/// Renames a page; a blank title becomes the page id.
	pub fn rename_page(&mut self, id: &str, title: &str) -> Result<()> {
		self.document.rename_page(id, title)?;
		self.modified = true;
		Ok(())
	}

	/// Selects a page and clears the widget selection.
	pub fn select_page(&mut self, id: &str) -> Result<()> {
		if self.document.page(id).is_none() {
			return Err(EditorError::UnknownPage(id.to_string()));
		}
		self.selected_page = id.to_string();
		self.selected_widget = None;
		Ok(())
	}

	/// Selects a widget on the selected page, or clears the selection.
	pub fn select_widget(&mut self, id: Option<&str>) -> Result<()> {
		match id {
			None => self.selected_widget = None,
			Some(id) => {
				if self.selected_page().widget(id).is_none() {
					return Err(EditorError::UnknownWidget(id.to_string()));
				}
				self.selected_widget = Some(id.to_string());
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
