//! Layout document model.
//!
//! # Invariants
//!
//! * A document always holds at least one page.
//! * Page ids are unique within the document.
//! * Widget ids are unique across the whole document, not just their page.
//! * Every widget is normalized (see [`Widget::normalize`]).
//!
//! Constructors and mutators uphold these; untrusted JSON goes through
//! [`crate::normalize::normalize_document`], which repairs what it can.

use panelkit_registry::WidgetType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{EditorError, Result};
use crate::normalize::raw::RawLayoutDocument;
use crate::normalize::{NormalizeReport, normalize_document};

pub mod ids;
mod widget;

pub use widget::{ButtonSettings, GraphSettings, NEW_WIDGET_ORIGIN, SliderSettings, Widget, WidgetSettings};

/// Format version given to new documents and to imports without a usable one.
pub const LAYOUT_VERSION: u32 = 1;

/// One screen of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
	id: String,
	pub title: String,
	widgets: Vec<Widget>,
}

impl Page {
	/// Creates an empty page. A blank title becomes the id.
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		let id = id.into();
		let mut page = Self {
			title: String::new(),
			id,
			widgets: Vec::new(),
		};
		page.set_title(&title.into());
		page
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	/// Sets the trimmed title, falling back to the id when blank.
	pub fn set_title(&mut self, title: &str) {
		let title = title.trim();
		self.title = if title.is_empty() { self.id.clone() } else { title.to_string() };
	}

	/// Widgets in paint order.
	pub fn widgets(&self) -> &[Widget] {
		&self.widgets
	}

	pub fn widget(&self, id: &str) -> Option<&Widget> {
		self.widgets.iter().find(|w| w.id() == id)
	}

	pub(crate) fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
		self.widgets.iter_mut().find(|w| w.id() == id)
	}

	pub(crate) fn push_widget(&mut self, widget: Widget) {
		self.widgets.push(widget);
	}

	fn remove_widget(&mut self, id: &str) -> Option<Widget> {
		let index = self.widgets.iter().position(|w| w.id() == id)?;
		Some(self.widgets.remove(index))
	}
}

/// The persisted unit: an ordered list of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayoutDocument")]
pub struct LayoutDocument {
	version: u32,
	pages: Vec<Page>,
}

impl TryFrom<RawLayoutDocument> for LayoutDocument {
	type Error = EditorError;

	fn try_from(raw: RawLayoutDocument) -> Result<Self> {
		normalize_document(raw, &LayoutConfig::default()).map(|(document, _)| document)
	}
}

impl Default for LayoutDocument {
	fn default() -> Self {
		Self::new(&LayoutConfig::default())
	}
}

impl LayoutDocument {
	/// Creates a document holding only the configured default page.
	pub fn new(config: &LayoutConfig) -> Self {
		Self::with_page(Page::new(config.default_page_id.clone(), config.default_page_title.clone()))
	}

	/// Creates a document holding one page.
	pub fn with_page(page: Page) -> Self {
		Self {
			version: LAYOUT_VERSION,
			pages: vec![page],
		}
	}

	/// Assembles a document from repaired parts.
	///
	/// Callers guarantee `pages` is non-empty with unique ids.
	pub(crate) fn from_parts(version: u32, pages: Vec<Page>) -> Self {
		debug_assert!(!pages.is_empty());
		Self { version, pages }
	}

	/// Parses and normalizes JSON text.
	pub fn from_json(text: &str, config: &LayoutConfig) -> Result<(Self, NormalizeReport)> {
		let raw: RawLayoutDocument = serde_json::from_str(text)?;
		normalize_document(raw, config)
	}

	/// Serializes as indented JSON with normalized field names.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	/// Pages in display order. Never empty.
	pub fn pages(&self) -> &[Page] {
		&self.pages
	}

	pub fn first_page(&self) -> &Page {
		&self.pages[0]
	}

	pub fn page(&self, id: &str) -> Option<&Page> {
		self.pages.iter().find(|p| p.id == id)
	}

	fn page_mut(&mut self, id: &str) -> Result<&mut Page> {
		self.pages
			.iter_mut()
			.find(|p| p.id == id)
			.ok_or_else(|| EditorError::UnknownPage(id.to_string()))
	}

	/// All widgets across all pages.
	pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
		self.pages.iter().flat_map(|p| p.widgets.iter())
	}

	/// Returns true if any page holds a widget with this id.
	pub fn contains_widget(&self, id: &str) -> bool {
		self.widgets().any(|w| w.id() == id)
	}

	/// Finds a widget and the id of the page holding it.
	pub fn locate_widget(&self, id: &str) -> Option<(&str, &Widget)> {
		self.pages
			.iter()
			.find_map(|p| p.widget(id).map(|w| (p.id.as_str(), w)))
	}

	pub(crate) fn widget_mut(&mut self, page_id: &str, widget_id: &str) -> Result<&mut Widget> {
		self.page_mut(page_id)?
			.widget_mut(widget_id)
			.ok_or_else(|| EditorError::UnknownWidget(widget_id.to_string()))
	}

	/// Appends a page with a generated `page_<n>` id and `Page <count>` title.
	pub fn add_page(&mut self) -> &Page {
		let id = ids::first_free("page", |candidate| self.page(candidate).is_some());
		let title = format!("Page {}", self.pages.len() + 1);
		debug!(page = %id, "layout.page_added");
		self.pages.push(Page::new(id, title));
		&self.pages[self.pages.len() - 1]
	}

	/// Appends an existing page.
	pub fn insert_page(&mut self, page: Page) -> Result<()> {
		if self.page(&page.id).is_some() {
			return Err(EditorError::DuplicatePage(page.id));
		}
		if let Some(clash) = page.widgets.iter().find(|w| self.contains_widget(w.id())) {
			return Err(EditorError::DuplicateWidget(clash.id().to_string()));
		}
		self.pages.push(page);
		Ok(())
	}

	/// Removes a page. The last remaining page cannot be removed.
	pub fn remove_page(&mut self, id: &str) -> Result<Page> {
		let index = self
			.pages
			.iter()
			.position(|p| p.id == id)
			.ok_or_else(|| EditorError::UnknownPage(id.to_string()))?;
		if self.pages.len() == 1 {
			return Err(EditorError::LastPage);
		}
		debug!(page = %id, "layout.page_removed");
		Ok(self.pages.remove(index))
	}

	/// Renames a page; a blank title becomes the page id.
	pub fn rename_page(&mut self, id: &str, title: &str) -> Result<()> {
		self.page_mut(id)?.set_title(title);
		Ok(())
	}

	/// Returns the first free `<page>_<type>_<n>` widget id.
	pub fn next_widget_id(&self, page_id: &str, kind: WidgetType) -> String {
		let prefix = ids::widget_id_prefix(page_id, kind.as_str());
		ids::first_free(&prefix, |candidate| self.contains_widget(candidate))
	}

	/// Adds a widget to a page.
	///
	/// The widget is normalized first; its id must be unused document-wide.
	pub fn insert_widget(&mut self, page_id: &str, mut widget: Widget) -> Result<()> {
		if self.contains_widget(widget.id()) {
			return Err(EditorError::DuplicateWidget(widget.id().to_string()));
		}
		widget.normalize();
		self.page_mut(page_id)?.push_widget(widget);
		Ok(())
	}

	/// Replaces a widget in place, keeping its paint order.
	pub(crate) fn replace_widget(&mut self, page_id: &str, widget: Widget) -> Result<()> {
		let slot = self.widget_mut(page_id, widget.id())?;
		*slot = widget;
		Ok(())
	}

	pub fn remove_widget(&mut self, page_id: &str, widget_id: &str) -> Result<Widget> {
		self.page_mut(page_id)?
			.remove_widget(widget_id)
			.ok_or_else(|| EditorError::UnknownWidget(widget_id.to_string()))
	}

	/// Re-normalizes every widget. Run before persisting.
	pub fn normalize(&mut self) {
		for widget in self.pages.iter_mut().flat_map(|p| p.widgets.iter_mut()) {
			widget.normalize();
		}
	}
}
