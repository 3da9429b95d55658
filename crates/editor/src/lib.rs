#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Panel layout editor engine.
//!
//! This crate owns the authoritative layout model of the kiosk panel editor
//! and every rule that keeps it valid: footprint clamping, field
//! normalization, entity compatibility and interactive drag/resize.
//!
//! # Main Types
//!
//! - [`LayoutDocument`] - Pages of widgets, the unit that is saved and loaded
//! - [`Widget`] - One canonical widget record; type-specific settings live in [`WidgetSettings`]
//! - [`EditorSession`] - Selection, drag gestures and entity data around a document
//! - [`EntityAutocomplete`] - Debounced, generation-gated entity suggestions
//!
//! # Architecture
//!
//! ```text
//! EditorSession
//! ├── document: LayoutDocument      // pages -> widgets, always normalized
//! ├── drag: DragResizeMachine       // at most one active gesture
//! ├── catalog: EntityCatalog        // last successful entity refresh
//! └── states: HashMap<id, state>    // preview-only entity states
//! ```
//!
//! Untrusted input (imports, stored layouts, pasted JSON) enters through
//! [`normalize`], which is total: any JSON object becomes a valid widget or is
//! reported as dropped. Every mutation afterwards goes through the session,
//! which re-normalizes the touched widget before it becomes visible.

/// Editor configuration loaded from TOML.
pub mod config;
/// Layout document, pages and canonical widgets.
pub mod document;
/// Entity catalog, compatibility checks and suggestions.
pub mod entities;
pub mod error;
/// Footprint clamping and the drag/resize gesture machine.
pub mod geometry;
/// Normalization of untrusted widget and document JSON.
pub mod normalize;
/// Remote entity and state collaborators.
pub mod provider;
/// Editor session: selection, editing and gesture routing.
pub mod session;
/// Layout persistence backends.
pub mod store;

pub use config::{AutocompleteConfig, EditorConfig, EntityConfig, LayoutConfig};
pub use document::{ButtonSettings, GraphSettings, LayoutDocument, Page, SliderSettings, Widget, WidgetSettings};
pub use entities::autocomplete::{EntityAutocomplete, PumpReport, SuggestField, SuggestScope};
pub use entities::{Entity, EntityCatalog, matches_type};
pub use error::{EditorError, Result};
pub use geometry::drag::{DragEffect, DragError, DragOutcome, DragResizeMachine, DragState, GestureTarget, PressTarget};
pub use geometry::{clamp_rect, clamp_rect_with};
pub use normalize::{NormalizeReport, normalize_document, normalize_widget};
pub use provider::{EntityProvider, EntitySearch, ProviderError, StateProvider, StaticEntityProvider};
pub use session::{EditorSession, RectEdit, WidgetEdit};
pub use store::{FileLayoutStore, LayoutStore, MemoryLayoutStore, StoreError};
